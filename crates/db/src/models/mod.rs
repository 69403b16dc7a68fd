//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - The create/update DTOs its repository accepts

pub mod note;
pub mod session;
pub mod user;
