//! Request handlers.
//!
//! Each submodule provides async handler functions for one area of the site.
//! Handlers delegate persistence to the repositories in `stickynotes_db`,
//! render pages through [`crate::views`] and map failures via
//! [`AppError`](crate::error::AppError).

pub mod auth;
pub mod notes;
