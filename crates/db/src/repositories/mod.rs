//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&SqlitePool` as the first argument.

pub mod note_repo;
pub mod session_repo;
pub mod user_repo;

pub use note_repo::NoteRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
