//! User entity model and DTOs.

use sqlx::FromRow;
use stickynotes_core::types::{DbId, Timestamp};

/// Full user row from the `users` table.
///
/// Contains the password hash, so it is never rendered or serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub password_hash: String,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. The password must already be hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}
