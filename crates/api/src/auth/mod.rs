//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- Signed session tokens and their server-side hashes.
//! - [`session`] -- The session cookie: issuing, reading and revoking it.

pub mod jwt;
pub mod password;
pub mod session;
