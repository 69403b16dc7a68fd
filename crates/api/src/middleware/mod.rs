//! Request extractors that gate handlers.
//!
//! - [`auth::AuthUser`] -- The signed-in user, or a redirect to the login page.

pub mod auth;
