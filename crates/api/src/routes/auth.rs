//! Route definitions for the account pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// ```text
/// GET  /login/     -> login_form (?next)
/// POST /login/     -> login
/// GET  /logout/    -> logout
/// POST /logout/    -> logout
/// GET  /register/  -> register_form
/// POST /register/  -> register
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login/", get(auth::login_form).post(auth::login))
        .route("/logout/", get(auth::logout).post(auth::logout))
        .route("/register/", get(auth::register_form).post(auth::register))
}
