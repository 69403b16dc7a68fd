pub mod auth;
pub mod health;
pub mod notes;

use axum::Router;

use crate::state::AppState;

/// Build the page route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login/                     login form, login (public)
/// /logout/                    logout (GET or POST)
/// /register/                  registration form, register (public)
///
/// /                           note list (auth required)
/// /note/create/               create form, create
/// /note/{id}/                 detail
/// /note/{id}/update/          edit form, update
/// /note/{id}/delete/          delete confirmation, delete
/// ```
///
/// Trailing slashes are significant: `/login` is a 404, as is any `{id}`
/// that is not a run of digits.
pub fn app_routes() -> Router<AppState> {
    Router::new().merge(auth::router()).merge(notes::router())
}
