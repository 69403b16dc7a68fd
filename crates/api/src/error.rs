use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::views;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent HTML error pages.
/// Form validation failures are not errors here: handlers re-render the form.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// No live session; the user is sent to the login page.
    #[error("Login required to access {next}")]
    LoginRequired { next: String },

    /// No route, or a path parameter that cannot name a resource.
    #[error("Not found")]
    NotFound,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// Path of the login page.
pub const LOGIN_PATH: &str = "/login/";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(&err),

            // --- HTTP-specific errors ---
            AppError::LoginRequired { next } => Redirect::to(&login_url(&next)).into_response(),
            AppError::NotFound => not_found(),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        }
    }
}

/// Login page URL that returns to `next` after signing in.
pub fn login_url(next: &str) -> String {
    match serde_urlencoded::to_string(&[("next", next)]) {
        Ok(query) if next != "/" => format!("{LOGIN_PATH}?{query}"),
        _ => LOGIN_PATH.to_string(),
    }
}

/// One page for every kind of "not here", so a note owned by someone else
/// cannot be told apart from a note that never existed.
fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Html(views::errors::not_found_page())).into_response()
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(views::errors::error_page(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An internal error occurred",
        )),
    )
        .into_response()
}

/// Classify a sqlx error into a response.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> Response {
    match err {
        sqlx::Error::RowNotFound => not_found(),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            tracing::warn!(constraint, "Unique constraint violation");
            (
                StatusCode::CONFLICT,
                Html(views::errors::error_page(
                    StatusCode::CONFLICT,
                    "Duplicate value violates a unique constraint",
                )),
            )
                .into_response()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}
