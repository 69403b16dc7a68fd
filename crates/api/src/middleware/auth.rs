//! Session-cookie authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use stickynotes_core::types::DbId;
use stickynotes_db::repositories::{SessionRepo, UserRepo};

use crate::auth::jwt::{hash_token_id, validate_token};
use crate::auth::session::read_session_token;
use crate::error::AppError;
use crate::state::AppState;

/// The user owning the request's session.
///
/// Use this as an extractor parameter in any handler that requires a login.
/// A request without a live session is rejected with a redirect to the login
/// page that returns to the requested path afterwards:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Html<String>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Html(String::new()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let login_required = || AppError::LoginRequired {
            next: parts
                .uri
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| "/".to_string()),
        };

        let token = read_session_token(&parts.headers).ok_or_else(login_required)?;
        let claims =
            validate_token(&token, &state.config.session).map_err(|_| login_required())?;

        let session = SessionRepo::find_by_token_hash(&state.pool, &hash_token_id(&claims.jti))
            .await?
            .filter(|s| s.user_id == claims.sub && s.is_active_at(Utc::now()))
            .ok_or_else(login_required)?;

        let user = UserRepo::find_by_id(&state.pool, session.user_id)
            .await?
            .ok_or_else(login_required)?;

        Ok(AuthUser {
            user_id: user.id,
            username: user.username,
        })
    }
}
