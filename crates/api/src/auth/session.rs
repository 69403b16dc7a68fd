//! The `sessionid` cookie.
//!
//! Logging in (or registering) persists a `user_sessions` row and hands the
//! browser a signed token in an `HttpOnly` cookie. Logging out revokes the
//! row and replaces the cookie with an expired one.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use cookie::{Cookie, SameSite};
use stickynotes_core::types::DbId;
use stickynotes_db::models::session::CreateSession;
use stickynotes_db::repositories::SessionRepo;

use super::jwt::{hash_token_id, issue_session_token, validate_token, SessionConfig};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE_NAME: &str = "sessionid";

/// Build the `Set-Cookie` cookie for a freshly issued token.
pub fn session_cookie(token: String, config: &SessionConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .max_age(cookie::time::Duration::hours(config.expiry_hours))
        .build()
}

/// Build a cookie that clears the session cookie in the browser.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    cookie.make_removal();
    cookie
}

/// Extract the raw session token from the request's `Cookie` headers.
pub fn read_session_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|c| c.name() == SESSION_COOKIE_NAME && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

/// Start a session for `user_id` and return the `Set-Cookie` header value.
pub async fn start_session(state: &AppState, user_id: DbId) -> AppResult<String> {
    let issued = issue_session_token(user_id, &state.config.session)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id,
            token_hash: issued.token_hash,
            expires_at: issued.expires_at,
        },
    )
    .await?;

    tracing::info!(user_id, "Session started");

    Ok(session_cookie(issued.token, &state.config.session).to_string())
}

/// Revoke the session named by the request's cookie, if there is one.
///
/// Tokens that fail validation are ignored; there is nothing to revoke.
pub async fn end_session(state: &AppState, headers: &HeaderMap) -> AppResult<()> {
    let Some(token) = read_session_token(headers) else {
        return Ok(());
    };
    let Ok(claims) = validate_token(&token, &state.config.session) else {
        return Ok(());
    };

    if SessionRepo::revoke_by_token_hash(&state.pool, &hash_token_id(&claims.jti)).await? {
        tracing::info!(user_id = claims.sub, "Session ended");
    }
    Ok(())
}
