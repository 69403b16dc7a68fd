//! Handlers for login, logout and registration.

use axum::extract::{Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use stickynotes_core::accounts::{
    validate_login, validate_registration, LoginForm, RegistrationForm, INVALID_LOGIN_MESSAGE,
    USERNAME_TAKEN_MESSAGE,
};
use stickynotes_core::forms::FieldErrors;
use stickynotes_db::models::user::CreateUser;
use stickynotes_db::repositories::UserRepo;

use crate::auth::password::{hash_password, reject_unknown_user, verify_password};
use crate::auth::session::{end_session, removal_cookie, start_session};
use crate::error::{AppError, AppResult, LOGIN_PATH};
use crate::state::AppState;
use crate::views::accounts as pages;

/// Where to go after signing in when no `next` was given.
const HOME_PATH: &str = "/";

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Query string of `GET /login/`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    pub next: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /login/
pub async fn login_form(Query(query): Query<LoginQuery>) -> Html<String> {
    let form = LoginForm {
        next: query.next,
        ..LoginForm::default()
    };
    Html(pages::login_page(&form, &FieldErrors::new()))
}

/// POST /login/
///
/// Bad credentials re-render the form with one non-field error, whether the
/// username or the password was wrong.
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let credentials = match validate_login(&form) {
        Ok(credentials) => credentials,
        Err(errors) => return Ok(Html(pages::login_page(&form, &errors)).into_response()),
    };

    let user = UserRepo::find_by_username(&state.pool, &credentials.username).await?;

    let authenticated = match &user {
        Some(user) => verify_password(&credentials.password, &user.password_hash)
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?,
        None => reject_unknown_user(&credentials.password),
    };

    let user = match user {
        Some(user) if authenticated => user,
        _ => {
            tracing::info!(username = %credentials.username, "Login failed");
            let mut errors = FieldErrors::new();
            errors.add_non_field(INVALID_LOGIN_MESSAGE);
            return Ok(Html(pages::login_page(&form, &errors)).into_response());
        }
    };

    UserRepo::record_successful_login(&state.pool, user.id).await?;
    let cookie = start_session(&state, user.id).await?;

    tracing::info!(user_id = user.id, "User logged in");

    let target = form
        .next
        .as_deref()
        .filter(|next| is_safe_redirect(next))
        .unwrap_or(HOME_PATH);

    Ok(([(SET_COOKIE, cookie)], Redirect::to(target)).into_response())
}

/// GET|POST /logout/
///
/// Works with or without a live session; the cookie is cleared either way.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    end_session(&state, &headers).await?;

    Ok((
        [(SET_COOKIE, removal_cookie().to_string())],
        Redirect::to(LOGIN_PATH),
    )
        .into_response())
}

/// GET /register/
pub async fn register_form() -> Html<String> {
    Html(pages::register_page(
        &RegistrationForm::default(),
        &FieldErrors::new(),
    ))
}

/// POST /register/
///
/// A new account is signed in straight away.
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegistrationForm>,
) -> AppResult<Response> {
    let mut errors = FieldErrors::new();

    let account = match validate_registration(&form) {
        Ok(account) => Some(account),
        Err(e) => {
            errors.merge(e);
            None
        }
    };

    let username = form.username.trim();
    if !username.is_empty()
        && !errors.has("username")
        && UserRepo::username_exists(&state.pool, username).await?
    {
        errors.add("username", USERNAME_TAKEN_MESSAGE);
    }

    let account = match account {
        Some(account) if errors.is_empty() => account,
        _ => return Ok(Html(pages::register_page(&form, &errors)).into_response()),
    };

    let password_hash = hash_password(&account.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let created = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: account.username,
            password_hash,
        },
    )
    .await;

    let user = match created {
        Ok(user) => user,
        // Lost a race with a concurrent sign-up for the same name.
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
            errors.add("username", USERNAME_TAKEN_MESSAGE);
            return Ok(Html(pages::register_page(&form, &errors)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let cookie = start_session(&state, user.id).await?;

    tracing::info!(user_id = user.id, username = %user.username, "User registered");

    Ok(([(SET_COOKIE, cookie)], Redirect::to(HOME_PATH)).into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Only local absolute paths are followed after login. Protocol-relative
/// (`//host`) and backslash tricks are refused.
fn is_safe_redirect(next: &str) -> bool {
    next.starts_with('/')
        && !next.starts_with("//")
        && !next.starts_with("/\\")
        && !next.chars().any(|c| c.is_control())
}
