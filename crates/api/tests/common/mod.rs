#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use stickynotes_api::auth::jwt::SessionConfig;
use stickynotes_api::auth::password::hash_password;
use stickynotes_api::config::ServerConfig;
use stickynotes_api::router::build_app_router;
use stickynotes_api::state::AppState;
use stickynotes_db::models::user::{CreateUser, User};
use stickynotes_db::repositories::UserRepo;
use stickynotes_db::DbPool;

/// Password given to every user made by [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        max_db_connections: 1,
        request_timeout_secs: 30,
        session: SessionConfig {
            secret: "integration-test-secret-long-enough".to_string(),
            expiry_hours: 1,
            cookie_secure: false,
        },
    }
}

/// Build the full application router over a fresh in-memory database.
///
/// Uses the same [`build_app_router`] as `main.rs`, so the tests exercise the
/// production middleware stack. The pool is returned for direct assertions.
pub async fn build_test_app() -> (Router, DbPool) {
    let pool = stickynotes_db::create_memory_pool()
        .await
        .expect("in-memory pool should open");
    let config = test_config();
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    (build_app_router(state, &config), pool)
}

/// Insert a user with [`TEST_PASSWORD`].
pub async fn create_user(pool: &DbPool, username: &str) -> User {
    let password_hash = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            password_hash,
        },
    )
    .await
    .expect("user creation should succeed")
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Send a GET request, optionally carrying a session cookie.
pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Send a url-encoded form POST, optionally carrying a session cookie.
pub async fn post_form(
    app: &Router,
    uri: &str,
    fields: &[(&str, &str)],
    cookie: Option<&str>,
) -> Response<Body> {
    let body = serde_urlencoded::to_string(fields).unwrap();
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Send a POST with an arbitrary body and optional `Content-Type`.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: Option<&str>,
    body: &str,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    app.clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Log in through the login form and return the `Cookie` header value to
/// send on later requests.
pub async fn login(app: &Router, username: &str) -> String {
    let response = post_form(
        app,
        "/login/",
        &[("username", username), ("password", TEST_PASSWORD)],
        None,
    )
    .await;
    assert_eq!(response.status(), 303, "login should redirect");
    session_cookie(&response).expect("login should set the session cookie")
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The `Location` header of a redirect.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
}

/// The `sessionid=...` pair from a non-empty session `Set-Cookie`, ready to
/// be sent back in a `Cookie` header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .find(|pair| pair.starts_with("sessionid=") && pair.len() > "sessionid=".len())
        .map(str::to_string)
}
