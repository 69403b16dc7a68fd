//! HTTP-level integration tests for login, logout and registration.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use common::{
    body_text, build_test_app, create_user, get, location, login, post_form, session_cookie,
    TEST_PASSWORD,
};
use stickynotes_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_form_carries_next() {
    let (app, _pool) = build_test_app().await;

    let response = get(&app, "/login/?next=%2Fnote%2F3%2F", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"<input type="hidden" name="next" value="/note/3/">"#));
}

#[tokio::test]
async fn login_with_valid_credentials_redirects_to_list() {
    let (app, pool) = build_test_app().await;
    let user = create_user(&pool, "testuser").await;
    assert!(user.last_login_at.is_none());

    let response = post_form(
        &app,
        "/login/",
        &[("username", "testuser"), ("password", TEST_PASSWORD)],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Lax"));

    let cookie = session_cookie(&response).expect("session cookie should be set");
    let list = get(&app, "/", Some(&cookie)).await;
    assert_eq!(list.status(), StatusCode::OK);
    assert!(body_text(list).await.contains("Signed in as testuser"));

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(reloaded.last_login_at.is_some());
}

#[tokio::test]
async fn login_follows_local_next_only() {
    let (app, pool) = build_test_app().await;
    create_user(&pool, "testuser").await;

    let response = post_form(
        &app,
        "/login/",
        &[
            ("username", "testuser"),
            ("password", TEST_PASSWORD),
            ("next", "/note/create/"),
        ],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/note/create/");

    let response = post_form(
        &app,
        "/login/",
        &[
            ("username", "testuser"),
            ("password", TEST_PASSWORD),
            ("next", "//evil.example/"),
        ],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[tokio::test]
async fn bad_credentials_rerender_login_form() {
    let (app, pool) = build_test_app().await;
    create_user(&pool, "testuser").await;

    for (username, password) in [("testuser", "wrong-password"), ("nobody", TEST_PASSWORD)] {
        let response = post_form(
            &app,
            "/login/",
            &[("username", username), ("password", password)],
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(session_cookie(&response).is_none());
        let html = body_text(response).await;
        assert!(html.contains("Please enter a correct username and password."));
        assert!(html.contains(&format!(r#"value="{username}""#)));
    }
}

#[tokio::test]
async fn blank_login_reports_required_fields() {
    let (app, _pool) = build_test_app().await;

    let response = post_form(&app, "/login/", &[("username", ""), ("password", "")], None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert_eq!(html.matches("This field is required.").count(), 2);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_revokes_session_and_clears_cookie() {
    let (app, pool) = build_test_app().await;
    create_user(&pool, "testuser").await;
    let cookie = login(&app, "testuser").await;

    let response = post_form(&app, "/logout/", &[], Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login/");
    let set_cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
    assert!(set_cookie.starts_with("sessionid=;"));
    assert!(set_cookie.contains("Max-Age=0"));

    // The old token still verifies, but its session row is revoked.
    let response = get(&app, "/", Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login/");
}

#[tokio::test]
async fn logout_without_session_still_redirects() {
    let (app, _pool) = build_test_app().await;

    let response = get(&app, "/logout/", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login/");
}

#[tokio::test]
async fn logout_only_ends_the_current_session() {
    let (app, pool) = build_test_app().await;
    create_user(&pool, "testuser").await;
    let laptop = login(&app, "testuser").await;
    let phone = login(&app, "testuser").await;

    get(&app, "/logout/", Some(&laptop)).await;

    assert_eq!(get(&app, "/", Some(&phone)).await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/", Some(&laptop)).await.status(), StatusCode::SEE_OTHER);
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_creates_user_and_signs_in() {
    let (app, pool) = build_test_app().await;

    let form = get(&app, "/register/", None).await;
    assert_eq!(form.status(), StatusCode::OK);

    let response = post_form(
        &app,
        "/register/",
        &[
            ("username", "newuser"),
            ("password1", "SecurePass123!"),
            ("password2", "SecurePass123!"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response).expect("registration should sign the user in");

    let user = UserRepo::find_by_username(&pool, "newuser")
        .await
        .unwrap()
        .expect("user should exist");
    assert!(user.password_hash.starts_with("$argon2id$"));

    let list = get(&app, "/", Some(&cookie)).await;
    assert_eq!(list.status(), StatusCode::OK);

    // The new password works for a fresh login too.
    let response = post_form(
        &app,
        "/login/",
        &[("username", "newuser"), ("password", "SecurePass123!")],
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn register_rejects_taken_username() {
    let (app, pool) = build_test_app().await;
    create_user(&pool, "testuser").await;

    let response = post_form(
        &app,
        "/register/",
        &[
            ("username", "testuser"),
            ("password1", "SecurePass123!"),
            ("password2", "SecurePass123!"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(body_text(response)
        .await
        .contains("A user with that username already exists."));
}

#[tokio::test]
async fn register_rejects_username_differing_only_in_case() {
    let (app, pool) = build_test_app().await;
    create_user(&pool, "testuser").await;

    let response = post_form(
        &app,
        "/register/",
        &[
            ("username", "TestUser"),
            ("password1", "SecurePass123!"),
            ("password2", "SecurePass123!"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(session_cookie(&response).is_none());
    assert!(body_text(response)
        .await
        .contains("A user with that username already exists."));
    assert!(UserRepo::find_by_username(&pool, "TestUser").await.unwrap().is_none());
}

#[tokio::test]
async fn register_rejects_mismatched_passwords() {
    let (app, pool) = build_test_app().await;

    let response = post_form(
        &app,
        "/register/",
        &[
            ("username", "newuser"),
            ("password1", "SecurePass123!"),
            ("password2", "SecurePass124!"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("The two password fields didn&#x27;t match."));
    assert!(!UserRepo::username_exists(&pool, "newuser").await.unwrap());
}

#[tokio::test]
async fn register_enforces_password_policy() {
    let (app, pool) = build_test_app().await;

    let response = post_form(
        &app,
        "/register/",
        &[
            ("username", "newuser"),
            ("password1", "12345678"),
            ("password2", "12345678"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("This password is too common."));
    assert!(html.contains("This password is entirely numeric."));
    assert!(!UserRepo::username_exists(&pool, "newuser").await.unwrap());
}

#[tokio::test]
async fn register_rejects_bad_username_characters() {
    let (app, pool) = build_test_app().await;

    let response = post_form(
        &app,
        "/register/",
        &[
            ("username", "new user!"),
            ("password1", "SecurePass123!"),
            ("password2", "SecurePass123!"),
        ],
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("Enter a valid username."));
    assert!(!UserRepo::username_exists(&pool, "new user!").await.unwrap());
}
