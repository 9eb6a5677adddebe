//! HTTP-level integration tests for login, logout and session checks.

mod common;

use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, request, TestApp, TEST_PASSWORD};
use serde_json::json;

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

/// Correct password returns a session id and registers the session.
#[tokio::test]
async fn login_success_returns_session_id() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/api/login", json!({ "password": TEST_PASSWORD }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert!(json["sessionId"].is_string());
    assert!(json["message"].is_string());
    assert_eq!(app.state.sessions.active_count().await, 1);
}

/// Wrong password returns 401 with `success: false` and creates no session.
#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/api/login", json!({ "password": "nope" }))
        .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].is_string());
    assert!(json.get("sessionId").is_none());
    assert_eq!(app.state.sessions.active_count().await, 0);
}

/// A body without `password` is a 400 with a JSON error body.
#[tokio::test]
async fn login_missing_password_is_bad_request() {
    let app = TestApp::new().await;

    let response = app.post_json("/api/login", json!({ "pass": "x" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

/// Non-JSON bodies are rejected as 400 with a JSON error body.
#[tokio::test]
async fn login_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/login")
        .header("content-type", "application/json")
        .body(Body::from("{password:"))
        .expect("valid request");
    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].is_string());
}

/// An Argon2 PHC string as the configured secret is verified as a hash.
#[tokio::test]
async fn login_with_hashed_admin_secret() {
    let salt = SaltString::encode_b64(b"navdir-test-salt").expect("valid salt");
    let hash = Argon2::default()
        .hash_password(b"hashed-secret", &salt)
        .expect("hashing should succeed")
        .to_string();
    let app = TestApp::with_config(|config| config.admin_password = hash).await;

    let ok = app
        .post_json("/api/login", json!({ "password": "hashed-secret" }))
        .await;
    assert_eq!(ok.status(), StatusCode::OK);

    let bad = app
        .post_json("/api/login", json!({ "password": TEST_PASSWORD }))
        .await;
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Check-auth
// ---------------------------------------------------------------------------

#[tokio::test]
async fn check_auth_without_token_is_logged_out() {
    let app = TestApp::new().await;

    let response = app.get("/api/check-auth").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["loggedIn"], false);
}

#[tokio::test]
async fn check_auth_with_valid_token_is_logged_in() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let response = app.get_with_session("/api/check-auth", &token).await;

    assert_eq!(body_json(response).await["loggedIn"], true);
}

/// The `Authorization: Bearer` header is accepted in place of `X-Session-Id`.
#[tokio::test]
async fn check_auth_accepts_bearer_header() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/check-auth")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("valid request");
    let response = app.send(request).await;

    assert_eq!(body_json(response).await["loggedIn"], true);
}

/// A token passed as a query parameter is ignored.
#[tokio::test]
async fn check_auth_ignores_query_token() {
    let app = TestApp::new().await;
    let token = app.login().await;

    let response = app
        .get(&format!("/api/check-auth?sessionId={token}"))
        .await;

    assert_eq!(body_json(response).await["loggedIn"], false);
}

/// Once the session timeout passes the token is no longer accepted and the
/// session is dropped from the registry.
#[tokio::test]
async fn session_expires_after_timeout() {
    let app = TestApp::new().await;
    let token = app.login().await;

    app.clock
        .advance(app.state.sessions.timeout() + chrono::Duration::seconds(1));

    let response = app.get_with_session("/api/check-auth", &token).await;
    assert_eq!(body_json(response).await["loggedIn"], false);
    assert_eq!(app.state.sessions.active_count().await, 0);

    let response = app
        .post_json_with_session("/api/navigation", &token, json!({ "name": "late" }))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Logout
// ---------------------------------------------------------------------------

/// Logout destroys the session; repeating it is harmless.
#[tokio::test]
async fn logout_is_idempotent() {
    let app = TestApp::new().await;
    let token = app.login().await;

    for _ in 0..2 {
        let response = app
            .send(request(Method::POST, "/api/logout", Some(&token), None))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["success"], true);
    }

    let response = app.get_with_session("/api/check-auth", &token).await;
    assert_eq!(body_json(response).await["loggedIn"], false);
}

/// Logout without any token still succeeds.
#[tokio::test]
async fn logout_without_token_succeeds() {
    let app = TestApp::new().await;

    let response = app
        .send(request(Method::POST, "/api/logout", None, None))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
}

/// Logging out one session leaves other sessions intact.
#[tokio::test]
async fn logout_only_affects_named_session() {
    let app = TestApp::new().await;
    let first = app.login().await;
    let second = app.login().await;

    app.send(request(Method::POST, "/api/logout", Some(&first), None))
        .await;

    let response = app.get_with_session("/api/check-auth", &second).await;
    assert_eq!(body_json(response).await["loggedIn"], true);
}
