#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use navdir_core::clock::ManualClock;
use navdir_core::session::SessionManager;
use tempfile::TempDir;
use tower::ServiceExt;

use navdir_api::config::ServerConfig;
use navdir_api::middleware::session::SESSION_HEADER;
use navdir_api::router::build_app_router;
use navdir_api::state::AppState;

/// Administrator password used by every test app.
pub const TEST_PASSWORD: &str = "test-admin-password";

/// Build a test `ServerConfig` with safe defaults rooted at `data_dir`.
pub fn test_config(data_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        admin_password: TEST_PASSWORD.to_string(),
        session_timeout_mins: 30,
        data_dir: data_dir.join(".data"),
        static_dir: None,
        debug: true,
    }
}

/// A fully wired application over a private temp directory, with a
/// manually driven session clock.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub clock: Arc<ManualClock>,
    _dir: TempDir,
}

impl TestApp {
    /// Seeded store, default test config.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Seeded store, test config adjusted by `customize`.
    pub async fn with_config(customize: impl FnOnce(&mut ServerConfig)) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let mut config = test_config(dir.path());
        customize(&mut config);

        let clock = Arc::new(ManualClock::new());
        let sessions = SessionManager::with_clock(config.session_timeout(), clock.clone());
        let state = AppState::with_sessions(config.clone(), sessions);
        state
            .store
            .ensure_initialized()
            .await
            .expect("store init should succeed");

        let router = build_app_router(state.clone(), &config);
        Self {
            router,
            state,
            clock,
            _dir: dir,
        }
    }

    /// Send a request through a clone of the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router should not fail")
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(request(Method::GET, uri, None, None)).await
    }

    pub async fn get_with_session(&self, uri: &str, token: &str) -> Response<Body> {
        self.send(request(Method::GET, uri, Some(token), None)).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send(request(Method::POST, uri, None, Some(body))).await
    }

    pub async fn post_json_with_session(
        &self,
        uri: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send(request(Method::POST, uri, Some(token), Some(body)))
            .await
    }

    pub async fn put_json_with_session(
        &self,
        uri: &str,
        token: &str,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.send(request(Method::PUT, uri, Some(token), Some(body)))
            .await
    }

    pub async fn delete_with_session(&self, uri: &str, token: &str) -> Response<Body> {
        self.send(request(Method::DELETE, uri, Some(token), None))
            .await
    }

    /// Log in with the test password and return the session token.
    pub async fn login(&self) -> String {
        let response = self
            .post_json("/api/login", serde_json::json!({ "password": TEST_PASSWORD }))
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        json["sessionId"]
            .as_str()
            .expect("login must return sessionId")
            .to_string()
    }

    /// Current collection via the public listing endpoint.
    pub async fn list(&self) -> Vec<serde_json::Value> {
        let response = self.get("/api/navigation").await;
        assert_eq!(response.status(), StatusCode::OK);
        body_json(response)
            .await
            .as_array()
            .expect("navigation list must be an array")
            .clone()
    }
}

/// Build a request, optionally carrying a session header and a JSON body.
pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(SESSION_HEADER, token);
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .expect("valid request"),
        None => builder.body(Body::empty()).expect("valid request"),
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
