pub mod auth;
pub mod health;
pub mod navigation;

use axum::http::{Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Json;
use axum::Router;
use serde_json::json;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login                 POST   login (public)
/// /logout                POST   logout (public, idempotent)
/// /check-auth            GET    session status (public)
///
/// /navigation            GET    list (public)
///                        POST   create (session required)
/// /navigation/{id}       PUT    update (session required)
///                        DELETE delete (session required)
/// /categories            GET    distinct categories (public)
/// ```
///
/// Unknown paths under `/api` answer with a JSON 404 rather than the
/// front-end fallback, and a known path hit with the wrong method gets a
/// JSON 405.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(navigation::router())
        .method_not_allowed_fallback(api_method_not_allowed)
        .fallback(api_not_found)
}

async fn api_not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": format!("No API route for {}", uri.path()),
            "code": "NOT_FOUND",
        })),
    )
}

async fn api_method_not_allowed(method: Method, uri: Uri) -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({
            "error": format!("{method} is not supported on {}", uri.path()),
            "code": "METHOD_NOT_ALLOWED",
        })),
    )
}
