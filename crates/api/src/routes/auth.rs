//! Route definitions for administrator authentication.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// POST /login       -> login
/// POST /logout      -> logout
/// GET  /check-auth  -> check_auth
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/check-auth", get(auth::check_auth))
}
