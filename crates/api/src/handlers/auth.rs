//! Handlers for administrator login, logout and session checks.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::auth::password::verify_admin_password;
use crate::error::AppResult;
use crate::middleware::session::session_token;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Response body for `POST /api/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub message: String,
}

/// Response body for `GET /api/check-auth`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAuthResponse {
    pub logged_in: bool,
}

/// Bare `{ "success": true }` acknowledgement.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/login
///
/// Compare the submitted password with the administrator secret. On a match
/// a new session is created and its token returned as `sessionId`.
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(input) = payload?;

    if !verify_admin_password(&input.password, &state.config.admin_password) {
        tracing::warn!("Rejected admin login with wrong password");
        let body = LoginResponse {
            success: false,
            session_id: None,
            message: "Incorrect password".into(),
        };
        return Ok((StatusCode::UNAUTHORIZED, Json(body)).into_response());
    }

    let token = state.sessions.create().await;
    tracing::info!("Admin logged in");

    Ok(Json(LoginResponse {
        success: true,
        session_id: Some(token),
        message: "Login successful".into(),
    })
    .into_response())
}

/// POST /api/logout
///
/// Destroy the session named by the token header. Succeeds whether or not a
/// session existed.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Json<SuccessResponse> {
    if let Some(token) = session_token(&headers) {
        state.sessions.destroy(token).await;
        tracing::info!("Admin logged out");
    }
    Json(SuccessResponse { success: true })
}

/// GET /api/check-auth
///
/// Report whether the caller's token names a live session.
pub async fn check_auth(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<CheckAuthResponse> {
    let logged_in = match session_token(&headers) {
        Some(token) => state.sessions.validate(token).await,
        None => false,
    };
    Json(CheckAuthResponse { logged_in })
}
