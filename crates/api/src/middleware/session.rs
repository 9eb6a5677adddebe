//! Session gate for mutating navigation routes.
//!
//! The session token travels in the `X-Session-Id` header. An
//! `Authorization: Bearer <token>` header is accepted as a fallback. Query
//! strings and bodies are never consulted.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use navdir_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Header carrying the session token returned by login.
pub const SESSION_HEADER: &str = "x-session-id";

/// Extract the session token from request headers, if any.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let from_session_header = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty());

    from_session_header.or_else(|| {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
    })
}

/// Proof that the request carries a live administrator session.
///
/// Put it first in a handler's argument list so the request is rejected
/// before the body is read or any state is touched:
///
/// ```ignore
/// async fn create(_session: RequireSession, State(state): State<AppState>) -> AppResult<()> {
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireSession {
    pub token: String,
}

impl FromRequestParts<AppState> for RequireSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(&parts.headers).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Login required".into()))
        })?;

        if !state.sessions.validate(token).await {
            tracing::debug!("Rejected request with invalid or expired session");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Session is invalid or has expired, please log in again".into(),
            )));
        }

        Ok(RequireSession {
            token: token.to_string(),
        })
    }
}
