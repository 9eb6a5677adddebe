//! Handlers for the `/navigation` and `/categories` resources.
//!
//! Listing is public. Create, update and delete require a live admin
//! session via [`RequireSession`].

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use navdir_core::entry::{EntryFields, NavigationEntry};
use navdir_core::types::DbId;

use crate::error::AppResult;
use crate::handlers::auth::SuccessResponse;
use crate::middleware::session::RequireSession;
use crate::state::AppState;

/// GET /api/navigation
///
/// Full collection in stored order. An unreadable collection is served as
/// an empty list.
pub async fn list_navigation(State(state): State<AppState>) -> Json<Vec<NavigationEntry>> {
    Json(state.store.list().await)
}

/// GET /api/categories
///
/// Distinct category names across the collection.
pub async fn list_categories(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.store.categories().await)
}

/// POST /api/navigation
///
/// Append a new entry. Returns 201 with the stored entry, including its
/// assigned id.
pub async fn create_navigation(
    _session: RequireSession,
    State(state): State<AppState>,
    payload: Result<Json<EntryFields>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(input) = payload?;
    let entry = state.store.create(input).await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/navigation/{id}
///
/// Merge the supplied fields onto an existing entry.
pub async fn update_navigation(
    _session: RequireSession,
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
    payload: Result<Json<EntryFields>, JsonRejection>,
) -> AppResult<Json<NavigationEntry>> {
    let Path(id) = id?;
    let Json(input) = payload?;
    let entry = state.store.update(id, input).await?;

    Ok(Json(entry))
}

/// DELETE /api/navigation/{id}
///
/// Remove an entry.
pub async fn delete_navigation(
    _session: RequireSession,
    State(state): State<AppState>,
    id: Result<Path<DbId>, PathRejection>,
) -> AppResult<Json<SuccessResponse>> {
    let Path(id) = id?;
    state.store.delete(id).await?;

    Ok(Json(SuccessResponse { success: true }))
}
