//! Route definitions for the navigation and category resources.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::navigation;
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// GET    /navigation       -> list_navigation
/// POST   /navigation       -> create_navigation (session required)
/// PUT    /navigation/{id}  -> update_navigation (session required)
/// DELETE /navigation/{id}  -> delete_navigation (session required)
/// GET    /categories       -> list_categories
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/navigation",
            get(navigation::list_navigation).post(navigation::create_navigation),
        )
        .route(
            "/navigation/{id}",
            put(navigation::update_navigation).delete(navigation::delete_navigation),
        )
        .route("/categories", get(navigation::list_categories))
}
