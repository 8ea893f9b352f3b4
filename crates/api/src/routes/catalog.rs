//! Public catalog routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at the `/api/v1` root.
///
/// ```text
/// GET /class-types   -> list_class_types
/// GET /instructors   -> list_instructors
/// GET /plans         -> list_plans
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/class-types", get(catalog::list_class_types))
        .route("/instructors", get(catalog::list_instructors))
        .route("/plans", get(catalog::list_plans))
}
