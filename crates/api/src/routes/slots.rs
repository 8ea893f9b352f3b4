use axum::routing::get;
use axum::Router;

use crate::handlers::slots;
use crate::state::AppState;

/// Routes mounted at `/slots`.
///
/// ```text
/// GET /   -> list
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(slots::list))
}
