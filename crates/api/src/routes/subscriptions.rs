use axum::routing::{get, post};
use axum::Router;

use crate::handlers::subscriptions;
use crate::state::AppState;

/// Routes mounted at `/subscriptions`.
///
/// ```text
/// POST /         -> purchase (client)
/// GET  /active   -> get_active (client)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(subscriptions::purchase))
        .route("/active", get(subscriptions::get_active))
}
