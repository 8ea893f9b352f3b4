//! Client profile routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::profile;
use crate::state::AppState;

/// Routes mounted at `/me`.
///
/// ```text
/// GET   /   -> get_client (client)
/// PATCH /   -> update_client (client)
/// ```
pub fn client_router() -> Router<AppState> {
    Router::new().route("/", get(profile::get_client).patch(profile::update_client))
}
