//! Route definitions for the `/bookings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// POST /                   -> create (client)
/// GET  /upcoming           -> list_upcoming (client)
/// POST /{id}/reschedule    -> reschedule (booking owner, session instructor, admin)
/// POST /{id}/cancel        -> cancel (booking owner, admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bookings::create))
        .route("/upcoming", get(bookings::list_upcoming))
        .route("/{id}/reschedule", post(bookings::reschedule))
        .route("/{id}/cancel", post(bookings::cancel))
}
