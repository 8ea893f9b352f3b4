//! Session calendar and instructor routes.

use axum::routing::get;
use axum::Router;

use crate::handlers::{profile, sessions};
use crate::state::AppState;

/// Routes mounted at `/instructor`.
///
/// ```text
/// GET   /sessions   -> list_own (instructor)
/// GET   /me         -> get_instructor (instructor)
/// PATCH /me         -> update_instructor (instructor)
/// ```
pub fn instructor_router() -> Router<AppState> {
    Router::new()
        .route("/sessions", get(sessions::list_own))
        .route(
            "/me",
            get(profile::get_instructor).patch(profile::update_instructor),
        )
}

/// Routes mounted at `/sessions`.
///
/// ```text
/// GET /{id}/clients   -> list_attendees (session instructor, admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}/clients", get(sessions::list_attendees))
}

/// Routes mounted at `/admin`.
///
/// ```text
/// GET /sessions   -> list_studio (admin)
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new().route("/sessions", get(sessions::list_studio))
}
