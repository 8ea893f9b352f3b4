pub mod bookings;
pub mod catalog;
pub mod health;
pub mod profile;
pub mod sessions;
pub mod slots;
pub mod subscriptions;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /class-types                                     active class types (public)
/// /instructors                                     active instructors (public)
/// /plans                                           mat + reformer plans (public)
///
/// /slots                                           day availability (any role)
///
/// /bookings                                        book a slot (client)
/// /bookings/upcoming                               caller's upcoming bookings (client)
/// /bookings/{id}/reschedule                        move a booking
/// /bookings/{id}/cancel                            cancel a booking
///
/// /subscriptions                                   buy a plan (client)
/// /subscriptions/active                            caller's active subscription (client)
///
/// /me                                              own profile (client)
///
/// /instructor/sessions                             instructor's sessions (instructor)
/// /instructor/me                                   own profile (instructor)
/// /sessions/{id}/clients                           session attendees
///
/// /admin/sessions                                  studio calendar (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public catalog.
        .merge(catalog::router())
        // Availability.
        .nest("/slots", slots::router())
        // Booking writes and the client's agenda.
        .nest("/bookings", bookings::router())
        .nest("/subscriptions", subscriptions::router())
        .nest("/me", profile::client_router())
        // Instructor views.
        .nest("/instructor", sessions::instructor_router())
        .nest("/sessions", sessions::router())
        // Studio-wide views.
        .nest("/admin", sessions::admin_router())
}
