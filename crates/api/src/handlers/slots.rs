//! Slot availability for the booking calendar.

use axum::extract::{Query, State};
use axum::Json;
use studio_core::availability::SlotAvailability;
use studio_core::booking::SlotQuery;
use studio_core::roles::Actor;

use super::validate;
use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/slots?date&class_type_id&instructor_id&template&exclude_session_id
///
/// When the caller is a client, slots overlapping their own confirmed
/// bookings come back `BLOCKED`.
pub async fn list(
    RequireAuth(actor): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<SlotQuery>,
) -> AppResult<Json<DataResponse<Vec<SlotAvailability>>>> {
    validate(&query)?;
    let client_id = match actor {
        Actor::Client(id) => Some(id),
        Actor::Instructor(_) | Actor::Admin(_) => None,
    };
    let slots = state.engine().resolve_slots(&query, client_id).await?;
    Ok(Json(DataResponse { data: slots }))
}
