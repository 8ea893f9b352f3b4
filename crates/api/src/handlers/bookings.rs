//! Booking, rescheduling and cancellation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use studio_core::booking::{RescheduleTarget, SlotSelection};
use studio_core::types::DbId;
use studio_db::models::booking::{Booking, BookingOutcome, RescheduleOutcome, UpcomingBooking};
use studio_db::repositories::BookingRepo;

use super::validate;
use crate::error::AppResult;
use crate::middleware::rbac::{RequireAuth, RequireClient};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/bookings
pub async fn create(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<SlotSelection>,
) -> AppResult<(StatusCode, Json<DataResponse<BookingOutcome>>)> {
    validate(&input)?;
    let outcome = state.engine().create_booking(user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}

/// GET /api/v1/bookings/upcoming
pub async fn list_upcoming(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UpcomingBooking>>>> {
    let bookings = BookingRepo::list_upcoming_for_client(&state.pool, user.user_id, Utc::now()).await?;
    Ok(Json(DataResponse { data: bookings }))
}

/// POST /api/v1/bookings/{id}/reschedule
pub async fn reschedule(
    RequireAuth(actor): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<RescheduleTarget>,
) -> AppResult<Json<DataResponse<RescheduleOutcome>>> {
    validate(&input)?;
    let outcome = state.engine().reschedule_booking(actor, id, &input).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// POST /api/v1/bookings/{id}/cancel
pub async fn cancel(
    RequireAuth(actor): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Booking>>> {
    let booking = state.engine().cancel_booking(actor, id).await?;
    Ok(Json(DataResponse { data: booking }))
}
