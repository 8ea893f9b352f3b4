//! Session calendars for instructors and the studio admin.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use studio_core::error::CoreError;
use studio_core::slots::day_bounds;
use studio_core::types::{DbId, Timestamp};
use studio_db::models::booking::SessionAttendee;
use studio_db::models::class_session::{InstructorSessionSummary, StudioSessionSummary};
use studio_db::repositories::{BookingRepo, SessionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireInstructor};
use crate::response::DataResponse;
use crate::state::AppState;

/// Studio-local date range, both ends inclusive.
#[derive(Debug, Deserialize)]
pub struct SessionRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default)]
    pub booked_only: bool,
}

/// Studio-local date range for the admin calendar, both ends inclusive.
#[derive(Debug, Deserialize)]
pub struct StudioRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Instants covering the studio days `start..=end`.
fn range_bounds(
    state: &AppState,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<(Timestamp, Timestamp)> {
    if end < start {
        return Err(AppError::BadRequest(format!(
            "end ({end}) must not be before start ({start})"
        )));
    }
    let tz = state.config.policy.timezone;
    let (from, _) = day_bounds(start, tz)?;
    let (_, until) = day_bounds(end, tz)?;
    Ok((from, until))
}

/// GET /api/v1/instructor/sessions?start&end&booked_only
pub async fn list_own(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Query(query): Query<SessionRangeQuery>,
) -> AppResult<Json<DataResponse<Vec<InstructorSessionSummary>>>> {
    let (from, until) = range_bounds(&state, query.start, query.end)?;
    let sessions =
        SessionRepo::list_for_instructor(&state.pool, user.user_id, from, until, query.booked_only)
            .await?;
    Ok(Json(DataResponse { data: sessions }))
}

/// GET /api/v1/sessions/{id}/clients
pub async fn list_attendees(
    RequireAuth(actor): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<SessionAttendee>>>> {
    let session = SessionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "session",
            id,
        }))?;
    actor.authorize_attendees(session.instructor_id)?;

    let attendees = BookingRepo::list_attendees(&state.pool, id).await?;
    Ok(Json(DataResponse { data: attendees }))
}

/// GET /api/v1/admin/sessions?start&end
pub async fn list_studio(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<StudioRangeQuery>,
) -> AppResult<Json<DataResponse<Vec<StudioSessionSummary>>>> {
    let (from, until) = range_bounds(&state, query.start, query.end)?;
    let sessions = SessionRepo::list_in_range(&state.pool, from, until).await?;
    Ok(Json(DataResponse { data: sessions }))
}
