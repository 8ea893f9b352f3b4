//! The caller's own profile, for clients and instructors.

use axum::extract::State;
use axum::Json;
use studio_core::error::CoreError;
use studio_core::profile::{ClientProfileUpdate, InstructorProfileUpdate};
use studio_db::models::client::Client;
use studio_db::models::instructor::Instructor;
use studio_db::repositories::{ClientRepo, InstructorRepo};

use super::validate;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireClient, RequireInstructor};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me
///
/// 404 until the client buys a plan or saves a profile.
pub async fn get_client(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Client>>> {
    let client = ClientRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "client",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse { data: client }))
}

/// PATCH /api/v1/me
pub async fn update_client(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<ClientProfileUpdate>,
) -> AppResult<Json<DataResponse<Client>>> {
    validate(&input)?;
    let client = ClientRepo::upsert_profile(&state.pool, user.user_id, &input).await?;
    tracing::info!(client_id = client.id, "Client profile saved");
    Ok(Json(DataResponse { data: client }))
}

/// GET /api/v1/instructor/me
pub async fn get_instructor(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Instructor>>> {
    let instructor = InstructorRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "instructor",
            id: user.user_id,
        }))?;
    Ok(Json(DataResponse { data: instructor }))
}

/// PATCH /api/v1/instructor/me
pub async fn update_instructor(
    RequireInstructor(user): RequireInstructor,
    State(state): State<AppState>,
    Json(input): Json<InstructorProfileUpdate>,
) -> AppResult<Json<DataResponse<Instructor>>> {
    validate(&input)?;
    let instructor = InstructorRepo::update(&state.pool, user.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "instructor",
            id: user.user_id,
        }))?;
    tracing::info!(instructor_id = instructor.id, "Instructor profile saved");
    Ok(Json(DataResponse { data: instructor }))
}
