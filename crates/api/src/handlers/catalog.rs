//! Public catalog: class types, instructors and plans.

use axum::extract::State;
use axum::Json;
use studio_db::models::class_type::ClassType;
use studio_db::models::instructor::Instructor;
use studio_db::models::plan::PlanCatalog;
use studio_db::repositories::{ClassTypeRepo, InstructorRepo, PlanRepo};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/class-types
pub async fn list_class_types(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ClassType>>>> {
    let class_types = ClassTypeRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: class_types }))
}

/// GET /api/v1/instructors
pub async fn list_instructors(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Instructor>>>> {
    let instructors = InstructorRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: instructors }))
}

/// GET /api/v1/plans
pub async fn list_plans(State(state): State<AppState>) -> AppResult<Json<DataResponse<PlanCatalog>>> {
    let catalog = PlanRepo::catalog(&state.pool).await?;
    Ok(Json(DataResponse { data: catalog }))
}
