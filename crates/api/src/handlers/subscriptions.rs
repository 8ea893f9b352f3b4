//! The caller's subscriptions.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use studio_core::slots::local_date;
use studio_core::subscription::PurchasePlan;
use studio_db::models::subscription::ClientSubscription;
use studio_db::repositories::SubscriptionRepo;

use super::validate;
use crate::error::AppResult;
use crate::middleware::rbac::RequireClient;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/subscriptions/active
///
/// `data` is `null` when the client has nothing to book with.
pub async fn get_active(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Option<ClientSubscription>>>> {
    let today = local_date(Utc::now(), state.config.policy.timezone);
    let subscription = SubscriptionRepo::find_current(&state.pool, user.user_id, today).await?;
    Ok(Json(DataResponse { data: subscription }))
}

/// POST /api/v1/subscriptions
pub async fn purchase(
    RequireClient(user): RequireClient,
    State(state): State<AppState>,
    Json(input): Json<PurchasePlan>,
) -> AppResult<(StatusCode, Json<DataResponse<ClientSubscription>>)> {
    validate(&input)?;
    let subscription = state.engine().purchase_plan(user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: subscription })))
}
