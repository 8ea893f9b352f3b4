use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;
use studio_core::booking::SubscriptionSnapshot;
use studio_core::types::{DbId, Timestamp};

use crate::models::status::StatusId;

/// A row from the `client_subscriptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientSubscription {
    pub id: DbId,
    pub client_id: DbId,
    pub plan_mat_id: Option<DbId>,
    pub plan_reformer_id: Option<DbId>,
    pub sessions_total: Option<i32>,
    /// `None` means unlimited.
    pub classes_remaining: Option<i32>,
    pub price_paid: f64,
    pub is_active: bool,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub payment_status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ClientSubscription {
    pub fn snapshot(&self) -> SubscriptionSnapshot {
        SubscriptionSnapshot {
            id: self.id,
            classes_remaining: self.classes_remaining,
        }
    }
}
