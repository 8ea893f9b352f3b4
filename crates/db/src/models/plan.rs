//! Mat and reformer plans. Both tables share one row shape.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::subscription::{PlanKind, PlanTerms};
use studio_core::types::{DbId, Timestamp};

/// A row from `plans_mat` or `plans_reformer`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plan {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    /// `None` means unlimited classes.
    pub session_count: Option<i32>,
    pub validity_days: Option<i32>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Plan {
    pub fn terms(&self, kind: PlanKind) -> PlanTerms {
        PlanTerms {
            id: self.id,
            kind,
            price: self.price,
            session_count: self.session_count,
            validity_days: self.validity_days,
        }
    }
}

/// Both product lines, as shown on the pricing page.
#[derive(Debug, Clone, Serialize)]
pub struct PlanCatalog {
    pub mat: Vec<Plan>,
    pub reformer: Vec<Plan>,
}

#[derive(Debug, Clone)]
pub struct CreatePlan {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub session_count: Option<i32>,
    pub validity_days: Option<i32>,
}
