//! Plan purchase rules.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

/// Studio plans come in two product lines, each in its own table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanKind {
    Mat,
    Reformer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Card,
    Cash,
}

/// Payment state recorded at purchase time.
///
/// Card payments are settled by an external processor, so they start pending.
/// Cash is taken at the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialPayment {
    Pending,
    Paid,
}

impl From<PaymentMethod> for InitialPayment {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::Card => InitialPayment::Pending,
            PaymentMethod::Cash => InitialPayment::Paid,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PurchasePlan {
    pub plan_kind: PlanKind,
    #[validate(range(min = 1))]
    pub plan_id: DbId,
    pub payment_method: PaymentMethod,
}

/// The plan fields a purchase copies into the subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanTerms {
    pub id: DbId,
    pub kind: PlanKind,
    pub price: f64,
    /// `None` means unlimited.
    pub session_count: Option<i32>,
    pub validity_days: Option<i32>,
}

/// A subscription ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionDraft {
    pub plan_mat_id: Option<DbId>,
    pub plan_reformer_id: Option<DbId>,
    pub sessions_total: Option<i32>,
    pub classes_remaining: Option<i32>,
    pub price_paid: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub payment: InitialPayment,
}

pub fn draft_subscription(
    terms: &PlanTerms,
    method: PaymentMethod,
    today: NaiveDate,
) -> Result<SubscriptionDraft, CoreError> {
    if terms.session_count.is_some_and(|n| n <= 0) {
        return Err(CoreError::Validation(format!(
            "Plan {} has no sessions to sell",
            terms.id
        )));
    }
    let end_date = match terms.validity_days {
        Some(days) if days <= 0 => {
            return Err(CoreError::Validation(format!(
                "Plan {} has an invalid validity of {days} days",
                terms.id
            )))
        }
        Some(days) => Some(
            today
                .checked_add_signed(TimeDelta::days(i64::from(days)))
                .ok_or_else(|| CoreError::Validation("Plan end date out of range".into()))?,
        ),
        None => None,
    };
    let (plan_mat_id, plan_reformer_id) = match terms.kind {
        PlanKind::Mat => (Some(terms.id), None),
        PlanKind::Reformer => (None, Some(terms.id)),
    };

    Ok(SubscriptionDraft {
        plan_mat_id,
        plan_reformer_id,
        sessions_total: terms.session_count,
        classes_remaining: terms.session_count,
        price_paid: terms.price,
        start_date: today,
        end_date,
        payment: method.into(),
    })
}
