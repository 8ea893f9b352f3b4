//! The booking engine.
//!
//! Every write (booking, rescheduling, cancellation, plan purchase) runs as
//! one Postgres transaction. Slot availability is re-resolved inside that
//! transaction while the affected studio days are locked, so a slot the
//! client saw as `OPEN` a moment ago is never trusted blindly.

mod cancel;
mod lock;
mod materializer;
mod purchase;
mod reschedule;
mod resolver;
mod writer;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;
use studio_core::error::CoreError;
use studio_core::policy::BookingPolicy;
use studio_core::slots::local_date;
use studio_core::types::{DbId, Timestamp};

/// Entry point for booking operations, borrowing the pool and policy from the caller.
#[derive(Debug, Clone, Copy)]
pub struct BookingEngine<'a> {
    pool: &'a PgPool,
    policy: &'a BookingPolicy,
}

impl<'a> BookingEngine<'a> {
    pub fn new(pool: &'a PgPool, policy: &'a BookingPolicy) -> Self {
        Self { pool, policy }
    }

    pub fn policy(&self) -> &BookingPolicy {
        self.policy
    }

    fn now(&self) -> Timestamp {
        Utc::now()
    }

    /// Studio-local date of `now`.
    fn today(&self, now: Timestamp) -> NaiveDate {
        local_date(now, self.policy.timezone)
    }
}

fn not_found(entity: &'static str, id: DbId) -> CoreError {
    CoreError::NotFound { entity, id }
}
