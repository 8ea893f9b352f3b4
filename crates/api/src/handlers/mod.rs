//! Request handlers, one submodule per resource.
//!
//! Reads go straight to the repositories in `studio_db`; writes go through
//! the [`BookingEngine`](studio_db::engine::BookingEngine) so each runs in a
//! single transaction. Errors map to HTTP via [`AppError`].

pub mod bookings;
pub mod catalog;
pub mod profile;
pub mod sessions;
pub mod slots;
pub mod subscriptions;

use validator::Validate;

use crate::error::{AppError, AppResult};

/// Run `validator` rules on a request body or query.
fn validate<T: Validate>(input: &T) -> AppResult<()> {
    input.validate().map_err(AppError::from)
}
