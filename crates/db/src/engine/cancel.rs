//! Cancelling a confirmed booking.

use studio_core::error::CoreError;
use studio_core::roles::Actor;
use studio_core::types::DbId;

use crate::engine::{not_found, BookingEngine};
use crate::error::EngineResult;
use crate::models::booking::Booking;
use crate::models::status::BookingStatus;
use crate::repositories::{BookingRepo, SessionRepo, SubscriptionRepo};

impl BookingEngine<'_> {
    /// Cancel a booking before its session starts and free its spot.
    ///
    /// The session row is kept since the cancelled booking still references
    /// it. The class is returned to the subscription only when the policy
    /// says so.
    pub async fn cancel_booking(&self, actor: Actor, booking_id: DbId) -> EngineResult<Booking> {
        let now = self.now();
        let mut tx = self.pool.begin().await?;

        let booking = BookingRepo::lock_by_id(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| not_found("booking", booking_id))?;
        actor.authorize_cancel(booking.client_id)?;
        if booking.status_id != BookingStatus::Confirmed.id() {
            return Err(CoreError::Conflict(format!(
                "Booking {booking_id} is not confirmed"
            ))
            .into());
        }

        let session = SessionRepo::find_by_id(&mut *tx, booking.session_id)
            .await?
            .ok_or_else(|| not_found("session", booking.session_id))?;
        if session.start_time <= now {
            return Err(CoreError::Validation(format!(
                "Session {} has already started",
                session.id
            ))
            .into());
        }

        // Subscription before session, the same order booking takes its locks.
        let mut refunded = false;
        if self.policy.refund_on_cancel {
            if let Some(subscription_id) = booking.client_subscription_id {
                refunded = SubscriptionRepo::restore_class(&mut *tx, subscription_id).await?;
            }
        }

        let cancelled = BookingRepo::set_status(&mut *tx, booking_id, BookingStatus::Cancelled).await?;
        SessionRepo::release_spot(&mut *tx, session.id).await?;

        tx.commit().await?;

        tracing::info!(booking_id, session_id = session.id, refunded, "Booking cancelled");
        Ok(cancelled)
    }
}
