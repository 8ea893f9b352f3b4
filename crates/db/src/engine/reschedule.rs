//! Moving a confirmed booking to another slot.

use studio_core::availability::SlotRequest;
use studio_core::booking::{ensure_reschedule_window, RescheduleTarget};
use studio_core::error::CoreError;
use studio_core::roles::Actor;
use studio_core::slots::local_date;
use studio_core::types::DbId;

use crate::engine::lock::lock_days;
use crate::engine::materializer::materialize;
use crate::engine::{not_found, BookingEngine};
use crate::error::EngineResult;
use crate::models::booking::RescheduleOutcome;
use crate::models::status::BookingStatus;
use crate::repositories::{BookingRepo, ClassTypeRepo, SessionRepo};

impl BookingEngine<'_> {
    /// Move a booking to `target`, keeping its class type and instructor.
    ///
    /// Only bookings whose session has not started can move. The vacated
    /// session gets its spot back and is deleted once no booking references
    /// it. The subscription counter is not touched.
    pub async fn reschedule_booking(
        &self,
        actor: Actor,
        booking_id: DbId,
        target: &RescheduleTarget,
    ) -> EngineResult<RescheduleOutcome> {
        let now = self.now();
        let tz = self.policy.timezone;
        let mut tx = self.pool.begin().await?;

        let booking = BookingRepo::lock_by_id(&mut *tx, booking_id)
            .await?
            .ok_or_else(|| not_found("booking", booking_id))?;
        if booking.status_id != BookingStatus::Confirmed.id() {
            return Err(CoreError::Conflict(format!(
                "Booking {booking_id} is not confirmed"
            ))
            .into());
        }
        let current = SessionRepo::find_by_id(&mut *tx, booking.session_id)
            .await?
            .ok_or_else(|| not_found("session", booking.session_id))?;
        actor.authorize_reschedule(booking.client_id, current.instructor_id)?;
        if current.start_time <= now {
            return Err(CoreError::Validation(format!(
                "Session {} has already started",
                current.id
            ))
            .into());
        }

        let (_, start) = target.slot().resolve(tz)?;
        ensure_reschedule_window(actor, start, now, self.policy.reschedule_notice_hours)?;

        let class_type = ClassTypeRepo::find_by_id(&mut *tx, current.class_type_id)
            .await?
            .ok_or_else(|| not_found("class_type", current.class_type_id))?;
        let request = SlotRequest {
            class_type_id: current.class_type_id,
            instructor_id: current.instructor_id,
            duration: class_type.duration(),
            exclude_session_id: Some(current.id),
        };
        let end = start + request.duration;

        lock_days(&mut tx, &[local_date(current.start_time, tz), target.date]).await?;

        let booked =
            BookingRepo::confirmed_intervals(&mut *tx, booking.client_id, start, end).await?;
        if booked.iter().any(|b| b.session_id != current.id) {
            return Err(CoreError::DuplicateBooking {
                client_id: booking.client_id,
                start_time: start,
            }
            .into());
        }

        let placement = materialize(
            &mut tx,
            self.policy,
            &request,
            start,
            target.expected_session_id,
            &booked,
        )
        .await?;
        let target_id = placement.session.id;

        if target_id == current.id {
            tx.commit().await?;
            tracing::debug!(booking_id, session_id = target_id, "Reschedule onto same session");
            return Ok(RescheduleOutcome {
                booking,
                unchanged: true,
                session_created: false,
                vacated_session_deleted: false,
            });
        }

        SessionRepo::take_spot(&mut *tx, target_id)
            .await?
            .ok_or(CoreError::SessionFull {
                session_id: target_id,
            })?;
        let moved = BookingRepo::move_to_session(&mut *tx, booking_id, target_id).await?;

        SessionRepo::release_spot(&mut *tx, current.id).await?;
        let vacated_session_deleted =
            SessionRepo::delete_if_unreferenced(&mut *tx, current.id).await?;

        tx.commit().await?;

        tracing::info!(
            booking_id,
            from_session_id = current.id,
            to_session_id = target_id,
            session_created = placement.created,
            vacated_session_deleted,
            "Booking rescheduled"
        );
        Ok(RescheduleOutcome {
            booking: moved,
            unchanged: false,
            session_created: placement.created,
            vacated_session_deleted,
        })
    }
}
