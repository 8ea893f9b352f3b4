//! Booking a slot.

use studio_core::availability::SlotRequest;
use studio_core::booking::{ensure_can_book, ensure_future, SlotSelection};
use studio_core::error::CoreError;
use studio_core::types::DbId;

use crate::engine::lock::lock_days;
use crate::engine::materializer::materialize;
use crate::engine::{not_found, BookingEngine};
use crate::error::EngineResult;
use crate::models::booking::BookingOutcome;
use crate::repositories::{
    BookingRepo, ClassTypeRepo, InstructorRepo, SessionRepo, SubscriptionRepo,
};

impl BookingEngine<'_> {
    /// Book `selection` for `client_id`, creating its session if the slot is empty.
    ///
    /// All checks and writes share one transaction. On any error nothing is
    /// persisted: no session, no booking, no counter change.
    pub async fn create_booking(
        &self,
        client_id: DbId,
        selection: &SlotSelection,
    ) -> EngineResult<BookingOutcome> {
        let now = self.now();
        let mut tx = self.pool.begin().await?;

        // Held until commit: concurrent bookings by the same client queue here.
        let subscription =
            SubscriptionRepo::lock_current(&mut *tx, client_id, self.today(now)).await?;
        let subscription =
            ensure_can_book(client_id, subscription.map(|s| s.snapshot()).as_ref())?;

        let (_, start) = selection.slot().resolve(self.policy.timezone)?;
        ensure_future(start, now)?;

        let class_type = ClassTypeRepo::find_by_id(&mut *tx, selection.class_type_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| not_found("class_type", selection.class_type_id))?;
        InstructorRepo::find_by_id(&mut *tx, selection.instructor_id)
            .await?
            .filter(|i| i.is_active)
            .ok_or_else(|| not_found("instructor", selection.instructor_id))?;

        let request = SlotRequest {
            class_type_id: class_type.id,
            instructor_id: selection.instructor_id,
            duration: class_type.duration(),
            exclude_session_id: None,
        };
        let end = start + request.duration;

        // The overlap check runs under the day lock, which reschedules also hold.
        lock_days(&mut tx, &[selection.date]).await?;
        let booked = BookingRepo::confirmed_intervals(&mut *tx, client_id, start, end).await?;
        if !booked.is_empty() {
            return Err(CoreError::DuplicateBooking {
                client_id,
                start_time: start,
            }
            .into());
        }

        let placement = materialize(
            &mut tx,
            self.policy,
            &request,
            start,
            selection.expected_session_id,
            &booked,
        )
        .await?;
        let session_id = placement.session.id;

        let spots_left = SessionRepo::take_spot(&mut *tx, session_id)
            .await?
            .ok_or(CoreError::SessionFull { session_id })?;

        let booking =
            BookingRepo::insert_confirmed(&mut *tx, client_id, session_id, subscription.id).await?;

        if subscription.classes_remaining.is_some()
            && !SubscriptionRepo::use_class(&mut *tx, subscription.id).await?
        {
            return Err(CoreError::NoClassesRemaining {
                subscription_id: subscription.id,
            }
            .into());
        }

        tx.commit().await?;

        tracing::info!(
            booking_id = booking.id,
            client_id,
            session_id,
            spots_left,
            session_created = placement.created,
            "Booking created"
        );
        Ok(BookingOutcome {
            booking,
            session_created: placement.created,
        })
    }
}
