//! Read-only slot resolution for a whole day.

use studio_core::availability::{resolve_day, SessionSnapshot, SlotAvailability, SlotRequest};
use studio_core::booking::SlotQuery;
use studio_core::slots::slot_start;
use studio_core::types::DbId;

use crate::engine::{not_found, BookingEngine};
use crate::error::EngineResult;
use crate::models::class_session::ClassSession;
use crate::repositories::{BookingRepo, ClassTypeRepo, InstructorRepo, SessionRepo};

impl BookingEngine<'_> {
    /// Classify every slot of `query.template` on `query.date`.
    ///
    /// When `client_id` is given, that client's confirmed bookings block the
    /// slots they overlap. The result is advisory; writes re-resolve.
    pub async fn resolve_slots(
        &self,
        query: &SlotQuery,
        client_id: Option<DbId>,
    ) -> EngineResult<Vec<SlotAvailability>> {
        let class_type = ClassTypeRepo::find_by_id(self.pool, query.class_type_id)
            .await?
            .filter(|c| c.is_active)
            .ok_or_else(|| not_found("class_type", query.class_type_id))?;
        InstructorRepo::find_by_id(self.pool, query.instructor_id)
            .await?
            .filter(|i| i.is_active)
            .ok_or_else(|| not_found("instructor", query.instructor_id))?;

        let request = SlotRequest {
            class_type_id: class_type.id,
            instructor_id: query.instructor_id,
            duration: class_type.duration(),
            exclude_session_id: query.exclude_session_id,
        };

        // Local times that fall in a DST gap simply do not exist that day.
        let slots: Vec<_> = query
            .template
            .times()
            .into_iter()
            .filter_map(|t| {
                slot_start(query.date, t, self.policy.timezone)
                    .ok()
                    .map(|start| (t, start))
            })
            .collect();
        let (Some(&(_, first)), Some(&(_, last))) = (slots.first(), slots.last()) else {
            return Ok(Vec::new());
        };
        let window_end = last + request.duration;

        let sessions: Vec<SessionSnapshot> =
            SessionRepo::list_overlapping(self.pool, first, window_end)
                .await?
                .iter()
                .map(ClassSession::snapshot)
                .collect();
        let booked = match client_id {
            Some(id) => BookingRepo::confirmed_intervals(self.pool, id, first, window_end).await?,
            None => Vec::new(),
        };

        Ok(resolve_day(&request, &slots, &sessions, &booked))
    }
}
