//! Turning a resolved slot into a concrete session row.

use sqlx::PgConnection;
use studio_core::availability::{resolve_slot, BookedInterval, SessionSnapshot, SlotRequest, SlotState};
use studio_core::error::CoreError;
use studio_core::policy::BookingPolicy;
use studio_core::types::{DbId, Timestamp};

use crate::error::EngineResult;
use crate::models::class_session::{ClassSession, NewClassSession};
use crate::repositories::SessionRepo;

/// The session a slot was pinned to.
#[derive(Debug)]
pub(crate) struct Placement {
    pub session: ClassSession,
    pub created: bool,
}

/// Resolve the slot at `start` and return its session, creating one for an
/// empty slot.
///
/// Must run inside a transaction holding the day lock for `start`.
/// `expected_session_id` is the session the caller saw; if the slot now
/// resolves elsewhere the request is stale.
pub(crate) async fn materialize(
    conn: &mut PgConnection,
    policy: &BookingPolicy,
    request: &SlotRequest,
    start: Timestamp,
    expected_session_id: Option<DbId>,
    booked: &[BookedInterval],
) -> EngineResult<Placement> {
    let end = start + request.duration;

    // A lost insert race (unique instructor/start) is retried once against
    // the row that won.
    for _ in 0..2 {
        let sessions = SessionRepo::list_overlapping(&mut *conn, start, end).await?;
        let snapshots: Vec<SessionSnapshot> = sessions.iter().map(ClassSession::snapshot).collect();
        let resolution = resolve_slot(request, start, &snapshots, booked);
        let resolved_id = resolution.session.map(|s| s.id);

        if expected_session_id.is_some() && expected_session_id != resolved_id {
            return Err(CoreError::StaleSlot(format!(
                "expected session {:?}, slot now holds {:?}",
                expected_session_id, resolved_id
            ))
            .into());
        }

        match resolution.state {
            SlotState::Blocked => {
                return Err(CoreError::StaleSlot(format!("slot at {start} is blocked")).into())
            }
            SlotState::Full => {
                return Err(CoreError::SessionFull {
                    session_id: resolved_id.unwrap_or_default(),
                }
                .into())
            }
            SlotState::Open => {
                let session = sessions
                    .into_iter()
                    .find(|s| Some(s.id) == resolved_id)
                    .ok_or_else(|| CoreError::Internal("resolved session vanished".into()))?;
                return Ok(Placement {
                    session,
                    created: false,
                });
            }
            SlotState::New => {
                let input = NewClassSession {
                    class_type_id: request.class_type_id,
                    instructor_id: request.instructor_id,
                    start_time: start,
                    end_time: end,
                    capacity: policy.session_capacity,
                };
                if let Some(session) = SessionRepo::insert_if_absent(&mut *conn, &input).await? {
                    tracing::info!(
                        session_id = session.id,
                        instructor_id = session.instructor_id,
                        start_time = %session.start_time,
                        "Session materialized"
                    );
                    return Ok(Placement {
                        session,
                        created: true,
                    });
                }
                tracing::warn!(%start, "Session insert conflicted, re-resolving slot");
            }
        }
    }

    Err(CoreError::StaleSlot(format!("slot at {start} could not be materialized")).into())
}
