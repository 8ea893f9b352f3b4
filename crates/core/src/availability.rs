//! Slot availability resolution.
//!
//! Given the sessions that exist on a day and the caller's own bookings,
//! classify every slot of a template as [`SlotState::New`], [`SlotState::Open`],
//! [`SlotState::Full`] or [`SlotState::Blocked`].
//!
//! Resolution is advisory. The booking engine re-runs [`resolve_slot`] inside
//! its write transaction before acting on a slot.

use chrono::{NaiveTime, TimeDelta};
use serde::Serialize;

use crate::slots::format_slot_time;
use crate::types::{DbId, Timestamp};

/// Availability of a single slot for a given instructor + class type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotState {
    /// No session occupies the slot; booking it creates one.
    New,
    /// A compatible session exists with free spots.
    Open,
    /// A compatible session exists with no free spots.
    Full,
    /// An incompatible session occupies the slot, the caller is already booked
    /// then, or the slot only partly overlaps the session being moved out of.
    Blocked,
}

/// The session fields the resolver needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: DbId,
    pub class_type_id: DbId,
    pub instructor_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub capacity: i32,
    pub spots_available: i32,
}

/// A confirmed booking held by the caller, reduced to its session's time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedInterval {
    pub session_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
}

/// What the caller wants to book.
#[derive(Debug, Clone, Copy)]
pub struct SlotRequest {
    pub class_type_id: DbId,
    pub instructor_id: DbId,
    /// Length of a session of this class type.
    pub duration: TimeDelta,
    /// Session being rescheduled away from. The caller's booking in it does
    /// not block other slots.
    pub exclude_session_id: Option<DbId>,
}

impl SlotRequest {
    fn is_compatible(&self, session: &SessionSnapshot) -> bool {
        session.instructor_id == self.instructor_id && session.class_type_id == self.class_type_id
    }

    fn is_excluded(&self, session_id: DbId) -> bool {
        self.exclude_session_id == Some(session_id)
    }

    /// Preference among several candidate sessions for the same slot:
    /// the excluded session, then compatible sessions, then anything else.
    fn rank(&self, session: &SessionSnapshot) -> u8 {
        if self.is_excluded(session.id) {
            0
        } else if self.is_compatible(session) {
            1
        } else {
            2
        }
    }
}

/// Outcome of resolving one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotResolution<'a> {
    pub state: SlotState,
    /// The session occupying the slot, if any.
    pub session: Option<&'a SessionSnapshot>,
}

/// One row of a resolved day, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotAvailability {
    /// Wall-clock label, `HH:MM`.
    pub time: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub state: SlotState,
    pub session_id: Option<DbId>,
    pub spots_available: Option<i32>,
}

fn overlaps(a_start: Timestamp, a_end: Timestamp, b_start: Timestamp, b_end: Timestamp) -> bool {
    a_start < b_end && b_start < a_end
}

/// Find the session occupying `[start, start + duration)`.
///
/// An exact start-time match always wins over an overlap match.
pub fn find_session_for_slot<'a>(
    request: &SlotRequest,
    sessions: &'a [SessionSnapshot],
    start: Timestamp,
) -> Option<&'a SessionSnapshot> {
    let end = start + request.duration;

    let exact = sessions
        .iter()
        .filter(|s| s.start_time == start)
        .min_by_key(|s| request.rank(s));
    if exact.is_some() {
        return exact;
    }

    sessions
        .iter()
        .filter(|s| overlaps(start, end, s.start_time, s.end_time))
        .min_by_key(|s| request.rank(s))
}

/// Resolve the state of the slot beginning at `start`.
pub fn resolve_slot<'a>(
    request: &SlotRequest,
    start: Timestamp,
    sessions: &'a [SessionSnapshot],
    booked: &[BookedInterval],
) -> SlotResolution<'a> {
    let end = start + request.duration;
    let session = find_session_for_slot(request, sessions, start);

    // A booking's own session is a no-op target only at its exact start.
    // Any other slot it overlaps cannot be reached without leaving it first.
    if let Some(s) = session.filter(|s| request.is_excluded(s.id)) {
        let state = if s.start_time == start {
            SlotState::Open
        } else {
            SlotState::Blocked
        };
        return SlotResolution {
            state,
            session: Some(s),
        };
    }

    let already_booked = booked.iter().any(|b| {
        !request.is_excluded(b.session_id) && overlaps(start, end, b.start_time, b.end_time)
    });
    if already_booked {
        return SlotResolution {
            state: SlotState::Blocked,
            session,
        };
    }

    let state = match session {
        None => SlotState::New,
        Some(s) if !request.is_compatible(s) => SlotState::Blocked,
        Some(s) if s.spots_available > 0 => SlotState::Open,
        Some(_) => SlotState::Full,
    };
    SlotResolution { state, session }
}

/// Resolve every slot of a day. `slots` pairs each template time with its UTC start.
pub fn resolve_day(
    request: &SlotRequest,
    slots: &[(NaiveTime, Timestamp)],
    sessions: &[SessionSnapshot],
    booked: &[BookedInterval],
) -> Vec<SlotAvailability> {
    slots
        .iter()
        .map(|&(time, start)| {
            let resolution = resolve_slot(request, start, sessions, booked);
            // Only expose session details the caller can act on.
            let visible = resolution
                .session
                .filter(|_| matches!(resolution.state, SlotState::Open | SlotState::Full));
            SlotAvailability {
                time: format_slot_time(time),
                start_time: start,
                end_time: start + request.duration,
                state: resolution.state,
                session_id: visible.map(|s| s.id),
                spots_available: visible.map(|s| s.spots_available),
            }
        })
        .collect()
}
