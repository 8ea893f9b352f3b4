//! Studio-wide booking policy knobs.

use chrono_tz::Tz;

/// Capacity of a freshly materialized session.
pub const DEFAULT_SESSION_CAPACITY: i32 = 4;

/// Minimum notice a client must give when moving a booking.
pub const DEFAULT_RESCHEDULE_NOTICE_HOURS: i64 = 24;

pub const DEFAULT_STUDIO_TIMEZONE: Tz = chrono_tz::Europe::Bucharest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingPolicy {
    /// Zone in which slot templates and calendar days are interpreted.
    pub timezone: Tz,
    pub session_capacity: i32,
    /// Applies to clients only. Staff may move bookings at any future time.
    pub reschedule_notice_hours: i64,
    /// Return the class to the subscription when a booking is cancelled.
    pub refund_on_cancel: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_STUDIO_TIMEZONE,
            session_capacity: DEFAULT_SESSION_CAPACITY,
            reschedule_notice_hours: DEFAULT_RESCHEDULE_NOTICE_HOURS,
            refund_on_cancel: false,
        }
    }
}
