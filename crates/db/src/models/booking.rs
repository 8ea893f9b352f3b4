//! Booking rows and the read models built on them.

use serde::Serialize;
use sqlx::FromRow;
use studio_core::types::{DbId, Timestamp};

use crate::models::status::StatusId;

/// A row from the `bookings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Booking {
    pub id: DbId,
    pub client_id: DbId,
    pub session_id: DbId,
    pub client_subscription_id: Option<DbId>,
    pub booking_time: Timestamp,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A client's upcoming booking with display names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UpcomingBooking {
    pub booking_id: DbId,
    pub session_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub class_type_id: DbId,
    pub class_type_name: String,
    pub instructor_id: DbId,
    pub instructor_first_name: String,
    pub instructor_last_name: String,
}

/// A client confirmed for a session, for the instructor's roster.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SessionAttendee {
    pub booking_id: DbId,
    pub client_id: DbId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub booking_time: Timestamp,
}

/// Result of moving a booking to another slot.
#[derive(Debug, Clone, Serialize)]
pub struct RescheduleOutcome {
    pub booking: Booking,
    /// The booking already sat in the target session; nothing changed.
    pub unchanged: bool,
    /// A session was created for the target slot.
    pub session_created: bool,
    /// The vacated session had no bookings left and was removed.
    pub vacated_session_deleted: bool,
}

/// Result of booking a slot.
#[derive(Debug, Clone, Serialize)]
pub struct BookingOutcome {
    pub booking: Booking,
    pub session_created: bool,
}
