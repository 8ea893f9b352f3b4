//! Scheduled class occurrences (`sessions` table).

use serde::Serialize;
use sqlx::FromRow;
use studio_core::availability::SessionSnapshot;
use studio_core::types::{DbId, Timestamp};

use crate::models::status::StatusId;

/// A row from the `sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClassSession {
    pub id: DbId,
    pub class_type_id: DbId,
    pub instructor_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub capacity: i32,
    pub spots_available: i32,
    pub status_id: StatusId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl ClassSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            class_type_id: self.class_type_id,
            instructor_id: self.instructor_id,
            start_time: self.start_time,
            end_time: self.end_time,
            capacity: self.capacity,
            spots_available: self.spots_available,
        }
    }
}

/// DTO for inserting a session for an empty slot.
#[derive(Debug, Clone)]
pub struct NewClassSession {
    pub class_type_id: DbId,
    pub instructor_id: DbId,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub capacity: i32,
}

/// An instructor's session with its class name and head count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InstructorSessionSummary {
    pub id: DbId,
    pub class_type_id: DbId,
    pub class_type_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub capacity: i32,
    pub spots_available: i32,
    pub confirmed_bookings: i64,
}

/// A studio-wide calendar entry: who teaches it and who is coming.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudioSessionSummary {
    pub id: DbId,
    pub class_type_id: DbId,
    pub class_type_name: String,
    pub instructor_id: DbId,
    pub instructor_first_name: String,
    pub instructor_last_name: String,
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    pub capacity: i32,
    pub spots_available: i32,
    pub confirmed_bookings: i64,
    /// Confirmed attendees in booking order. Clients without a name on file
    /// are counted but not listed.
    pub attendee_names: Vec<String>,
}
