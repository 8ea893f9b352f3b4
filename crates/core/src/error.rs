use crate::types::{DbId, Timestamp};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),

    // --- Booking failures surfaced to the client as actionable errors ---
    #[error("Session {session_id} has no spots available")]
    SessionFull { session_id: DbId },

    #[error("Subscription {subscription_id} has no classes remaining")]
    NoClassesRemaining { subscription_id: DbId },

    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),

    #[error("Client {client_id} has no active subscription")]
    NoActiveSubscription { client_id: DbId },

    #[error("Client {client_id} already has a booking overlapping {start_time}")]
    DuplicateBooking {
        client_id: DbId,
        start_time: Timestamp,
    },

    #[error("Slot is no longer available: {0}")]
    StaleSlot(String),
}
