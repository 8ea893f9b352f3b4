//! Well-known role names and the authenticated actor model.
//!
//! Role strings must match the `role` claim issued by the identity provider.

use crate::error::CoreError;
use crate::types::DbId;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_INSTRUCTOR: &str = "instructor";
pub const ROLE_CLIENT: &str = "client";

/// The caller of a booking operation.
///
/// The id is the token subject: a client id for clients, an instructor id
/// for instructors, and an opaque staff id for admins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Client(DbId),
    Instructor(DbId),
    Admin(DbId),
}

impl Actor {
    /// Build an actor from a role claim. Unknown roles are forbidden.
    pub fn from_role(role: &str, id: DbId) -> Result<Self, CoreError> {
        match role {
            ROLE_CLIENT => Ok(Actor::Client(id)),
            ROLE_INSTRUCTOR => Ok(Actor::Instructor(id)),
            ROLE_ADMIN => Ok(Actor::Admin(id)),
            other => Err(CoreError::Forbidden(format!("Unknown role '{other}'"))),
        }
    }

    /// The role claim this actor was built from.
    pub fn role(self) -> &'static str {
        match self {
            Actor::Client(_) => ROLE_CLIENT,
            Actor::Instructor(_) => ROLE_INSTRUCTOR,
            Actor::Admin(_) => ROLE_ADMIN,
        }
    }

    pub fn id(self) -> DbId {
        match self {
            Actor::Client(id) | Actor::Instructor(id) | Actor::Admin(id) => id,
        }
    }

    /// May this actor move `booking_client_id`'s booking out of a session
    /// taught by `session_instructor_id`?
    pub fn authorize_reschedule(
        self,
        booking_client_id: DbId,
        session_instructor_id: DbId,
    ) -> Result<(), CoreError> {
        match self {
            Actor::Admin(_) => Ok(()),
            Actor::Client(id) if id == booking_client_id => Ok(()),
            Actor::Instructor(id) if id == session_instructor_id => Ok(()),
            _ => Err(CoreError::Forbidden(
                "You may only reschedule your own bookings".into(),
            )),
        }
    }

    /// Only the booking's client or an admin may cancel it.
    pub fn authorize_cancel(self, booking_client_id: DbId) -> Result<(), CoreError> {
        match self {
            Actor::Admin(_) => Ok(()),
            Actor::Client(id) if id == booking_client_id => Ok(()),
            _ => Err(CoreError::Forbidden(
                "You may only cancel your own bookings".into(),
            )),
        }
    }

    /// Attendee lists are visible to the session's instructor and admins.
    pub fn authorize_attendees(self, session_instructor_id: DbId) -> Result<(), CoreError> {
        match self {
            Actor::Admin(_) => Ok(()),
            Actor::Instructor(id) if id == session_instructor_id => Ok(()),
            _ => Err(CoreError::Forbidden(
                "Only the session's instructor can view its attendees".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn from_role_maps_known_roles() {
        assert_eq!(Actor::from_role("client", 3).unwrap(), Actor::Client(3));
        assert_eq!(Actor::from_role("instructor", 4).unwrap(), Actor::Instructor(4));
        assert_eq!(Actor::from_role("admin", 5).unwrap(), Actor::Admin(5));
    }

    #[test]
    fn role_and_id_invert_from_role() {
        for actor in [Actor::Client(3), Actor::Instructor(4), Actor::Admin(5)] {
            assert_eq!(Actor::from_role(actor.role(), actor.id()).unwrap(), actor);
        }
    }

    #[test]
    fn from_role_rejects_unknown_role() {
        assert_matches!(Actor::from_role("reviewer", 1), Err(CoreError::Forbidden(_)));
    }

    #[test]
    fn client_can_only_reschedule_own_booking() {
        assert!(Actor::Client(7).authorize_reschedule(7, 99).is_ok());
        assert_matches!(
            Actor::Client(8).authorize_reschedule(7, 99),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn instructor_can_reschedule_bookings_in_own_sessions() {
        assert!(Actor::Instructor(99).authorize_reschedule(7, 99).is_ok());
        assert_matches!(
            Actor::Instructor(98).authorize_reschedule(7, 99),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn instructor_cannot_cancel() {
        assert_matches!(
            Actor::Instructor(1).authorize_cancel(7),
            Err(CoreError::Forbidden(_))
        );
        assert!(Actor::Admin(1).authorize_cancel(7).is_ok());
    }

    #[test]
    fn attendees_visible_to_owner_instructor_only() {
        assert!(Actor::Instructor(2).authorize_attendees(2).is_ok());
        assert!(Actor::Client(2).authorize_attendees(2).is_err());
    }
}
