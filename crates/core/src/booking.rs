//! Booking rules and request shapes shared by the engine and the API.

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use chrono_tz::Tz;
use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::roles::Actor;
use crate::slots::{parse_slot_time, slot_start, SlotTemplate};
use crate::types::{DbId, Timestamp};

/// Used when a class type does not declare its own length.
pub const DEFAULT_CLASS_DURATION_MINS: i32 = 60;

/// Session length for a class type's `default_duration_minutes`.
pub fn class_duration(default_duration_minutes: Option<i32>) -> TimeDelta {
    let minutes = default_duration_minutes
        .filter(|m| *m > 0)
        .unwrap_or(DEFAULT_CLASS_DURATION_MINS);
    TimeDelta::minutes(i64::from(minutes))
}

/// The subscription a booking would draw from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionSnapshot {
    pub id: DbId,
    /// `None` means unlimited.
    pub classes_remaining: Option<i32>,
}

/// Check that `client_id` may draw one class from `subscription`.
pub fn ensure_can_book(
    client_id: DbId,
    subscription: Option<&SubscriptionSnapshot>,
) -> Result<SubscriptionSnapshot, CoreError> {
    let sub = subscription.ok_or(CoreError::NoActiveSubscription { client_id })?;
    match sub.classes_remaining {
        Some(n) if n <= 0 => Err(CoreError::NoClassesRemaining {
            subscription_id: sub.id,
        }),
        _ => Ok(*sub),
    }
}

pub fn ensure_future(start: Timestamp, now: Timestamp) -> Result<(), CoreError> {
    if start <= now {
        return Err(CoreError::Validation(format!(
            "Slot at {start} is in the past"
        )));
    }
    Ok(())
}

/// Clients must move bookings at least `notice_hours` ahead of the new slot.
/// Staff are only held to the slot being in the future.
pub fn ensure_reschedule_window(
    actor: Actor,
    start: Timestamp,
    now: Timestamp,
    notice_hours: i64,
) -> Result<(), CoreError> {
    ensure_future(start, now)?;
    if matches!(actor, Actor::Client(_)) && start < now + TimeDelta::hours(notice_hours) {
        return Err(CoreError::Validation(format!(
            "Bookings must be rescheduled at least {notice_hours} hours in advance"
        )));
    }
    Ok(())
}

/// Which day and which class/instructor pair to resolve slots for.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SlotQuery {
    pub date: NaiveDate,
    #[validate(range(min = 1))]
    pub class_type_id: DbId,
    #[validate(range(min = 1))]
    pub instructor_id: DbId,
    #[serde(default)]
    pub template: SlotTemplate,
    /// The session a booking is being moved out of.
    pub exclude_session_id: Option<DbId>,
}

/// A slot on a studio-local calendar day.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SlotSelection {
    #[validate(range(min = 1))]
    pub class_type_id: DbId,
    #[validate(range(min = 1))]
    pub instructor_id: DbId,
    pub date: NaiveDate,
    /// `HH:MM` wall-clock time.
    #[validate(length(equal = 5))]
    pub time: String,
    #[serde(default)]
    pub template: SlotTemplate,
    /// Session the caller saw when it picked the slot. A mismatch at write
    /// time means the slot changed underneath it.
    pub expected_session_id: Option<DbId>,
}

impl SlotSelection {
    pub fn slot(&self) -> SlotRef {
        SlotRef {
            date: self.date,
            time: self.time.clone(),
            template: self.template,
        }
    }
}

/// Where a booking should move to. Class type and instructor stay the same.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RescheduleTarget {
    pub date: NaiveDate,
    #[validate(length(equal = 5))]
    pub time: String,
    #[serde(default)]
    pub template: SlotTemplate,
    pub expected_session_id: Option<DbId>,
}

impl RescheduleTarget {
    pub fn slot(&self) -> SlotRef {
        SlotRef {
            date: self.date,
            time: self.time.clone(),
            template: self.template,
        }
    }
}

/// A date + template time pair, before conversion to UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotRef {
    pub date: NaiveDate,
    pub time: String,
    pub template: SlotTemplate,
}

impl SlotRef {
    /// Parse and check the time against the template, then convert to UTC.
    pub fn resolve(&self, tz: Tz) -> Result<(NaiveTime, Timestamp), CoreError> {
        let time = parse_slot_time(&self.time)?;
        self.template.ensure_contains(time)?;
        Ok((time, slot_start(self.date, time, tz)?))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2025, 6, 2, 9, 0, 0).unwrap()
    }

    #[test]
    fn class_duration_defaults_to_sixty_minutes() {
        assert_eq!(class_duration(None), TimeDelta::minutes(60));
        assert_eq!(class_duration(Some(0)), TimeDelta::minutes(60));
        assert_eq!(class_duration(Some(50)), TimeDelta::minutes(50));
    }

    #[test]
    fn missing_subscription_is_rejected() {
        assert_matches!(
            ensure_can_book(3, None),
            Err(CoreError::NoActiveSubscription { client_id: 3 })
        );
    }

    #[test]
    fn exhausted_subscription_is_rejected() {
        let sub = SubscriptionSnapshot {
            id: 9,
            classes_remaining: Some(0),
        };
        assert_matches!(
            ensure_can_book(3, Some(&sub)),
            Err(CoreError::NoClassesRemaining { subscription_id: 9 })
        );
    }

    #[test]
    fn unlimited_subscription_can_always_book() {
        let sub = SubscriptionSnapshot {
            id: 9,
            classes_remaining: None,
        };
        assert_eq!(ensure_can_book(3, Some(&sub)).unwrap(), sub);
    }

    #[test]
    fn past_slot_is_rejected() {
        assert_matches!(
            ensure_future(now() - TimeDelta::minutes(1), now()),
            Err(CoreError::Validation(_))
        );
        assert_matches!(ensure_future(now(), now()), Err(CoreError::Validation(_)));
        assert!(ensure_future(now() + TimeDelta::minutes(1), now()).is_ok());
    }

    #[test]
    fn client_needs_notice_to_reschedule() {
        let soon = now() + TimeDelta::hours(5);
        assert_matches!(
            ensure_reschedule_window(Actor::Client(1), soon, now(), 24),
            Err(CoreError::Validation(_))
        );
        assert!(ensure_reschedule_window(Actor::Client(1), now() + TimeDelta::hours(24), now(), 24).is_ok());
    }

    #[test]
    fn staff_can_reschedule_on_short_notice() {
        let soon = now() + TimeDelta::hours(1);
        assert!(ensure_reschedule_window(Actor::Instructor(2), soon, now(), 24).is_ok());
        assert!(ensure_reschedule_window(Actor::Admin(2), soon, now(), 24).is_ok());
        assert!(ensure_reschedule_window(Actor::Admin(2), now(), now(), 24).is_err());
    }

    #[test]
    fn slot_ref_rejects_time_outside_template() {
        let slot = SlotRef {
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            time: "10:00".into(),
            template: SlotTemplate::Standard,
        };
        assert_matches!(
            slot.resolve(chrono_tz::Europe::Bucharest),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn selection_validation_rejects_bad_ids() {
        let selection = SlotSelection {
            class_type_id: 0,
            instructor_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            time: "10:30".into(),
            template: SlotTemplate::Standard,
            expected_session_id: None,
        };
        assert!(selection.validate().is_err());
    }
}
