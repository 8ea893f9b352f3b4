//! Daily slot templates and studio-local time conversion.
//!
//! Slots are wall-clock times in the studio's time zone. Every conversion to
//! a UTC [`Timestamp`] goes through [`slot_start`] so DST transitions are
//! handled in one place.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Client booking template: nine slots, 75 minutes apart, 08:00 to 18:00.
const STANDARD_SLOTS: [(u32, u32); 9] = [
    (8, 0),
    (9, 15),
    (10, 30),
    (11, 45),
    (13, 0),
    (14, 15),
    (15, 30),
    (16, 45),
    (18, 0),
];

/// Instructor reschedule template: on the hour, 09:00 to 21:00 inclusive.
const HOURLY_FIRST: u32 = 9;
const HOURLY_LAST: u32 = 21;

/// Which fixed daily template a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotTemplate {
    #[default]
    Standard,
    Hourly,
}

impl SlotTemplate {
    /// Slot start times for this template, in order.
    pub fn times(self) -> Vec<NaiveTime> {
        match self {
            SlotTemplate::Standard => STANDARD_SLOTS
                .iter()
                .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
                .collect(),
            SlotTemplate::Hourly => (HOURLY_FIRST..=HOURLY_LAST)
                .filter_map(|h| NaiveTime::from_hms_opt(h, 0, 0))
                .collect(),
        }
    }

    pub fn contains(self, time: NaiveTime) -> bool {
        self.times().contains(&time)
    }

    /// Reject times that are not part of this template.
    pub fn ensure_contains(self, time: NaiveTime) -> Result<(), CoreError> {
        if self.contains(time) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "{} is not a valid {self:?} slot",
                format_slot_time(time)
            )))
        }
    }
}

/// Parse an `HH:MM` slot label.
pub fn parse_slot_time(raw: &str) -> Result<NaiveTime, CoreError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| CoreError::Validation(format!("Invalid slot time '{raw}', expected HH:MM")))
}

pub fn format_slot_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// UTC instant at which `time` on `date` begins in the studio time zone.
///
/// Ambiguous local times (DST fall-back) resolve to the earlier instant.
/// Nonexistent local times (DST spring-forward gap) are rejected.
pub fn slot_start(date: NaiveDate, time: NaiveTime, tz: Tz) -> Result<Timestamp, CoreError> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "{date} {} does not exist in {tz}",
                format_slot_time(time)
            ))
        })
}

/// Half-open UTC bounds `[start, end)` of a studio-local calendar day.
pub fn day_bounds(date: NaiveDate, tz: Tz) -> Result<(Timestamp, Timestamp), CoreError> {
    let next = date
        .succ_opt()
        .ok_or_else(|| CoreError::Validation(format!("Date {date} is out of range")))?;
    Ok((
        slot_start(date, NaiveTime::default(), tz)?,
        slot_start(next, NaiveTime::default(), tz)?,
    ))
}

/// Studio-local calendar date of a UTC instant.
pub fn local_date(ts: Timestamp, tz: Tz) -> NaiveDate {
    ts.with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn standard_template_has_nine_slots() {
        let labels: Vec<String> = SlotTemplate::Standard
            .times()
            .into_iter()
            .map(format_slot_time)
            .collect();
        assert_eq!(
            labels,
            ["08:00", "09:15", "10:30", "11:45", "13:00", "14:15", "15:30", "16:45", "18:00"]
        );
    }

    #[test]
    fn hourly_template_has_thirteen_slots() {
        let times = SlotTemplate::Hourly.times();
        assert_eq!(times.len(), 13);
        assert_eq!(format_slot_time(times[0]), "09:00");
        assert_eq!(format_slot_time(times[12]), "21:00");
    }

    #[test]
    fn ensure_contains_rejects_off_template_time() {
        let t = parse_slot_time("10:00").unwrap();
        assert!(SlotTemplate::Standard.ensure_contains(t).is_err());
        assert!(SlotTemplate::Hourly.ensure_contains(t).is_ok());
    }

    #[test]
    fn parse_slot_time_rejects_garbage() {
        assert!(parse_slot_time("10h30").is_err());
        assert!(parse_slot_time("25:00").is_err());
    }

    #[test]
    fn slot_start_converts_bucharest_to_utc() {
        // Bucharest is UTC+3 in summer.
        let start = slot_start(
            date(2025, 6, 2),
            parse_slot_time("10:30").unwrap(),
            chrono_tz::Europe::Bucharest,
        )
        .unwrap();
        assert_eq!(start.to_rfc3339(), "2025-06-02T07:30:00+00:00");
    }

    #[test]
    fn slot_start_rejects_dst_gap() {
        // 2025-03-30 03:00 -> 04:00 does not exist in Bucharest.
        let result = slot_start(
            date(2025, 3, 30),
            NaiveTime::from_hms_opt(3, 30, 0).unwrap(),
            chrono_tz::Europe::Bucharest,
        );
        assert!(result.is_err());
    }

    #[test]
    fn day_bounds_span_local_midnight_to_midnight() {
        let (start, end) = day_bounds(date(2025, 1, 15), chrono_tz::Europe::Bucharest).unwrap();
        assert_eq!(start.to_rfc3339(), "2025-01-14T22:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-01-15T22:00:00+00:00");
        assert_eq!(local_date(start, chrono_tz::Europe::Bucharest), date(2025, 1, 15));
    }
}
