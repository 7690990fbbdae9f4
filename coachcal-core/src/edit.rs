//! Single-session edits.
//!
//! These change one session in place and never touch its series linkage.
//! Each returns whether a session with the given id was found; an unknown id
//! leaves the set as it was.

use chrono::{DateTime, NaiveDate, NaiveTime, Timelike};
use chrono_tz::Tz;
use tracing::debug;

use crate::error::ScheduleResult;
use crate::occurrence::{Attendance, Occurrence, check_time_range};
use crate::zoned::resolve_local;

pub fn update_attendance(occurrences: &mut [Occurrence], id: &str, attendance: Attendance) -> bool {
    let Some(occurrence) = occurrences.iter_mut().find(|o| o.id == id) else {
        return false;
    };
    occurrence.attendance = attendance;
    debug!(id, %attendance, "Updated attendance");
    true
}

/// Give a session new start and end instants.
///
/// The new range is checked before anything is looked up, so an invalid range
/// is an error even for an unknown id.
pub fn reschedule(
    occurrences: &mut [Occurrence],
    id: &str,
    start: DateTime<Tz>,
    end: DateTime<Tz>,
) -> ScheduleResult<bool> {
    check_time_range(&start, &end)?;

    let Some(occurrence) = occurrences.iter_mut().find(|o| o.id == id) else {
        return Ok(false);
    };
    occurrence.start = start;
    occurrence.end = end;
    Ok(true)
}

/// Move a session to another day, keeping its local time of day (to the
/// minute) and its length.
pub fn move_to_date(occurrences: &mut [Occurrence], id: &str, date: NaiveDate) -> bool {
    let Some(occurrence) = occurrences.iter_mut().find(|o| o.id == id) else {
        return false;
    };

    let duration = occurrence.duration();
    let local = occurrence.start.naive_local();
    let time = NaiveTime::from_hms_opt(local.hour(), local.minute(), 0).unwrap_or(local.time());
    let start = resolve_local(&occurrence.start.timezone(), date.and_time(time));

    occurrence.start = start;
    occurrence.end = start + duration;
    debug!(id, %date, "Moved session");
    true
}

/// Replace the stored session that has the same id as `updated`.
pub fn replace(occurrences: &mut [Occurrence], updated: Occurrence) -> bool {
    let Some(slot) = occurrences.iter_mut().find(|o| o.id == updated.id) else {
        return false;
    };
    *slot = updated;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScheduleError;
    use crate::recurrence::RecurrenceRule;
    use chrono::{Duration, TimeZone};
    use chrono_tz::Europe::Moscow;

    fn at(d: u32, h: u32, m: u32, s: u32) -> DateTime<Tz> {
        Moscow.with_ymd_and_hms(2025, 5, d, h, m, s).unwrap()
    }

    fn working_set() -> Vec<Occurrence> {
        vec![
            Occurrence::new("Strength", at(1, 18, 30, 15), at(1, 19, 45, 15))
                .unwrap()
                .with_id("a")
                .with_recurrence(RecurrenceRule::weekly(1).in_series("s")),
            Occurrence::new("Cardio", at(2, 7, 0, 0), at(2, 8, 0, 0))
                .unwrap()
                .with_id("b"),
        ]
    }

    #[test]
    fn attendance_update() {
        let mut set = working_set();
        assert!(update_attendance(&mut set, "b", Attendance::Completed));
        assert_eq!(set[1].attendance, Attendance::Completed);
        assert_eq!(set[0].attendance, Attendance::Scheduled);
    }

    #[test]
    fn attendance_unknown_id() {
        let mut set = working_set();
        assert!(!update_attendance(&mut set, "zzz", Attendance::Missed));
        assert_eq!(set, working_set());
    }

    #[test]
    fn reschedule_keeps_series() {
        let mut set = working_set();
        assert!(reschedule(&mut set, "a", at(3, 10, 0, 0), at(3, 11, 0, 0)).unwrap());
        assert_eq!(set[0].start, at(3, 10, 0, 0));
        assert_eq!(set[0].series_id(), Some("s"));
    }

    #[test]
    fn reschedule_rejects_inverted_range() {
        let mut set = working_set();
        let err = reschedule(&mut set, "a", at(3, 11, 0, 0), at(3, 10, 0, 0)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimeRange { .. }));
        assert_eq!(set, working_set());
    }

    #[test]
    fn move_keeps_time_of_day_and_length() {
        let mut set = working_set();
        let target = NaiveDate::from_ymd_opt(2025, 5, 9).unwrap();
        assert!(move_to_date(&mut set, "a", target));

        // seconds are dropped, as when dragging a session on the calendar
        assert_eq!(set[0].start, at(9, 18, 30, 0));
        assert_eq!(set[0].duration(), Duration::minutes(75));
    }

    #[test]
    fn replace_by_id() {
        let mut set = working_set();
        let mut updated = set[1].clone();
        updated.title = "Intervals".into();
        assert!(replace(&mut set, updated));
        assert_eq!(set[1].title, "Intervals");

        let stranger = Occurrence::new("Yoga", at(4, 9, 0, 0), at(4, 10, 0, 0)).unwrap();
        assert!(!replace(&mut set, stranger));
        assert_eq!(set.len(), 2);
    }
}
