//! Scheduled workout sessions.
//!
//! An `Occurrence` is one concrete session on the calendar. Sessions that
//! belong to a recurring series carry the series' `RecurrenceRule`; one-off
//! sessions carry none.

use std::fmt;

use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ScheduleError, ScheduleResult};
use crate::recurrence::RecurrenceRule;

/// A scheduled session.
///
/// Fields are public for callers that build records from storage, but the
/// `end > start` invariant is only checked by [`Occurrence::new`],
/// [`crate::edit::reschedule`] and deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OccurrenceRecord")]
pub struct Occurrence {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Opaque id of the program day this session follows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_link: Option<String>,
    /// Coach note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(with = "crate::zoned")]
    pub start: DateTime<Tz>,
    #[serde(with = "crate::zoned")]
    pub end: DateTime<Tz>,
    pub attendance: Attendance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceRule>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attendance {
    #[default]
    Scheduled,
    Completed,
    Missed,
}

impl fmt::Display for Attendance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attendance::Scheduled => write!(f, "scheduled"),
            Attendance::Completed => write!(f, "completed"),
            Attendance::Missed => write!(f, "missed"),
        }
    }
}

impl Occurrence {
    /// Create a one-off, scheduled session with a fresh id.
    pub fn new(
        title: impl Into<String>,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> ScheduleResult<Self> {
        check_time_range(&start, &end)?;

        Ok(Occurrence {
            id: Self::generate_id(),
            title: title.into(),
            location: None,
            program_link: None,
            note: None,
            start,
            end,
            attendance: Attendance::Scheduled,
            recurrence: None,
        })
    }

    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_program_link(mut self, program_link: impl Into<String>) -> Self {
        self.program_link = Some(program_link.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_attendance(mut self, attendance: Attendance) -> Self {
        self.attendance = attendance;
        self
    }

    pub fn with_recurrence(mut self, rule: RecurrenceRule) -> Self {
        self.recurrence = Some(rule);
        self
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// The id of the series this session belongs to.
    ///
    /// `None` for one-off sessions, and for sessions whose rule was never
    /// assigned a (non-empty) series id.
    pub fn series_id(&self) -> Option<&str> {
        self.recurrence
            .as_ref()
            .and_then(|rule| rule.series_id.as_deref())
            .filter(|id| !id.is_empty())
    }

    /// Build the next session of this one's series at `start`.
    ///
    /// Everything but the timing, id and attendance is copied verbatim.
    pub(crate) fn successor(
        &self,
        start: DateTime<Tz>,
        duration: Duration,
        rule: &RecurrenceRule,
    ) -> Self {
        Occurrence {
            id: Self::generate_id(),
            title: self.title.clone(),
            location: self.location.clone(),
            program_link: self.program_link.clone(),
            note: self.note.clone(),
            start,
            end: start + duration,
            attendance: Attendance::Scheduled,
            recurrence: Some(rule.clone()),
        }
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.start.format("%Y-%m-%d %H:%M"),
            self.title,
            self.attendance
        )
    }
}

pub(crate) fn check_time_range(start: &DateTime<Tz>, end: &DateTime<Tz>) -> ScheduleResult<()> {
    if end <= start {
        return Err(ScheduleError::InvalidTimeRange {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }
    Ok(())
}

/// Wire shape of an occurrence, validated into [`Occurrence`].
#[derive(Deserialize)]
struct OccurrenceRecord {
    id: String,
    title: String,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    program_link: Option<String>,
    #[serde(default)]
    note: Option<String>,
    #[serde(with = "crate::zoned")]
    start: DateTime<Tz>,
    #[serde(with = "crate::zoned")]
    end: DateTime<Tz>,
    #[serde(default)]
    attendance: Attendance,
    #[serde(default)]
    recurrence: Option<RecurrenceRule>,
}

impl TryFrom<OccurrenceRecord> for Occurrence {
    type Error = ScheduleError;

    fn try_from(record: OccurrenceRecord) -> ScheduleResult<Self> {
        check_time_range(&record.start, &record.end)?;

        Ok(Occurrence {
            id: record.id,
            title: record.title,
            location: record.location,
            program_link: record.program_link,
            note: record.note,
            start: record.start,
            end: record.end,
            attendance: record.attendance,
            recurrence: record.recurrence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Moscow;

    fn at(h: u32) -> DateTime<Tz> {
        Moscow.with_ymd_and_hms(2025, 3, 20, h, 0, 0).unwrap()
    }

    #[test]
    fn new_rejects_end_before_start() {
        let err = Occurrence::new("Strength", at(19), at(18)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimeRange { .. }));
    }

    #[test]
    fn new_rejects_zero_length() {
        assert!(Occurrence::new("Strength", at(18), at(18)).is_err());
    }

    #[test]
    fn new_starts_scheduled_without_series() {
        let occurrence = Occurrence::new("Strength", at(18), at(19)).unwrap();
        assert_eq!(occurrence.attendance, Attendance::Scheduled);
        assert!(occurrence.recurrence.is_none());
        assert_eq!(occurrence.series_id(), None);
        assert_eq!(occurrence.duration(), Duration::hours(1));
    }

    #[test]
    fn empty_series_id_counts_as_none() {
        let mut rule = RecurrenceRule::daily(1);
        rule.series_id = Some(String::new());
        let occurrence = Occurrence::new("Cardio", at(7), at(8))
            .unwrap()
            .with_recurrence(rule);
        assert_eq!(occurrence.series_id(), None);
    }

    #[test]
    fn display_shows_local_start_title_and_attendance() {
        let occurrence = Occurrence::new("Strength", at(18), at(19))
            .unwrap()
            .with_attendance(Attendance::Completed);
        assert_eq!(occurrence.to_string(), "2025-03-20 18:00 Strength (completed)");
    }

    #[test]
    fn serde_round_trip_keeps_zone() {
        let occurrence = Occurrence::new("Stretching", at(20), at(21))
            .unwrap()
            .with_location("Hall 2")
            .with_attendance(Attendance::Missed);

        let json = serde_json::to_string(&occurrence).unwrap();
        assert!(json.contains("\"tzid\":\"Europe/Moscow\""), "{}", json);
        assert!(json.contains("\"attendance\":\"missed\""), "{}", json);

        let back: Occurrence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, occurrence);
        assert_eq!(back.start.timezone(), Moscow);
    }

    #[test]
    fn deserialize_rejects_inverted_times() {
        let json = r#"{
            "id": "w-1",
            "title": "Cardio",
            "start": { "datetime": "2025-03-20T08:00:00+03:00", "tzid": "Europe/Moscow" },
            "end": { "datetime": "2025-03-20T07:00:00+03:00", "tzid": "Europe/Moscow" }
        }"#;
        let err = serde_json::from_str::<Occurrence>(json).unwrap_err();
        assert!(err.to_string().contains("must end after it starts"), "{}", err);
    }
}
