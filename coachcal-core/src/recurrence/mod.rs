//! Recurrence rules for workout series.
//!
//! A rule is attached to every session of a series (the anchor included). It
//! describes how the series was generated and carries the `series_id` that
//! ties the sessions together.

mod advance;
mod expander;

pub use advance::advance;
pub use expander::{Expander, expand};

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Datelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ScheduleError, ScheduleResult};

/// How a series repeats, with the data each frequency needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly {
        /// Weekdays to land on; empty means "same weekday as the anchor"
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        days_of_week: BTreeSet<DayOfWeek>,
    },
    Monthly,
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly { .. } => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
        }
    }
}

/// A weekday numbered 0 (Sunday) to 6 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    pub const SUNDAY: DayOfWeek = DayOfWeek(0);
    pub const MONDAY: DayOfWeek = DayOfWeek(1);
    pub const TUESDAY: DayOfWeek = DayOfWeek(2);
    pub const WEDNESDAY: DayOfWeek = DayOfWeek(3);
    pub const THURSDAY: DayOfWeek = DayOfWeek(4);
    pub const FRIDAY: DayOfWeek = DayOfWeek(5);
    pub const SATURDAY: DayOfWeek = DayOfWeek(6);

    /// Out-of-range values are rejected, never wrapped.
    pub fn new(value: i64) -> ScheduleResult<Self> {
        match u8::try_from(value) {
            Ok(day) if day <= 6 => Ok(DayOfWeek(day)),
            _ => Err(ScheduleError::InvalidDayOfWeek(value)),
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Weekday of `dt` on its own local calendar.
    pub fn of(dt: &DateTime<Tz>) -> Self {
        dt.weekday().into()
    }
}

impl TryFrom<i64> for DayOfWeek {
    type Error = ScheduleError;

    fn try_from(value: i64) -> ScheduleResult<Self> {
        DayOfWeek::new(value)
    }
}

impl From<DayOfWeek> for u8 {
    fn from(day: DayOfWeek) -> u8 {
        day.0
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(weekday: chrono::Weekday) -> Self {
        // num_days_from_sunday is always 0..=6
        DayOfWeek(weekday.num_days_from_sunday() as u8)
    }
}

/// The rule a series was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    #[serde(flatten)]
    pub frequency: Frequency,
    /// Every N days/weeks/months. Values below 1 are read as 1.
    #[serde(default = "default_interval")]
    pub interval: i32,
    /// Nothing is generated after this instant
    #[serde(default, with = "crate::zoned::option", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Tz>>,
    /// Total sessions in the series, anchor included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurrences: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series_id: Option<String>,
}

fn default_interval() -> i32 {
    1
}

impl RecurrenceRule {
    pub fn new(frequency: Frequency, interval: i32) -> Self {
        RecurrenceRule {
            frequency,
            interval,
            end_date: None,
            occurrences: None,
            series_id: None,
        }
    }

    pub fn daily(interval: i32) -> Self {
        Self::new(Frequency::Daily, interval)
    }

    pub fn weekly(interval: i32) -> Self {
        Self::new(
            Frequency::Weekly {
                days_of_week: BTreeSet::new(),
            },
            interval,
        )
    }

    /// Weekly on the given weekday numbers (0 = Sunday).
    pub fn weekly_on(interval: i32, days: &[i64]) -> ScheduleResult<Self> {
        let days_of_week = days
            .iter()
            .map(|&day| DayOfWeek::new(day))
            .collect::<ScheduleResult<BTreeSet<_>>>()?;

        Ok(Self::new(Frequency::Weekly { days_of_week }, interval))
    }

    pub fn monthly(interval: i32) -> Self {
        Self::new(Frequency::Monthly, interval)
    }

    pub fn until(mut self, end_date: DateTime<Tz>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn count(mut self, occurrences: u32) -> Self {
        self.occurrences = Some(occurrences);
        self
    }

    pub fn in_series(mut self, series_id: impl Into<String>) -> Self {
        self.series_id = Some(series_id.into());
        self
    }

    /// Interval with the floor of 1 applied.
    pub fn effective_interval(&self) -> u32 {
        u32::try_from(self.interval).ok().filter(|n| *n >= 1).unwrap_or(1)
    }

    pub fn days_of_week(&self) -> Option<&BTreeSet<DayOfWeek>> {
        match &self.frequency {
            Frequency::Weekly { days_of_week } => Some(days_of_week),
            _ => None,
        }
    }

    /// Whether `cursor` lies beyond the rule's end date.
    pub fn is_past_end(&self, cursor: &DateTime<Tz>) -> bool {
        self.end_date.is_some_and(|end| *cursor > end)
    }

    /// This rule with its series id settled: the caller's id when one was
    /// given, the anchor's id otherwise.
    pub fn for_series(&self, anchor_id: &str) -> Self {
        let series_id = self
            .series_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .unwrap_or(anchor_id)
            .to_string();

        RecurrenceRule {
            series_id: Some(series_id),
            ..self.clone()
        }
    }
}
