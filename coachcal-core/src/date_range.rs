//! Date range for filtering sessions.

use chrono::{DateTime, NaiveDate, NaiveTime};
use chrono_tz::Tz;

use crate::error::{ScheduleError, ScheduleResult};
use crate::zoned::resolve_local;

/// Date range for filtering sessions.
/// None values mean unbounded in that direction; both ends are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateRange {
    pub from: Option<DateTime<Tz>>,
    pub to: Option<DateTime<Tz>>,
}

impl DateRange {
    pub fn between(from: DateTime<Tz>, to: DateTime<Tz>) -> Self {
        DateRange {
            from: Some(from),
            to: Some(to),
        }
    }

    /// Parse date strings into a DateRange on the calendar of `tz`.
    /// - `from`: "start" or None for unbounded, or YYYY-MM-DD (start of that day)
    /// - `to`: None for unbounded, or YYYY-MM-DD (end of that day)
    pub fn from_args(from: Option<&str>, to: Option<&str>, tz: Tz) -> ScheduleResult<Self> {
        let from_dt = match from {
            None | Some("start") => None,
            Some(s) => Some(resolve_local(&tz, parse_date(s)?.and_time(NaiveTime::MIN))),
        };

        let to_dt = match to {
            Some(s) => {
                let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
                Some(resolve_local(&tz, parse_date(s)?.and_time(end_of_day)))
            }
            None => None,
        };

        Ok(DateRange {
            from: from_dt,
            to: to_dt,
        })
    }

    pub fn contains(&self, instant: &DateTime<Tz>) -> bool {
        self.from.is_none_or(|from| *instant >= from) && self.to.is_none_or(|to| *instant <= to)
    }
}

fn parse_date(s: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ScheduleError::InvalidDate(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Moscow;

    #[test]
    fn parses_whole_days() {
        let range = DateRange::from_args(Some("2025-03-01"), Some("2025-03-31"), Moscow).unwrap();
        assert_eq!(range.from, Some(Moscow.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap()));
        assert_eq!(range.to, Some(Moscow.with_ymd_and_hms(2025, 3, 31, 23, 59, 59).unwrap()));
    }

    #[test]
    fn start_keyword_is_unbounded() {
        let range = DateRange::from_args(Some("start"), None, Moscow).unwrap();
        assert_eq!(range, DateRange::default());
        assert!(range.contains(&Moscow.with_ymd_and_hms(1999, 1, 1, 0, 0, 0).unwrap()));
    }

    #[test]
    fn rejects_bad_date() {
        let err = DateRange::from_args(Some("03/01/2025"), None, Moscow).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidDate(s) if s == "03/01/2025"));
    }

    #[test]
    fn contains_is_inclusive() {
        let from = Moscow.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
        let to = Moscow.with_ymd_and_hms(2025, 3, 2, 0, 0, 0).unwrap();
        let range = DateRange::between(from, to);
        assert!(range.contains(&from));
        assert!(range.contains(&to));
        assert!(!range.contains(&(to + chrono::Duration::seconds(1))));
    }
}
