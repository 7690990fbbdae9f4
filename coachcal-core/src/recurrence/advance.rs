//! Calendar arithmetic for stepping a series cursor forward.

use std::collections::BTreeSet;
use std::ops::Bound::{Excluded, Unbounded};

use chrono::{DateTime, Days, Months};
use chrono_tz::Tz;

use super::{DayOfWeek, Frequency};
use crate::zoned::resolve_local;

/// Step `cursor` to the next slot of a series.
///
/// Arithmetic runs on the cursor's local wall clock, so a daily 18:00 session
/// stays at 18:00 across DST changes. Monthly steps clamp the day of month
/// (Jan 31 + 1 month is the last day of February).
///
/// Returns `None` only when the result would overflow chrono's date range.
pub fn advance(
    cursor: &DateTime<Tz>,
    frequency: &Frequency,
    interval: u32,
) -> Option<DateTime<Tz>> {
    let local = cursor.naive_local();

    let next = match frequency {
        Frequency::Daily => local.checked_add_days(Days::new(u64::from(interval)))?,
        Frequency::Weekly { days_of_week } => {
            let days = days_to_next_slot(DayOfWeek::of(cursor), days_of_week, interval);
            local.checked_add_days(Days::new(days))?
        }
        Frequency::Monthly => local.checked_add_months(Months::new(interval))?,
    };

    Some(resolve_local(&cursor.timezone(), next))
}

/// Days from `current` to the next selected weekday.
///
/// Picks the first selected day later in the week, wrapping to the earliest
/// selected day of the following week. When that lands on `current` itself
/// (it is the only selected day) the step is `interval` whole weeks instead,
/// and so is an empty selection.
fn days_to_next_slot(current: DayOfWeek, days_of_week: &BTreeSet<DayOfWeek>, interval: u32) -> u64 {
    let whole_weeks = u64::from(interval) * 7;

    let Some(first) = days_of_week.first() else {
        return whole_weeks;
    };
    let next = days_of_week
        .range((Excluded(current), Unbounded))
        .next()
        .unwrap_or(first);

    let cur = u64::from(current.number());
    let next = u64::from(next.number());
    let days_to_add = (next + 7 - cur) % 7;

    if days_to_add == 0 { whole_weeks } else { days_to_add }
}
