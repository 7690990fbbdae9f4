//! Zoned instants: local wall-clock resolution and serde representation.
//!
//! Occurrences carry `DateTime<Tz>` so that calendar arithmetic happens on the
//! wall clock of the zone the session was booked in. chrono only deserializes
//! a handful of zone types, so the serialized form pairs an RFC 3339 instant
//! with the IANA zone name:
//!
//! ```json
//! { "datetime": "2025-03-20T18:00:00+03:00", "tzid": "Europe/Moscow" }
//! ```

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Resolve a local wall-clock time in `tz` to an instant.
///
/// Ambiguous times (clocks falling back) resolve to the earlier instant.
/// Times inside a gap (clocks springing forward) are read with the offset in
/// force before the transition, which lands them just past the gap.
pub fn resolve_local(tz: &Tz, local: NaiveDateTime) -> DateTime<Tz> {
    if let Some(dt) = tz.from_local_datetime(&local).earliest() {
        return dt;
    }

    let offset_before = tz
        .from_local_datetime(&(local - Duration::days(1)))
        .earliest()
        .map(|dt| dt.offset().fix().local_minus_utc())
        .unwrap_or(0);

    tz.from_utc_datetime(&(local - Duration::seconds(i64::from(offset_before))))
}

#[derive(Serialize, Deserialize)]
struct ZonedRepr {
    datetime: DateTime<FixedOffset>,
    tzid: Tz,
}

pub fn serialize<S: Serializer>(dt: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error> {
    ZonedRepr {
        datetime: dt.fixed_offset(),
        tzid: dt.timezone(),
    }
    .serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Tz>, D::Error> {
    let repr = ZonedRepr::deserialize(deserializer)?;
    Ok(repr.datetime.with_timezone(&repr.tzid))
}

/// Same representation for optional instants.
pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(
        dt: &Option<DateTime<Tz>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        dt.as_ref()
            .map(|dt| ZonedRepr {
                datetime: dt.fixed_offset(),
                tzid: dt.timezone(),
            })
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Tz>>, D::Error> {
        let repr = Option::<ZonedRepr>::deserialize(deserializer)?;
        Ok(repr.map(|r| r.datetime.with_timezone(&r.tzid)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use chrono_tz::Europe::Berlin;

    fn naive(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn plain_local_time_keeps_wall_clock() {
        let dt = resolve_local(&Berlin, naive(2025, 6, 10, 18, 0));
        assert_eq!(dt.naive_local(), naive(2025, 6, 10, 18, 0));
    }

    #[test]
    fn gap_moves_past_the_transition() {
        // 2025-03-30 02:30 does not exist in Berlin
        let dt = resolve_local(&Berlin, naive(2025, 3, 30, 2, 30));
        assert_eq!(dt.hour(), 3);
        assert_eq!(dt.minute(), 30);
    }

    #[test]
    fn ambiguous_time_takes_earliest() {
        // 2025-10-26 02:30 happens twice in Berlin; the first is still CEST (+02:00)
        let dt = resolve_local(&Berlin, naive(2025, 10, 26, 2, 30));
        assert_eq!(dt.offset().fix().local_minus_utc(), 2 * 3600);
    }
}
