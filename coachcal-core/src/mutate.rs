//! Series-aware deletion over a working set of sessions.
//!
//! Every operation takes the caller's full set, returns the resulting set,
//! and is a no-op when the target id is unknown (the caller may be racing a
//! delete that already happened). Surviving sessions are returned untouched.

use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::occurrence::Occurrence;
use crate::series::in_series;

/// How much of a series a delete reaches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteScope {
    /// Only the target session
    Occurrence,
    /// Every session of the target's series, past ones included
    Series,
    /// Sessions of the target's series starting at or after the instant,
    /// except the target itself
    FromDate(#[serde(with = "crate::zoned")] DateTime<Tz>),
}

impl fmt::Display for DeleteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteScope::Occurrence => write!(f, "occurrence"),
            DeleteScope::Series => write!(f, "series"),
            DeleteScope::FromDate(from) => write!(f, "from {}", from.format("%Y-%m-%d %H:%M")),
        }
    }
}

/// Apply a delete of the given scope.
pub fn delete(
    occurrences: Vec<Occurrence>,
    target_id: &str,
    scope: &DeleteScope,
) -> Vec<Occurrence> {
    match scope {
        DeleteScope::Occurrence => remove_occurrence(occurrences, target_id),
        DeleteScope::Series => delete_series(occurrences, target_id),
        DeleteScope::FromDate(from) => delete_from_date(occurrences, target_id, from),
    }
}

/// Remove exactly the session `target_id`, whatever series it is in.
pub fn remove_occurrence(occurrences: Vec<Occurrence>, target_id: &str) -> Vec<Occurrence> {
    retain_logged(occurrences, target_id, "occurrence", |o| o.id != target_id)
}

/// Remove the whole series of `target_id`.
///
/// A target outside any series is removed alone. Sessions without a rule are
/// never reached through another session's series.
pub fn delete_series(occurrences: Vec<Occurrence>, target_id: &str) -> Vec<Occurrence> {
    let Some(target) = occurrences.iter().find(|o| o.id == target_id) else {
        return occurrences;
    };
    let Some(series_id) = target.series_id().map(str::to_owned) else {
        return remove_occurrence(occurrences, target_id);
    };

    retain_logged(occurrences, target_id, "series", |o| !in_series(o, &series_id))
}

/// Remove the part of `target_id`'s series that starts at or after `from_date`.
///
/// The target itself always survives, even when it starts after `from_date`
/// (see [`keeps_pivot`]). A target outside any series is removed alone.
pub fn delete_from_date(
    occurrences: Vec<Occurrence>,
    target_id: &str,
    from_date: &DateTime<Tz>,
) -> Vec<Occurrence> {
    let Some(target) = occurrences.iter().find(|o| o.id == target_id) else {
        return occurrences;
    };
    let Some(series_id) = target.series_id().map(str::to_owned) else {
        return remove_occurrence(occurrences, target_id);
    };

    retain_logged(occurrences, target_id, "from_date", |o| {
        !in_series(o, &series_id) || o.start < *from_date || keeps_pivot(o, target_id)
    })
}

/// A forward delete never removes the session it was issued from.
pub fn keeps_pivot(occurrence: &Occurrence, target_id: &str) -> bool {
    occurrence.id == target_id
}

fn retain_logged<F>(
    mut occurrences: Vec<Occurrence>,
    target_id: &str,
    scope: &str,
    keep: F,
) -> Vec<Occurrence>
where
    F: Fn(&Occurrence) -> bool,
{
    let before = occurrences.len();
    occurrences.retain(|o| keep(o));
    debug!(
        pivot = target_id,
        scope,
        removed = before - occurrences.len(),
        "Deleted sessions"
    );
    occurrences
}
