//! Series membership.
//!
//! A series is every session sharing one `series_id`. There is no separate
//! index: membership is decided by id equality over the working set, so it
//! cannot drift from the sessions themselves. Titles, times and locations
//! never play a part.

use crate::occurrence::Occurrence;

/// Whether `occurrence` belongs to the series `series_id`.
pub fn in_series(occurrence: &Occurrence, series_id: &str) -> bool {
    occurrence.series_id() == Some(series_id)
}

/// Sessions of the series `series_id`, in working-set order.
///
/// The yielded references borrow from `occurrences` only.
pub fn series_members<'a, 'b>(
    occurrences: &'a [Occurrence],
    series_id: &'b str,
) -> impl Iterator<Item = &'a Occurrence> + use<'a, 'b> {
    occurrences.iter().filter(move |o| in_series(o, series_id))
}
