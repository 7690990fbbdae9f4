//! An owned working set of sessions.
//!
//! `Schedule` applies the pure operations of this crate in place. It does no
//! I/O: loading and storing the set is up to the caller.

use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;

use crate::date_range::DateRange;
use crate::edit;
use crate::error::ScheduleResult;
use crate::mutate::{self, DeleteScope};
use crate::occurrence::{Attendance, Occurrence};
use crate::recurrence::Expander;
use crate::series::series_members;

#[derive(Debug, Clone, Default)]
pub struct Schedule {
    occurrences: Vec<Occurrence>,
    expander: Expander,
}

impl Schedule {
    pub fn new(expander: Expander) -> Self {
        Schedule {
            occurrences: Vec::new(),
            expander,
        }
    }

    /// Wrap sessions loaded from storage.
    pub fn with_occurrences(expander: Expander, occurrences: Vec<Occurrence>) -> Self {
        Schedule {
            occurrences,
            expander,
        }
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn into_occurrences(self) -> Vec<Occurrence> {
        self.occurrences
    }

    pub fn get(&self, id: &str) -> Option<&Occurrence> {
        self.occurrences.iter().find(|o| o.id == id)
    }

    /// Add a session, with its whole series when it carries a rule.
    /// Returns the ids that were added, anchor first.
    pub fn add(&mut self, anchor: Occurrence) -> ScheduleResult<Vec<String>> {
        let added = self.expander.schedule(anchor)?;
        let ids = added.iter().map(|o| o.id.clone()).collect();
        self.occurrences.extend(added);
        Ok(ids)
    }

    /// Sessions of one series, earliest first.
    pub fn series(&self, series_id: &str) -> Vec<&Occurrence> {
        let mut members: Vec<_> = series_members(&self.occurrences, series_id).collect();
        members.sort_by_key(|o| o.start);
        members
    }

    /// Sessions starting within `range`, earliest first.
    pub fn in_range(&self, range: &DateRange) -> Vec<&Occurrence> {
        let mut found: Vec<_> = self
            .occurrences
            .iter()
            .filter(|o| range.contains(&o.start))
            .collect();
        found.sort_by_key(|o| o.start);
        found
    }

    /// Delete with the given scope; returns how many sessions were removed.
    pub fn delete(&mut self, target_id: &str, scope: &DeleteScope) -> usize {
        self.apply(|set| mutate::delete(set, target_id, scope))
    }

    pub fn delete_series(&mut self, target_id: &str) -> usize {
        self.apply(|set| mutate::delete_series(set, target_id))
    }

    pub fn delete_from_date(&mut self, target_id: &str, from_date: &DateTime<Tz>) -> usize {
        self.apply(|set| mutate::delete_from_date(set, target_id, from_date))
    }

    pub fn remove(&mut self, target_id: &str) -> usize {
        self.apply(|set| mutate::remove_occurrence(set, target_id))
    }

    pub fn update_attendance(&mut self, id: &str, attendance: Attendance) -> bool {
        edit::update_attendance(&mut self.occurrences, id, attendance)
    }

    pub fn reschedule(
        &mut self,
        id: &str,
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> ScheduleResult<bool> {
        edit::reschedule(&mut self.occurrences, id, start, end)
    }

    pub fn move_to_date(&mut self, id: &str, date: NaiveDate) -> bool {
        edit::move_to_date(&mut self.occurrences, id, date)
    }

    pub fn replace(&mut self, updated: Occurrence) -> bool {
        edit::replace(&mut self.occurrences, updated)
    }

    fn apply<F>(&mut self, op: F) -> usize
    where
        F: FnOnce(Vec<Occurrence>) -> Vec<Occurrence>,
    {
        let before = self.occurrences.len();
        self.occurrences = op(std::mem::take(&mut self.occurrences));
        before - self.occurrences.len()
    }
}
