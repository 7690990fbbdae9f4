//! Core scheduling logic for coachcal.
//!
//! Trainers and clients book workout sessions, optionally recurring. This
//! crate covers the part with real logic in it:
//! - `recurrence`: expanding an anchor session and a rule into a series
//! - `mutate`: deleting a whole series, or a series from a date onward
//! - `edit`: single-session edits that leave series linkage alone
//! - `schedule`: an owned working set applying all of the above
//!
//! Storage, transport and authorization belong to the caller.

pub mod config;
pub mod constants;
pub mod date_range;
pub mod edit;
pub mod error;
pub mod mutate;
pub mod occurrence;
pub mod recurrence;
pub mod schedule;
pub mod series;
pub mod zoned;

pub use crate::config::{ExpansionConfig, ZeroOccurrences};
pub use date_range::DateRange;
pub use error::{ScheduleError, ScheduleResult};
pub use mutate::{DeleteScope, delete, delete_from_date, delete_series, remove_occurrence};
pub use occurrence::{Attendance, Occurrence};
pub use recurrence::{DayOfWeek, Expander, Frequency, RecurrenceRule, expand};
pub use schedule::Schedule;
