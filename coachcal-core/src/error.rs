//! Error types for coachcal scheduling.

use thiserror::Error;

/// Errors that can occur while building or editing a schedule.
///
/// Unknown occurrence ids are deliberately absent: every mutation treats
/// them as a no-op.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Occurrence must end after it starts (start {start}, end {end})")]
    InvalidTimeRange { start: String, end: String },

    #[error("Day of week must be between 0 (Sunday) and 6 (Saturday), got {0}")]
    InvalidDayOfWeek(i64),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Recurrence rule asks for zero occurrences")]
    ZeroOccurrences,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for coachcal operations.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
