//! Date and time primitives shared by the status resolver and the recurrence builder.
//!
//! Everything timezone-specific lives in [`LocalZone`]; the rest of the crate
//! works with naive dates and times.

mod calendar;
mod parse;
mod zone;

pub use calendar::{
    NthWeekday, WeekOrdinal, days_in_month, nth_weekday_of_month, ordinal_suffix, weekday_from_index,
    weekday_index, weekday_name, with_ordinal_suffix,
};
pub use parse::{parse_calendar_date, parse_local_time};
pub use zone::LocalZone;

/// Error while parsing or anchoring a date or time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateTimeError {
    /// Required value was absent or blank.
    #[error("Missing value")]
    Missing,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}', expected HH:mm")]
    InvalidTime(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Local time skipped by a DST transition.
    #[error("Non-existent time (DST gap): {0}")]
    NonExistentTime(String),
}
