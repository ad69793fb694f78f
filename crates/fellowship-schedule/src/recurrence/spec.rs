use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::datetime::{DateTimeError, NthWeekday, parse_local_time};
use crate::error::ValidationError;

/// A parsed start/end pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeSlot {
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }
}

/// Start and end time strings exactly as typed into a program form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeInput {
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
}

impl TimeInput {
    #[must_use]
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// ## Summary
    /// Parses both times, reporting failures against `subject`
    /// (a weekday label, `3rd Sunday`, `customRecurrenceDates[1]`, ...).
    ///
    /// ## Errors
    /// Returns a `ValidationError` if either time is blank or not `HH:mm`.
    pub fn parse(&self, subject: &str) -> Result<TimeSlot, ValidationError> {
        let start = parse_named_time(&self.start_time, subject, "start")?;
        let end = parse_named_time(&self.end_time, subject, "end")?;
        Ok(TimeSlot::new(start, end))
    }
}

fn parse_named_time(value: &str, subject: &str, which: &str) -> Result<NaiveTime, ValidationError> {
    parse_local_time(value).map_err(|err| match err {
        DateTimeError::Missing => ValidationError::new(subject, format!("{which} time is required")),
        _ => ValidationError::new(
            subject,
            format!("{which} time '{value}' must be in HH:mm format"),
        ),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklySlot {
    pub weekday: Weekday,
    pub slot: TimeSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyWeekSlot {
    pub nth: NthWeekday,
    pub slot: TimeSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomDate {
    pub date: NaiveDate,
    pub slot: TimeSlot,
}

/// The repetition pattern of a program. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceSpec {
    None,
    /// One entry per selected weekday, each with its own times.
    Weekly(Vec<WeeklySlot>),
    MonthlyByDate { day_of_month: u32, slot: TimeSlot },
    MonthlyByWeek(Vec<MonthlyWeekSlot>),
    /// Explicit dates, used verbatim.
    Custom(Vec<CustomDate>),
}

impl RecurrenceSpec {
    #[must_use]
    pub const fn kind(&self) -> RecurrenceKind {
        match self {
            Self::None => RecurrenceKind::None,
            Self::Weekly(_) => RecurrenceKind::Weekly,
            Self::MonthlyByDate { .. } | Self::MonthlyByWeek(_) => RecurrenceKind::Monthly,
            Self::Custom(_) => RecurrenceKind::Custom,
        }
    }
}

/// The recurrence type a user picks in the program form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    #[default]
    None,
    Weekly,
    Monthly,
    Custom,
}

impl RecurrenceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Custom => "custom",
        }
    }
}

impl std::fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
