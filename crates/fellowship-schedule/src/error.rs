use thiserror::Error;

use crate::datetime::DateTimeError;

/// A rejected piece of user input, naming the entity the caller should highlight.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Offending entity, e.g. `Monday` or `customRecurrenceDates[2]`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Scheduling errors
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error(transparent)]
    DateTime(#[from] DateTimeError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Recurrence expansion failed: {0}")]
    Expansion(String),

    #[error(transparent)]
    CoreError(#[from] fellowship_core::error::CoreError),
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
