//! Strict parsers for the `YYYY-MM-DD` and `HH:mm` strings used by program forms.

use chrono::{NaiveDate, NaiveTime};

use super::DateTimeError;

const DATE_SHAPE: &[u8] = b"dddd-dd-dd";
const TIME_SHAPE: &[u8] = b"dd:dd";

/// ## Summary
/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// The string must match the shape exactly (zero padded, no surrounding
/// whitespace) and name a real calendar day.
///
/// ## Errors
/// Returns `DateTimeError::Missing` for an empty string and
/// `DateTimeError::InvalidDate` for anything else that does not parse.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, DateTimeError> {
    if value.trim().is_empty() {
        return Err(DateTimeError::Missing);
    }
    if !matches_shape(value, DATE_SHAPE) {
        return Err(DateTimeError::InvalidDate(value.to_string()));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_err| DateTimeError::InvalidDate(value.to_string()))
}

/// ## Summary
/// Parses a 24-hour local time in `HH:mm` form.
///
/// `9:00` (not zero padded) and `09:00:00` (seconds) are both rejected, as is
/// a well-shaped but impossible time such as `24:30`.
///
/// ## Errors
/// Returns `DateTimeError::Missing` for an empty string and
/// `DateTimeError::InvalidTime` otherwise.
pub fn parse_local_time(value: &str) -> Result<NaiveTime, DateTimeError> {
    if value.trim().is_empty() {
        return Err(DateTimeError::Missing);
    }
    if !matches_shape(value, TIME_SHAPE) {
        return Err(DateTimeError::InvalidTime(value.to_string()));
    }

    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_err| DateTimeError::InvalidTime(value.to_string()))
}

/// `d` in the shape matches one ASCII digit, any other byte matches itself.
fn matches_shape(value: &str, shape: &[u8]) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == shape.len()
        && bytes.iter().zip(shape).all(|(byte, expected)| match expected {
            b'd' => byte.is_ascii_digit(),
            other => byte == other,
        })
}
