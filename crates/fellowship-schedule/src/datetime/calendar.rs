//! Calendar arithmetic: month lengths, nth-weekday ordinals and English ordinals.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::ValidationError;

/// ## Summary
/// English ordinal suffix for `n`: `st`, `nd`, `rd` or `th`.
///
/// Any `n` whose last two digits are 11, 12 or 13 takes `th`.
#[must_use]
pub const fn ordinal_suffix(n: u32) -> &'static str {
    if matches!(n % 100, 11..=13) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// `21` becomes `21st`.
#[must_use]
pub fn with_ordinal_suffix(n: u32) -> String {
    format!("{n}{}", ordinal_suffix(n))
}

/// ## Summary
/// Number of days in the given month, or `None` if `month` is not 1-12 or
/// the year is out of range.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    u32::try_from(next.signed_duration_since(first).num_days()).ok()
}

/// Position of a weekday within a month. `Last` is stored as `-1` by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekOrdinal {
    First,
    Second,
    Third,
    Fourth,
    Fifth,
    Last,
}

impl WeekOrdinal {
    #[must_use]
    pub const fn as_i8(self) -> i8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
            Self::Third => 3,
            Self::Fourth => 4,
            Self::Fifth => 5,
            Self::Last => -1,
        }
    }

    /// `3rd`, or `Last`.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Last => "Last".to_string(),
            other => with_ordinal_suffix(other.as_i8().unsigned_abs().into()),
        }
    }
}

impl TryFrom<i8> for WeekOrdinal {
    type Error = ValidationError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            3 => Ok(Self::Third),
            4 => Ok(Self::Fourth),
            5 => Ok(Self::Fifth),
            -1 => Ok(Self::Last),
            other => Err(ValidationError::new(
                "nth",
                format!("{other} is not a valid week ordinal (expected -1 or 1-5)"),
            )),
        }
    }
}

/// "The Nth (or last) `weekday` of the month".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NthWeekday {
    pub weekday: Weekday,
    pub ordinal: WeekOrdinal,
}

impl NthWeekday {
    /// ## Summary
    /// Builds an nth-weekday from a raw ordinal as entered by a user.
    ///
    /// ## Errors
    /// Returns a `ValidationError` naming the weekday if `nth` is not one of
    /// `-1, 1, 2, 3, 4, 5`.
    pub fn new(weekday: Weekday, nth: i8) -> Result<Self, ValidationError> {
        let ordinal = WeekOrdinal::try_from(nth)
            .map_err(|err| ValidationError::new(weekday_name(weekday), err.message))?;
        Ok(Self { weekday, ordinal })
    }
}

impl fmt::Display for NthWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ordinal.label(), weekday_name(self.weekday))
    }
}

/// ## Summary
/// Describes `date` as the Nth weekday of its month.
///
/// The ordinal is `ceil(day / 7)`. When it equals the last possible week
/// ordinal of the month, `ceil(days_in_month / 7)`, it is reported as
/// [`WeekOrdinal::Last`] instead.
#[must_use]
pub fn nth_weekday_of_month(date: NaiveDate) -> NthWeekday {
    // Only December of the final representable year has no following month.
    let month_length = days_in_month(date.year(), date.month()).unwrap_or(31);
    let ordinal = date.day().div_ceil(7);
    let last_ordinal = month_length.div_ceil(7);

    let ordinal = if ordinal == last_ordinal {
        WeekOrdinal::Last
    } else {
        match ordinal {
            1 => WeekOrdinal::First,
            2 => WeekOrdinal::Second,
            3 => WeekOrdinal::Third,
            4 => WeekOrdinal::Fourth,
            _ => WeekOrdinal::Fifth,
        }
    };

    NthWeekday {
        weekday: date.weekday(),
        ordinal,
    }
}

#[must_use]
pub const fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Weekday number as used by the backend: Sunday is 0, Saturday is 6.
#[must_use]
pub const fn weekday_index(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Sun => 0,
        Weekday::Mon => 1,
        Weekday::Tue => 2,
        Weekday::Wed => 3,
        Weekday::Thu => 4,
        Weekday::Fri => 5,
        Weekday::Sat => 6,
    }
}

#[must_use]
pub const fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}
