//! Turns program form input into a validated [`RecurrenceSpec`].

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::spec::{CustomDate, MonthlyWeekSlot, RecurrenceSpec, TimeInput, WeeklySlot};
use super::TimeSlot;
use crate::datetime::{
    NthWeekday, nth_weekday_of_month, parse_calendar_date, weekday_index, weekday_name,
};
use crate::error::ValidationError;

/// One "Nth weekday" row of a monthly-by-week program, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyWeekInput {
    pub weekday: Weekday,
    /// `-1` for the last occurrence, otherwise 1-5.
    pub nth: i8,
    pub time: TimeInput,
}

/// One row of a custom-dates program, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDateInput {
    pub date: String,
    #[serde(flatten)]
    pub time: TimeInput,
}

impl CustomDateInput {
    #[must_use]
    pub fn new(date: impl Into<String>, time: TimeInput) -> Self {
        Self {
            date: date.into(),
            time,
        }
    }
}

/// ## Summary
/// Builds a weekly recurrence from the selected weekdays and their times.
///
/// Duplicate selections collapse and the result is ordered Sunday first.
///
/// ## Errors
/// Returns a `ValidationError` if nothing is selected, or naming the first
/// weekday (e.g. `Monday`) that lacks a well-formed start or end time.
pub fn build_weekly(
    selected: &[Weekday],
    times: &HashMap<Weekday, TimeInput>,
) -> Result<RecurrenceSpec, ValidationError> {
    let mut weekdays = selected.to_vec();
    weekdays.sort_by_key(|weekday| weekday_index(*weekday));
    weekdays.dedup();

    if weekdays.is_empty() {
        return Err(ValidationError::new(
            "byWeekday",
            "select at least one weekday",
        ));
    }

    let slots = weekdays
        .into_iter()
        .map(|weekday| -> Result<WeeklySlot, ValidationError> {
            let label = weekday_name(weekday);
            let time = times
                .get(&weekday)
                .ok_or_else(|| ValidationError::new(label, "start and end times are required"))?;
            Ok(WeeklySlot {
                weekday,
                slot: time.parse(label)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| tracing::debug!(error = %err, "Rejected weekly recurrence"))?;

    Ok(RecurrenceSpec::Weekly(slots))
}

/// ## Summary
/// The nth-weekday rule a monthly-by-week program starting on `date` follows,
/// e.g. 2025-06-15 gives the 3rd Sunday.
#[must_use]
pub fn build_monthly_by_week(date: NaiveDate) -> NthWeekday {
    nth_weekday_of_month(date)
}

/// ## Summary
/// Builds a monthly-by-week recurrence from nth-weekday rows, each with its
/// own times. Rows may override the ordinal derived from the start date.
///
/// ## Errors
/// Returns a `ValidationError` if there are no rows, if an ordinal is outside
/// `-1, 1..=5`, or if a row's times are missing or malformed.
pub fn monthly_by_week(entries: &[MonthlyWeekInput]) -> Result<RecurrenceSpec, ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::new(
            "nthWeekdays",
            "add at least one weekday of the month",
        ));
    }

    let slots = entries
        .iter()
        .map(|entry| -> Result<MonthlyWeekSlot, ValidationError> {
            let nth = NthWeekday::new(entry.weekday, entry.nth)?;
            Ok(MonthlyWeekSlot {
                nth,
                slot: entry.time.parse(&nth.to_string())?,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| tracing::debug!(error = %err, "Rejected monthly recurrence"))?;

    Ok(RecurrenceSpec::MonthlyByWeek(slots))
}

/// ## Summary
/// Builds a recurrence on the same day of every month as `date`, sharing one
/// start/end time across the series.
///
/// ## Errors
/// Returns a `ValidationError` if the shared times are missing or malformed.
pub fn build_monthly_by_date(
    date: NaiveDate,
    time: &TimeInput,
) -> Result<RecurrenceSpec, ValidationError> {
    monthly_by_day(date.day(), time)
}

pub(crate) fn monthly_by_day(
    day_of_month: u32,
    time: &TimeInput,
) -> Result<RecurrenceSpec, ValidationError> {
    if !(1..=31).contains(&day_of_month) {
        return Err(ValidationError::new(
            "byMonthDay",
            format!("{day_of_month} is not a day of the month"),
        ));
    }

    Ok(RecurrenceSpec::MonthlyByDate {
        day_of_month,
        slot: time.parse("monthly")?,
    })
}

/// ## Summary
/// Builds a custom recurrence from an explicit list of dates, kept in the
/// order given.
///
/// ## Errors
/// Returns a `ValidationError` if the list is empty or naming the index of
/// the first entry whose date or times do not parse.
pub fn build_custom(entries: &[CustomDateInput]) -> Result<RecurrenceSpec, ValidationError> {
    if entries.is_empty() {
        return Err(ValidationError::new(
            "customRecurrenceDates",
            "add at least one date",
        ));
    }

    let dates = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| -> Result<CustomDate, ValidationError> {
            let field = format!("customRecurrenceDates[{index}]");
            let date = parse_calendar_date(&entry.date)
                .map_err(|err| ValidationError::new(field.as_str(), err.to_string()))?;
            Ok(CustomDate {
                date,
                slot: entry.time.parse(&field)?,
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .inspect_err(|err| tracing::debug!(error = %err, "Rejected custom recurrence"))?;

    Ok(RecurrenceSpec::Custom(dates))
}

/// Slot of a single non-recurring program.
pub(crate) fn single_slot(time: &TimeInput) -> Result<TimeSlot, ValidationError> {
    time.parse("program")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_build_weekly_orders_and_dedups() {
        let times = HashMap::from([
            (Weekday::Wed, TimeInput::new("18:00", "19:30")),
            (Weekday::Sun, TimeInput::new("08:00", "10:00")),
        ]);

        let spec = build_weekly(&[Weekday::Wed, Weekday::Sun, Weekday::Wed], &times)
            .expect("all weekdays have times");

        let RecurrenceSpec::Weekly(slots) = spec else {
            panic!("expected weekly spec");
        };
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].weekday, Weekday::Sun);
        assert_eq!(slots[0].slot, TimeSlot::new(hm(8, 0), hm(10, 0)));
        assert_eq!(slots[1].weekday, Weekday::Wed);
    }

    #[test]
    fn test_build_weekly_missing_times_names_weekday() {
        let times = HashMap::from([(Weekday::Sun, TimeInput::new("08:00", "10:00"))]);

        let err = build_weekly(&[Weekday::Sun, Weekday::Mon], &times)
            .expect_err("Monday has no times");
        assert_eq!(err.field, "Monday");
    }

    #[test]
    fn test_build_weekly_blank_end_time() {
        let times = HashMap::from([(Weekday::Tue, TimeInput::new("08:00", ""))]);

        let err = build_weekly(&[Weekday::Tue], &times).expect_err("end time is blank");
        assert_eq!(err, ValidationError::new("Tuesday", "end time is required"));
    }

    #[test]
    fn test_build_weekly_requires_selection() {
        let err = build_weekly(&[], &HashMap::new()).expect_err("nothing selected");
        assert_eq!(err.field, "byWeekday");
    }

    #[test]
    fn test_build_monthly_by_week_from_date() {
        let nth = build_monthly_by_week(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert_eq!(nth.weekday, Weekday::Sun);
        assert_eq!(nth.ordinal.as_i8(), 3);
    }

    #[test]
    fn test_monthly_by_week_rejects_zero_ordinal() {
        let err = monthly_by_week(&[MonthlyWeekInput {
            weekday: Weekday::Sun,
            nth: 0,
            time: TimeInput::new("09:00", "11:00"),
        }])
        .expect_err("zero is not an ordinal");
        assert_eq!(err.field, "Sunday");
    }

    #[test]
    fn test_monthly_by_week_names_row_on_bad_time() {
        let err = monthly_by_week(&[MonthlyWeekInput {
            weekday: Weekday::Sat,
            nth: -1,
            time: TimeInput::new("9:00", "11:00"),
        }])
        .expect_err("start not zero padded");
        assert_eq!(err.field, "Last Saturday");
    }

    #[test]
    fn test_build_monthly_by_date() {
        let spec = build_monthly_by_date(
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            &TimeInput::new("09:00", "11:00"),
        )
        .expect("valid");
        assert_eq!(
            spec,
            RecurrenceSpec::MonthlyByDate {
                day_of_month: 15,
                slot: TimeSlot::new(hm(9, 0), hm(11, 0)),
            }
        );
    }

    #[test]
    fn test_monthly_by_day_range() {
        assert!(monthly_by_day(0, &TimeInput::new("09:00", "10:00")).is_err());
        assert!(monthly_by_day(32, &TimeInput::new("09:00", "10:00")).is_err());
    }

    #[test]
    fn test_build_custom_keeps_order() {
        let spec = build_custom(&[
            CustomDateInput::new("2025-07-04", TimeInput::new("10:00", "12:00")),
            CustomDateInput::new("2025-06-01", TimeInput::new("09:00", "11:00")),
        ])
        .expect("valid dates");

        let RecurrenceSpec::Custom(dates) = spec else {
            panic!("expected custom spec");
        };
        assert_eq!(dates[0].date, NaiveDate::from_ymd_opt(2025, 7, 4).unwrap());
        assert_eq!(dates[1].date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    }

    #[test]
    fn test_build_custom_requires_entries() {
        let err = build_custom(&[]).expect_err("empty list");
        assert_eq!(err.field, "customRecurrenceDates");
    }

    #[test]
    fn test_build_custom_names_bad_index() {
        let err = build_custom(&[
            CustomDateInput::new("2025-06-01", TimeInput::new("09:00", "11:00")),
            CustomDateInput::new("2025-13-01", TimeInput::new("09:00", "11:00")),
        ])
        .expect_err("month 13");
        assert_eq!(err.field, "customRecurrenceDates[1]");
    }
}
