//! JSON shapes exchanged with the church-management backend.
//!
//! ```json
//! { "recurrenceType": "weekly",
//!   "byWeekday": [{ "weekday": 0, "startTime": "09:00", "endTime": "11:00" }] }
//! ```
//!
//! Weekdays are numbered from Sunday = 0. Incoming payloads go through the
//! same validation as form input and may only carry the collection that
//! belongs to their `recurrenceType`.

use std::collections::HashMap;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::datetime::{weekday_from_index, weekday_index};
use crate::error::ValidationError;
use crate::recurrence::{
    CustomDateInput, MonthlyWeekInput, RecurrenceKind, RecurrenceSpec, TimeInput, TimeSlot,
    build_custom, build_weekly, monthly_by_day, monthly_by_week,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrencePayload {
    pub recurrence_type: RecurrenceKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_weekday: Vec<WeekdayTimes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub by_month_day: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nth_weekdays: Vec<NthWeekdayTimes>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_recurrence_dates: Vec<CustomDateInput>,
    /// Shared times of a monthly-by-date series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayTimes {
    pub weekday: u8,
    #[serde(flatten)]
    pub time: TimeInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NthWeekdayTimes {
    pub weekday: u8,
    pub nth: i8,
    #[serde(flatten)]
    pub time: TimeInput,
}

fn format_hhmm(slot: TimeSlot) -> TimeInput {
    TimeInput::new(
        slot.start.format("%H:%M").to_string(),
        slot.end.format("%H:%M").to_string(),
    )
}

impl From<&RecurrenceSpec> for RecurrencePayload {
    fn from(spec: &RecurrenceSpec) -> Self {
        let mut payload = Self {
            recurrence_type: spec.kind(),
            ..Self::default()
        };

        match spec {
            RecurrenceSpec::None => {}
            RecurrenceSpec::Weekly(slots) => {
                payload.by_weekday = slots
                    .iter()
                    .map(|weekly| WeekdayTimes {
                        weekday: weekday_index(weekly.weekday),
                        time: format_hhmm(weekly.slot),
                    })
                    .collect();
            }
            RecurrenceSpec::MonthlyByDate { day_of_month, slot } => {
                let time = format_hhmm(*slot);
                payload.by_month_day = Some(*day_of_month);
                payload.start_time = Some(time.start_time);
                payload.end_time = Some(time.end_time);
            }
            RecurrenceSpec::MonthlyByWeek(slots) => {
                payload.nth_weekdays = slots
                    .iter()
                    .map(|monthly| NthWeekdayTimes {
                        weekday: weekday_index(monthly.nth.weekday),
                        nth: monthly.nth.ordinal.as_i8(),
                        time: format_hhmm(monthly.slot),
                    })
                    .collect();
            }
            RecurrenceSpec::Custom(dates) => {
                payload.custom_recurrence_dates = dates
                    .iter()
                    .map(|custom| {
                        CustomDateInput::new(
                            custom.date.format("%Y-%m-%d").to_string(),
                            format_hhmm(custom.slot),
                        )
                    })
                    .collect();
            }
        }

        payload
    }
}

impl TryFrom<RecurrencePayload> for RecurrenceSpec {
    type Error = ValidationError;

    fn try_from(payload: RecurrencePayload) -> Result<Self, Self::Error> {
        payload.reject_foreign_fields()?;

        match payload.recurrence_type {
            RecurrenceKind::None => Ok(Self::None),
            RecurrenceKind::Weekly => {
                let mut selected = Vec::with_capacity(payload.by_weekday.len());
                let mut times = HashMap::with_capacity(payload.by_weekday.len());
                for (index, entry) in payload.by_weekday.into_iter().enumerate() {
                    let weekday = weekday_at(entry.weekday, "byWeekday", index)?;
                    selected.push(weekday);
                    times.insert(weekday, entry.time);
                }
                build_weekly(&selected, &times)
            }
            RecurrenceKind::Monthly if !payload.nth_weekdays.is_empty() => {
                let entries = payload
                    .nth_weekdays
                    .into_iter()
                    .enumerate()
                    .map(|(index, entry)| -> Result<MonthlyWeekInput, ValidationError> {
                        Ok(MonthlyWeekInput {
                            weekday: weekday_at(entry.weekday, "nthWeekdays", index)?,
                            nth: entry.nth,
                            time: entry.time,
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                monthly_by_week(&entries)
            }
            RecurrenceKind::Monthly => {
                let day = payload.by_month_day.ok_or_else(|| {
                    ValidationError::new(
                        "byMonthDay",
                        "monthly recurrence needs byMonthDay or nthWeekdays",
                    )
                })?;
                let time = TimeInput::new(
                    payload.start_time.unwrap_or_default(),
                    payload.end_time.unwrap_or_default(),
                );
                monthly_by_day(day, &time)
            }
            RecurrenceKind::Custom => build_custom(&payload.custom_recurrence_dates),
        }
    }
}

impl RecurrencePayload {
    /// Collections that do not belong to the declared type must be empty.
    fn reject_foreign_fields(&self) -> Result<(), ValidationError> {
        let kind = self.recurrence_type;
        let present = [
            ("byWeekday", !self.by_weekday.is_empty(), RecurrenceKind::Weekly),
            ("byMonthDay", self.by_month_day.is_some(), RecurrenceKind::Monthly),
            ("nthWeekdays", !self.nth_weekdays.is_empty(), RecurrenceKind::Monthly),
            (
                "customRecurrenceDates",
                !self.custom_recurrence_dates.is_empty(),
                RecurrenceKind::Custom,
            ),
        ];

        for (field, is_present, owner) in present {
            if is_present && owner != kind {
                return Err(ValidationError::new(
                    field,
                    format!("not allowed for {kind} recurrence"),
                ));
            }
        }

        if self.by_month_day.is_some() && !self.nth_weekdays.is_empty() {
            return Err(ValidationError::new(
                "byMonthDay",
                "cannot be combined with nthWeekdays",
            ));
        }
        Ok(())
    }
}

fn weekday_at(index_value: u8, field: &str, position: usize) -> Result<Weekday, ValidationError> {
    weekday_from_index(index_value).ok_or_else(|| {
        ValidationError::new(
            format!("{field}[{position}].weekday"),
            format!("{index_value} is not a weekday (expected 0-6)"),
        )
    })
}

/// Serde adapter for optional `HH:mm` times; blank strings read as `None`.
pub(crate) mod hhmm_option {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::datetime::parse_local_time;

    #[expect(clippy::ref_option, reason = "Signature required by serde `with`")]
    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_some(&time.format("%H:%M").to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_local_time(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
