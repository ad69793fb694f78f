//! Recurrence choices accumulated while a program form is being filled in.
//!
//! Every change of recurrence type clears all accumulated weekday,
//! nth-weekday and custom-date selections, so data entered for one type can
//! never be submitted under another.

use std::collections::HashMap;

use chrono::{NaiveDate, Weekday};

use super::builder::{
    CustomDateInput, MonthlyWeekInput, build_custom, build_monthly_by_date, build_monthly_by_week,
    build_weekly, monthly_by_week,
};
use super::spec::{RecurrenceKind, RecurrenceSpec, TimeInput};
use crate::datetime::weekday_name;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MonthlyMode {
    /// Same day number each month.
    #[default]
    ByDate,
    /// Nth weekday each month.
    ByWeek,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectionState {
    #[default]
    None,
    Weekly,
    Monthly(MonthlyMode),
    Custom,
}

impl SelectionState {
    #[must_use]
    pub const fn kind(self) -> RecurrenceKind {
        match self {
            Self::None => RecurrenceKind::None,
            Self::Weekly => RecurrenceKind::Weekly,
            Self::Monthly(_) => RecurrenceKind::Monthly,
            Self::Custom => RecurrenceKind::Custom,
        }
    }
}

impl From<RecurrenceKind> for SelectionState {
    fn from(kind: RecurrenceKind) -> Self {
        match kind {
            RecurrenceKind::None => Self::None,
            RecurrenceKind::Weekly => Self::Weekly,
            RecurrenceKind::Monthly => Self::Monthly(MonthlyMode::default()),
            RecurrenceKind::Custom => Self::Custom,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecurrenceSelection {
    state: SelectionState,
    weekdays: Vec<Weekday>,
    weekday_times: HashMap<Weekday, TimeInput>,
    nth_weekdays: Vec<MonthlyWeekInput>,
    custom_dates: Vec<CustomDateInput>,
}

impl RecurrenceSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> SelectionState {
        self.state
    }

    #[must_use]
    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    #[must_use]
    pub fn nth_weekdays(&self) -> &[MonthlyWeekInput] {
        &self.nth_weekdays
    }

    #[must_use]
    pub fn custom_dates(&self) -> &[CustomDateInput] {
        &self.custom_dates
    }

    /// Whether any type-specific selection has been made.
    #[must_use]
    pub fn has_selections(&self) -> bool {
        !(self.weekdays.is_empty()
            && self.weekday_times.is_empty()
            && self.nth_weekdays.is_empty()
            && self.custom_dates.is_empty())
    }

    /// ## Summary
    /// Moves to `next`. Returns `true` and clears every accumulated
    /// selection if the state actually changed.
    pub fn transition(&mut self, next: SelectionState) -> bool {
        if self.state == next {
            return false;
        }

        tracing::trace!(from = ?self.state, to = ?next, "Recurrence type changed, clearing selections");
        self.state = next;
        self.weekdays.clear();
        self.weekday_times.clear();
        self.nth_weekdays.clear();
        self.custom_dates.clear();
        true
    }

    /// ## Summary
    /// Selects `weekday` if it is not selected, otherwise deselects it and
    /// forgets its times. Returns whether it is now selected.
    ///
    /// ## Errors
    /// Returns a `ValidationError` unless the selection is weekly.
    pub fn toggle_weekday(&mut self, weekday: Weekday) -> Result<bool, ValidationError> {
        self.require(SelectionState::Weekly, "byWeekday")?;

        if let Some(position) = self.weekdays.iter().position(|day| *day == weekday) {
            self.weekdays.remove(position);
            self.weekday_times.remove(&weekday);
            Ok(false)
        } else {
            self.weekdays.push(weekday);
            Ok(true)
        }
    }

    /// ## Summary
    /// Sets the times of a selected weekday.
    ///
    /// ## Errors
    /// Returns a `ValidationError` unless the selection is weekly and
    /// `weekday` is selected.
    pub fn set_weekday_time(&mut self, weekday: Weekday, time: TimeInput) -> Result<(), ValidationError> {
        self.require(SelectionState::Weekly, "byWeekday")?;
        if !self.weekdays.contains(&weekday) {
            return Err(ValidationError::new(
                weekday_name(weekday),
                "weekday is not selected",
            ));
        }
        self.weekday_times.insert(weekday, time);
        Ok(())
    }

    /// ## Errors
    /// Returns a `ValidationError` unless the selection is monthly by week.
    pub fn add_nth_weekday(&mut self, entry: MonthlyWeekInput) -> Result<(), ValidationError> {
        self.require(SelectionState::Monthly(MonthlyMode::ByWeek), "nthWeekdays")?;
        self.nth_weekdays.push(entry);
        Ok(())
    }

    /// ## Errors
    /// Returns a `ValidationError` unless the selection is custom.
    pub fn add_custom_date(&mut self, entry: CustomDateInput) -> Result<(), ValidationError> {
        self.require(SelectionState::Custom, "customRecurrenceDates")?;
        self.custom_dates.push(entry);
        Ok(())
    }

    pub fn remove_custom_date(&mut self, index: usize) -> Option<CustomDateInput> {
        (index < self.custom_dates.len()).then(|| self.custom_dates.remove(index))
    }

    /// ## Summary
    /// Validates the current selection and produces its [`RecurrenceSpec`].
    ///
    /// `anchor` is the program's start date; `shared` is the program's own
    /// start/end time, used by monthly-by-date and, when no rows were added,
    /// by monthly-by-week seeded from the anchor's nth weekday.
    ///
    /// ## Errors
    /// Returns the first `ValidationError` the current recurrence type's rules produce.
    pub fn build(&self, anchor: NaiveDate, shared: &TimeInput) -> Result<RecurrenceSpec, ValidationError> {
        match self.state {
            SelectionState::None => Ok(RecurrenceSpec::None),
            SelectionState::Weekly => build_weekly(&self.weekdays, &self.weekday_times),
            SelectionState::Monthly(MonthlyMode::ByDate) => build_monthly_by_date(anchor, shared),
            SelectionState::Monthly(MonthlyMode::ByWeek) if self.nth_weekdays.is_empty() => {
                let nth = build_monthly_by_week(anchor);
                monthly_by_week(&[MonthlyWeekInput {
                    weekday: nth.weekday,
                    nth: nth.ordinal.as_i8(),
                    time: shared.clone(),
                }])
            }
            SelectionState::Monthly(MonthlyMode::ByWeek) => monthly_by_week(&self.nth_weekdays),
            SelectionState::Custom => build_custom(&self.custom_dates),
        }
    }

    fn require(&self, expected: SelectionState, field: &str) -> Result<(), ValidationError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ValidationError::new(
                field,
                format!("not available for {} recurrence", self.state.kind()),
            ))
        }
    }
}
