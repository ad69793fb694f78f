use chrono::NaiveDate;

use super::builder::single_slot;
use super::project::{ProjectionPolicy, ProjectionWindow, project_occurrences};
use super::spec::{RecurrenceSpec, TimeInput, TimeSlot};
use crate::datetime::parse_calendar_date;
use crate::error::{ScheduleResult, ValidationError};
use crate::occurrence::Occurrence;

/// A program definition: when it starts, its own times, and how it repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub start_date: NaiveDate,
    pub slot: TimeSlot,
    pub recurrence: RecurrenceSpec,
}

impl Schedule {
    /// ## Summary
    /// Validates a program's start date and times as entered in the form.
    ///
    /// ## Errors
    /// Returns a `ValidationError` on `startDate` or `program` if either does not parse.
    pub fn from_input(
        start_date: &str,
        time: &TimeInput,
        recurrence: RecurrenceSpec,
    ) -> Result<Self, ValidationError> {
        let start_date = parse_calendar_date(start_date)
            .map_err(|err| ValidationError::new("startDate", err.to_string()))?;
        Ok(Self {
            start_date,
            slot: single_slot(time)?,
            recurrence,
        })
    }

    /// ## Summary
    /// Dated occurrences of this program.
    ///
    /// A non-repeating program yields its single start date. Recurring ones
    /// are projected from the start date until `window_end`, or for
    /// `policy.months` when no end is given.
    ///
    /// ## Errors
    /// Returns an error if the recurrence cannot be expanded.
    pub fn occurrences(
        &self,
        policy: &ProjectionPolicy,
        window_end: Option<NaiveDate>,
    ) -> ScheduleResult<Vec<Occurrence>> {
        if self.recurrence == RecurrenceSpec::None {
            return Ok(vec![Occurrence::scheduled(self.start_date, self.slot)]);
        }

        let window = match window_end {
            Some(end) => ProjectionWindow::new(self.start_date, end).with_limit(policy.max_occurrences),
            None => ProjectionWindow::from_policy(self.start_date, policy),
        };
        project_occurrences(&self.recurrence, &window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_one_off_program_has_single_occurrence() {
        let schedule = Schedule::from_input(
            "2025-06-15",
            &TimeInput::new("09:00", "11:00"),
            RecurrenceSpec::None,
        )
        .expect("valid program");

        let occurrences = schedule
            .occurrences(&ProjectionPolicy::default(), None)
            .expect("projectable");
        assert_eq!(occurrences.len(), 1);
        assert_eq!(
            occurrences[0].start_time,
            Some(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_from_input_rejects_bad_start_date() {
        let err = Schedule::from_input(
            "15-06-2025",
            &TimeInput::new("09:00", "11:00"),
            RecurrenceSpec::None,
        )
        .expect_err("wrong date order");
        assert_eq!(err.field, "startDate");
    }

    #[test]
    fn test_from_input_rejects_missing_time() {
        let err = Schedule::from_input("2025-06-15", &TimeInput::new("09:00", ""), RecurrenceSpec::None)
            .expect_err("no end time");
        assert_eq!(err, ValidationError::new("program", "end time is required"));
    }
}
