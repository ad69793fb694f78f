//! Human-readable descriptions of recurrence rules.

use chrono::{Datelike, NaiveDate};

use super::spec::RecurrenceSpec;
use crate::datetime::{nth_weekday_of_month, weekday_name, with_ordinal_suffix};

/// `15th of each month` for a program starting on the 15th.
#[must_use]
pub fn monthly_by_date_label(anchor: NaiveDate) -> String {
    format!("{} of each month", with_ordinal_suffix(anchor.day()))
}

/// `3rd Sunday of each month`, or `Last Sunday of each month`.
#[must_use]
pub fn monthly_by_week_label(anchor: NaiveDate) -> String {
    format!("{} of each month", nth_weekday_of_month(anchor))
}

/// ## Summary
/// Describes `spec` for display next to a program starting on `anchor`.
///
/// Monthly rules without explicit entries fall back to the anchor date.
#[must_use]
pub fn label_for(spec: &RecurrenceSpec, anchor: NaiveDate) -> String {
    match spec {
        RecurrenceSpec::None => "Does not repeat".to_string(),
        RecurrenceSpec::Weekly(slots) if slots.is_empty() => "Weekly".to_string(),
        RecurrenceSpec::Weekly(slots) => format!(
            "Every {}",
            join_names(slots.iter().map(|slot| weekday_name(slot.weekday).to_string()))
        ),
        RecurrenceSpec::MonthlyByDate { day_of_month, .. } => {
            format!("{} of each month", with_ordinal_suffix(*day_of_month))
        }
        RecurrenceSpec::MonthlyByWeek(slots) if slots.is_empty() => monthly_by_week_label(anchor),
        RecurrenceSpec::MonthlyByWeek(slots) => format!(
            "{} of each month",
            join_names(slots.iter().map(|slot| slot.nth.to_string()))
        ),
        RecurrenceSpec::Custom(dates) if dates.len() == 1 => "On 1 custom date".to_string(),
        RecurrenceSpec::Custom(dates) => format!("On {} custom dates", dates.len()),
    }
}

/// `A`, `A and B`, `A, B and C`.
fn join_names(names: impl Iterator<Item = String>) -> String {
    let names: Vec<String> = names.collect();
    match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}
