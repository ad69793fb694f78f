//! Expansion of recurring rules into dated occurrences.
//!
//! Weekly and monthly rules are expressed as RFC 5545 RRULEs anchored at
//! midnight UTC on the window start, expanded with the `rrule` crate and
//! converted back to calendar dates. Times are carried separately per slot,
//! so the timezone never influences which dates are produced.

use chrono::{Datelike, Months, NaiveDate, Weekday};
use fellowship_core::config::ScheduleConfig;
use fellowship_core::constants::{DEFAULT_MAX_OCCURRENCES, DEFAULT_PROJECTION_MONTHS};
use rrule::RRuleSet;

use super::spec::{RecurrenceSpec, TimeSlot};
use crate::error::{ScheduleError, ScheduleResult};
use crate::occurrence::Occurrence;

/// How far ahead, and how many, occurrences a recurring program is expanded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionPolicy {
    pub months: u32,
    pub max_occurrences: u16,
}

impl Default for ProjectionPolicy {
    fn default() -> Self {
        Self {
            months: DEFAULT_PROJECTION_MONTHS,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
        }
    }
}

impl From<&ScheduleConfig> for ProjectionPolicy {
    fn from(config: &ScheduleConfig) -> Self {
        Self {
            months: config.projection_months,
            max_occurrences: config.max_occurrences,
        }
    }
}

/// Inclusive date range occurrences are produced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub limit: u16,
}

impl ProjectionWindow {
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            limit: DEFAULT_MAX_OCCURRENCES,
        }
    }

    /// ## Summary
    /// Window from `start` to `start + policy.months`, capped at
    /// `policy.max_occurrences`.
    #[must_use]
    pub fn from_policy(start: NaiveDate, policy: &ProjectionPolicy) -> Self {
        let end = start
            .checked_add_months(Months::new(policy.months))
            .unwrap_or(NaiveDate::MAX);
        Self {
            start,
            end,
            limit: policy.max_occurrences,
        }
    }

    #[must_use]
    pub const fn with_limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// ## Summary
/// Expands `spec` into concrete occurrences inside `window`.
///
/// - `Weekly`, `MonthlyByWeek` and `MonthlyByDate` produce every matching
///   date from `window.start` up to and including `window.end`, sorted by
///   date and start time and capped at `window.limit`. Months without the
///   requested day (the 31st, a 5th Sunday) are skipped.
/// - `Custom` returns its dates verbatim, in the order given.
/// - `None` produces nothing; a one-off program's date lives on the program.
///
/// ## Errors
/// Returns `ScheduleError::Expansion` if the generated rule is rejected by
/// the RRULE engine (e.g. dates outside its supported range).
pub fn project_occurrences(
    spec: &RecurrenceSpec,
    window: &ProjectionWindow,
) -> ScheduleResult<Vec<Occurrence>> {
    if let RecurrenceSpec::Custom(dates) = spec {
        return Ok(dates
            .iter()
            .map(|custom| Occurrence::scheduled(custom.date, custom.slot))
            .collect());
    }

    if window.end < window.start {
        tracing::trace!(start = %window.start, end = %window.end, "Empty projection window");
        return Ok(Vec::new());
    }

    let mut occurrences = Vec::new();
    match spec {
        RecurrenceSpec::None | RecurrenceSpec::Custom(_) => {}
        RecurrenceSpec::Weekly(slots) => {
            for weekly in slots {
                let rule = format!("FREQ=WEEKLY;BYDAY={}", byday_code(weekly.weekday));
                let dates = expand(&rule, window)?;
                push_matching(&mut occurrences, &dates, weekly.slot, |date| {
                    date.weekday() == weekly.weekday
                });
            }
        }
        RecurrenceSpec::MonthlyByWeek(slots) => {
            for monthly in slots {
                let rule = format!(
                    "FREQ=MONTHLY;BYDAY={}{}",
                    monthly.nth.ordinal.as_i8(),
                    byday_code(monthly.nth.weekday)
                );
                let dates = expand(&rule, window)?;
                push_matching(&mut occurrences, &dates, monthly.slot, |date| {
                    date.weekday() == monthly.nth.weekday
                });
            }
        }
        RecurrenceSpec::MonthlyByDate { day_of_month, slot } => {
            let rule = format!("FREQ=MONTHLY;BYMONTHDAY={day_of_month}");
            let dates = expand(&rule, window)?;
            push_matching(&mut occurrences, &dates, *slot, |date| {
                date.day() == *day_of_month
            });
        }
    }

    occurrences.sort_by_key(|occurrence| (occurrence.date, occurrence.start_time));
    occurrences.truncate(usize::from(window.limit));

    tracing::trace!(
        kind = %spec.kind(),
        count = occurrences.len(),
        "Projected occurrences"
    );
    Ok(occurrences)
}

fn push_matching(
    occurrences: &mut Vec<Occurrence>,
    dates: &[NaiveDate],
    slot: TimeSlot,
    matches: impl Fn(NaiveDate) -> bool,
) {
    occurrences.extend(
        dates
            .iter()
            .copied()
            .filter(|date| matches(*date))
            .map(|date| Occurrence::scheduled(date, slot)),
    );
}

/// Expands a single RRULE body over the window, returning the dates it hits.
fn expand(rule: &str, window: &ProjectionWindow) -> ScheduleResult<Vec<NaiveDate>> {
    let rrule_text = format!(
        "DTSTART:{}T000000Z\nRRULE:{rule};UNTIL={}T000000Z",
        window.start.format("%Y%m%d"),
        window.end.format("%Y%m%d"),
    );
    tracing::trace!(rrule = %rrule_text, "Expanding recurrence");

    let rrule_set: RRuleSet = rrule_text.parse().map_err(|err| {
        ScheduleError::Expansion(format!("Failed to parse RRULE '{rule}': {err}"))
    })?;

    // One spare slot in case the engine reports a non-matching DTSTART.
    let result = rrule_set.all(window.limit.saturating_add(1));
    if result.limited {
        tracing::debug!(rrule = %rule, limit = window.limit, "Recurrence expansion hit the occurrence limit");
    }

    Ok(result
        .dates
        .iter()
        .map(chrono::DateTime::date_naive)
        .filter(|date| window.contains(*date))
        .collect())
}

const fn byday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}
