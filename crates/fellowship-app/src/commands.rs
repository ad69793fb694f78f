use std::path::Path;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use fellowship_core::config::Settings;
use fellowship_schedule::datetime::{LocalZone, nth_weekday_of_month, weekday_index};
use fellowship_schedule::recurrence::{
    ProjectionPolicy, ProjectionWindow, RecurrenceSpec, label_for, project_occurrences,
};
use fellowship_schedule::wire::RecurrencePayload;
use fellowship_schedule::{Occurrence, OccurrenceStatus, StatusInput, resolve_status};

use crate::cli::Command;

/// ## Summary
/// Runs one CLI command and returns what should be printed.
///
/// ## Errors
/// Returns an error if the configured timezone is unknown, a payload file
/// cannot be read or parsed, or the recurrence it describes is invalid.
pub fn run(command: &Command, settings: &Settings) -> anyhow::Result<String> {
    let zone = LocalZone::from_settings(&settings.schedule)
        .context("Invalid schedule.timezone in configuration")?;

    match command {
        Command::Status {
            date,
            start,
            end,
            attended,
            now,
        } => {
            let input = StatusInput {
                date: date.clone(),
                start_time: start.clone(),
                end_time: end.clone(),
                has_attendance: *attended,
                now: now.unwrap_or_else(Utc::now),
            };
            Ok(status(&input, &zone).to_string())
        }
        Command::Project {
            payload,
            from,
            until,
        } => {
            let spec = read_spec(payload)?;
            let occurrences = project(
                &spec,
                *from,
                *until,
                &ProjectionPolicy::from(&settings.schedule),
            )?;
            Ok(serde_json::to_string_pretty(&occurrences)?)
        }
        Command::Label { payload, anchor } => Ok(label_for(&read_spec(payload)?, *anchor)),
        Command::NthWeekday { date } => Ok(serde_json::to_string_pretty(&nth_weekday(*date))?),
    }
}

fn status(input: &StatusInput, zone: &LocalZone) -> OccurrenceStatus {
    let status = resolve_status(input, zone);
    tracing::debug!(date = %input.date, zone = zone.name(), %status, "Resolved occurrence status");
    status
}

/// ## Summary
/// Expands `spec` from `from`, either to `until` or over the policy's default window.
///
/// ## Errors
/// Returns an error if the recurrence cannot be expanded.
pub fn project(
    spec: &RecurrenceSpec,
    from: NaiveDate,
    until: Option<NaiveDate>,
    policy: &ProjectionPolicy,
) -> anyhow::Result<Vec<Occurrence>> {
    let window = match until {
        Some(end) => ProjectionWindow::new(from, end).with_limit(policy.max_occurrences),
        None => ProjectionWindow::from_policy(from, policy),
    };
    let occurrences = project_occurrences(spec, &window)?;
    tracing::info!(
        kind = %spec.kind(),
        start = %window.start,
        end = %window.end,
        count = occurrences.len(),
        "Projected recurrence"
    );
    Ok(occurrences)
}

fn nth_weekday(date: NaiveDate) -> serde_json::Value {
    let nth = nth_weekday_of_month(date);
    serde_json::json!({
        "weekday": weekday_index(nth.weekday),
        "nth": nth.ordinal.as_i8(),
        "label": nth.to_string(),
    })
}

/// ## Summary
/// Parses a backend recurrence payload and validates it into a rule.
///
/// ## Errors
/// Returns an error if the JSON does not match the payload shape or the
/// payload fails validation.
pub fn parse_spec(json: &str) -> anyhow::Result<RecurrenceSpec> {
    let payload: RecurrencePayload =
        serde_json::from_str(json).context("Malformed recurrence payload")?;
    Ok(RecurrenceSpec::try_from(payload)?)
}

fn read_spec(path: &Path) -> anyhow::Result<RecurrenceSpec> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_spec(&json).with_context(|| format!("Invalid recurrence in {}", path.display()))
}
