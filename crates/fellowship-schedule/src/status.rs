//! Lifecycle status of a single program occurrence relative to the current time.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::{LocalZone, parse_calendar_date, parse_local_time};

/// Where an occurrence sits in its lifecycle. Derived on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OccurrenceStatus {
    Upcoming,
    Ongoing,
    /// Finished, but no attendance has been recorded yet.
    Pending,
    Past,
}

impl OccurrenceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Pending => "pending",
            Self::Past => "past",
        }
    }
}

impl std::fmt::Display for OccurrenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw occurrence fields as they arrive from the backend, plus the instant to judge against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInput {
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default)]
    pub has_attendance: bool,
    pub now: DateTime<Utc>,
}

/// ## Summary
/// Classifies an occurrence as upcoming, ongoing, pending or past.
///
/// Rules, first match wins:
/// 1. unparseable date: `Upcoming`
/// 2. missing or malformed start/end time: `Upcoming`
/// 3. `now` before the start: `Upcoming`
/// 4. start <= `now` < end: `Ongoing`
/// 5. `now` at or after the end: `Past` with attendance, otherwise `Pending`
///
/// Never fails; every branch that cannot judge the input falls back to `Upcoming`.
#[must_use]
pub fn resolve_status(input: &StatusInput, zone: &LocalZone) -> OccurrenceStatus {
    let date = match parse_calendar_date(&input.date) {
        Ok(date) => date,
        Err(err) => {
            tracing::trace!(date = %input.date, error = %err, "Unparseable occurrence date, treating as upcoming");
            return OccurrenceStatus::Upcoming;
        }
    };

    let Some(start) = parse_optional_time(input.start_time.as_deref(), "start") else {
        return OccurrenceStatus::Upcoming;
    };
    let Some(end) = parse_optional_time(input.end_time.as_deref(), "end") else {
        return OccurrenceStatus::Upcoming;
    };

    classify(date, start, end, input.has_attendance, input.now, zone)
}

fn parse_optional_time(value: Option<&str>, which: &'static str) -> Option<NaiveTime> {
    let Some(raw) = value else {
        tracing::trace!(which, "Occurrence time missing, treating as upcoming");
        return None;
    };
    match parse_local_time(raw) {
        Ok(time) => Some(time),
        Err(err) => {
            tracing::trace!(which, value = %raw, error = %err, "Malformed occurrence time, treating as upcoming");
            None
        }
    }
}

/// Status of an occurrence whose date and times are already parsed.
pub(crate) fn classify(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    has_attendance: bool,
    now: DateTime<Utc>,
    zone: &LocalZone,
) -> OccurrenceStatus {
    let (event_start, event_end) = match (
        zone.combine_lenient(date, start),
        zone.combine_lenient(date, end),
    ) {
        (Ok(event_start), Ok(event_end)) => (event_start, event_end),
        (Err(err), _) | (_, Err(err)) => {
            tracing::trace!(%date, error = %err, "Occurrence cannot be anchored, treating as upcoming");
            return OccurrenceStatus::Upcoming;
        }
    };

    if now < event_start {
        return OccurrenceStatus::Upcoming;
    }
    if now < event_end {
        return OccurrenceStatus::Ongoing;
    }
    if now >= event_end {
        return if has_attendance {
            OccurrenceStatus::Past
        } else {
            OccurrenceStatus::Pending
        };
    }

    OccurrenceStatus::Upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn lagos(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        chrono_tz::Tz::Africa__Lagos
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn input(start: Option<&str>, end: Option<&str>, now: DateTime<Utc>) -> StatusInput {
        StatusInput {
            date: "2025-01-10".to_string(),
            start_time: start.map(String::from),
            end_time: end.map(String::from),
            has_attendance: false,
            now,
        }
    }

    #[test]
    fn test_ongoing_during_event() {
        let status = resolve_status(
            &input(Some("09:00"), Some("11:00"), lagos(2025, 1, 10, 10, 0)),
            &LocalZone::default(),
        );
        assert_eq!(status, OccurrenceStatus::Ongoing);
    }

    #[test]
    fn test_pending_after_event_without_attendance() {
        let status = resolve_status(
            &input(Some("09:00"), Some("11:00"), lagos(2025, 1, 10, 12, 0)),
            &LocalZone::default(),
        );
        assert_eq!(status, OccurrenceStatus::Pending);
    }

    #[test]
    fn test_past_after_event_with_attendance() {
        let mut input = input(Some("09:00"), Some("11:00"), lagos(2025, 1, 10, 12, 0));
        input.has_attendance = true;
        assert_eq!(
            resolve_status(&input, &LocalZone::default()),
            OccurrenceStatus::Past
        );
    }

    #[test]
    fn test_upcoming_before_start() {
        let status = resolve_status(
            &input(Some("09:00"), Some("11:00"), lagos(2025, 1, 10, 8, 59)),
            &LocalZone::default(),
        );
        assert_eq!(status, OccurrenceStatus::Upcoming);
    }

    #[test]
    fn test_start_boundary_is_ongoing() {
        let status = resolve_status(
            &input(Some("09:00"), Some("11:00"), lagos(2025, 1, 10, 9, 0)),
            &LocalZone::default(),
        );
        assert_eq!(status, OccurrenceStatus::Ongoing);
    }

    #[test]
    fn test_end_boundary_is_not_ongoing() {
        let status = resolve_status(
            &input(Some("09:00"), Some("11:00"), lagos(2025, 1, 10, 11, 0)),
            &LocalZone::default(),
        );
        assert_eq!(status, OccurrenceStatus::Pending);
    }

    #[test]
    fn test_unparseable_date_is_upcoming() {
        let mut input = input(Some("09:00"), Some("11:00"), lagos(2030, 1, 1, 0, 0));
        input.date = "10/01/2025".to_string();
        input.has_attendance = true;
        assert_eq!(
            resolve_status(&input, &LocalZone::default()),
            OccurrenceStatus::Upcoming
        );
    }

    #[test]
    fn test_missing_or_malformed_time_is_upcoming() {
        let long_after = lagos(2030, 1, 1, 0, 0);
        let cases = [
            (None, Some("11:00")),
            (Some("09:00"), None),
            (Some(""), Some("11:00")),
            (Some("9:00"), Some("11:00")),
            (Some("09:00"), Some("11:00:00")),
            (Some("25:00"), Some("26:00")),
        ];
        for (start, end) in cases {
            assert_eq!(
                resolve_status(&input(start, end, long_after), &LocalZone::default()),
                OccurrenceStatus::Upcoming,
                "start={start:?} end={end:?}"
            );
        }
    }

    #[test]
    fn test_zone_changes_the_answer() {
        // 09:30 UTC is 10:30 in Lagos but only 04:30 in New York
        let now = Utc.with_ymd_and_hms(2025, 1, 10, 9, 30, 0).unwrap();
        let input = input(Some("09:00"), Some("11:00"), now);

        assert_eq!(
            resolve_status(&input, &LocalZone::default()),
            OccurrenceStatus::Ongoing
        );
        let new_york = LocalZone::from_name("America/New_York").unwrap();
        assert_eq!(resolve_status(&input, &new_york), OccurrenceStatus::Upcoming);
    }

    #[test]
    fn test_status_display_and_serde() {
        assert_eq!(OccurrenceStatus::Pending.to_string(), "pending");
        assert_eq!(
            serde_json::to_string(&OccurrenceStatus::Ongoing).unwrap(),
            "\"ongoing\""
        );
    }
}
