//! One concrete dated instance of a program.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::datetime::LocalZone;
use crate::recurrence::TimeSlot;
use crate::status::{OccurrenceStatus, classify};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    pub date: NaiveDate,
    #[serde(default, with = "crate::wire::hhmm_option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "crate::wire::hhmm_option")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub has_attendance: bool,
}

impl Occurrence {
    /// A fresh occurrence with no attendance recorded.
    #[must_use]
    pub const fn scheduled(date: NaiveDate, slot: TimeSlot) -> Self {
        Self {
            date,
            start_time: Some(slot.start),
            end_time: Some(slot.end),
            has_attendance: false,
        }
    }

    #[must_use]
    pub fn slot(&self) -> Option<TimeSlot> {
        Some(TimeSlot::new(self.start_time?, self.end_time?))
    }

    /// ## Summary
    /// Status of this occurrence at `now`. Occurrences without both times are
    /// `Upcoming`.
    #[must_use]
    pub fn status(&self, now: DateTime<Utc>, zone: &LocalZone) -> OccurrenceStatus {
        match self.slot() {
            Some(slot) => classify(
                self.date,
                slot.start,
                slot.end,
                self.has_attendance,
                now,
                zone,
            ),
            None => OccurrenceStatus::Upcoming,
        }
    }

    pub fn record_attendance(&mut self) {
        self.has_attendance = true;
    }

    /// Moves the occurrence; recorded attendance is kept.
    pub fn reschedule(&mut self, date: NaiveDate, slot: TimeSlot) {
        self.date = date;
        self.start_time = Some(slot.start);
        self.end_time = Some(slot.end);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sunday_service() -> Occurrence {
        Occurrence::scheduled(
            NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            TimeSlot::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
                NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            ),
        )
    }

    #[test]
    fn test_status_follows_attendance() {
        let zone = LocalZone::default();
        let after = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();

        let mut occurrence = sunday_service();
        assert_eq!(occurrence.status(after, &zone), OccurrenceStatus::Pending);

        occurrence.record_attendance();
        assert!(occurrence.has_attendance);
        assert_eq!(occurrence.status(after, &zone), OccurrenceStatus::Past);
    }

    #[test]
    fn test_missing_time_is_upcoming() {
        let mut occurrence = sunday_service();
        occurrence.end_time = None;

        let much_later = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            occurrence.status(much_later, &LocalZone::default()),
            OccurrenceStatus::Upcoming
        );
    }

    #[test]
    fn test_reschedule_keeps_attendance() {
        let mut occurrence = sunday_service();
        occurrence.record_attendance();

        let date = NaiveDate::from_ymd_opt(2025, 6, 22).unwrap();
        let slot = TimeSlot::new(
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(18, 30, 0).unwrap(),
        );
        occurrence.reschedule(date, slot);

        assert_eq!(occurrence.date, date);
        assert_eq!(occurrence.slot(), Some(slot));
        assert!(occurrence.has_attendance);
    }

    #[test]
    fn test_serializes_with_hhmm_times() {
        let json = serde_json::to_value(sunday_service()).expect("serializable");
        assert_eq!(
            json,
            serde_json::json!({
                "date": "2025-06-15",
                "startTime": "09:00",
                "endTime": "11:00",
                "hasAttendance": false,
            })
        );

        let back: Occurrence = serde_json::from_value(json).expect("deserializable");
        assert_eq!(back, sunday_service());
    }
}
