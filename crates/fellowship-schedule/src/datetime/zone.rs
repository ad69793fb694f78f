//! Anchoring of naive program dates and times to a configured IANA timezone.

use std::str::FromStr;

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use fellowship_core::config::ScheduleConfig;

use super::DateTimeError;

/// The timezone program dates and times are interpreted in.
///
/// Defaults to `Africa/Lagos`; any IANA zone can be configured through
/// `schedule.timezone`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalZone {
    tz: Tz,
}

impl Default for LocalZone {
    fn default() -> Self {
        Self::new(Tz::Africa__Lagos)
    }
}

impl LocalZone {
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// ## Summary
    /// Resolves an IANA timezone name such as `Africa/Lagos`.
    ///
    /// ## Errors
    /// Returns `DateTimeError::UnknownTimezone` if the name is not in the tz database.
    pub fn from_name(name: &str) -> Result<Self, DateTimeError> {
        Tz::from_str(name.trim())
            .map(Self::new)
            .map_err(|_err| DateTimeError::UnknownTimezone(name.to_string()))
    }

    /// ## Summary
    /// Resolves the zone named by the schedule settings.
    ///
    /// ## Errors
    /// Returns `DateTimeError::UnknownTimezone` if the configured name is unknown.
    pub fn from_settings(settings: &ScheduleConfig) -> Result<Self, DateTimeError> {
        Self::from_name(&settings.timezone)
    }

    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Calendar date in this zone at the given instant.
    #[must_use]
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    /// ## Summary
    /// Anchors a local date and time in this zone and returns the UTC instant.
    ///
    /// Ambiguous times (DST fold) resolve to the first occurrence.
    ///
    /// ## Errors
    /// Returns `DateTimeError::NonExistentTime` if the local time falls in a DST gap.
    pub fn combine(&self, date: NaiveDate, time: NaiveTime) -> Result<DateTime<Utc>, DateTimeError> {
        let local = NaiveDateTime::new(date, time);

        match self.tz.from_local_datetime(&local) {
            LocalResult::None => Err(DateTimeError::NonExistentTime(format!(
                "{local} in timezone {}",
                self.name()
            ))),
            LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earliest, _latest) => Ok(earliest.with_timezone(&Utc)),
        }
    }

    /// ## Summary
    /// Like [`LocalZone::combine`], but shifts a time inside a DST gap forward
    /// by one hour instead of failing.
    ///
    /// ## Errors
    /// Returns an error only if the shifted time is still not representable.
    pub fn combine_lenient(
        &self,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Result<DateTime<Utc>, DateTimeError> {
        match self.combine(date, time) {
            Err(DateTimeError::NonExistentTime(reason)) => {
                tracing::trace!(%reason, "Shifting local time out of DST gap");
                let shifted = NaiveDateTime::new(date, time) + chrono::Duration::hours(1);
                self.combine(shifted.date(), shifted.time())
            }
            other => other,
        }
    }
}
