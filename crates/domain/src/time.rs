//! Time helpers — the resolution day every timespec is anchored to.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::ScheduleError;

/// Instant in the resolution timezone.
pub type LocalTime = DateTime<Tz>;

/// Return the current time in `tz`.
#[must_use]
pub fn now(tz: Tz) -> LocalTime {
    Utc::now().with_timezone(&tz)
}

/// A calendar day in a given timezone.
///
/// All triggers compared against each other must be resolved against the
/// same `LocalDay`, otherwise their instants are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalDay {
    tz: Tz,
    date: NaiveDate,
}

impl LocalDay {
    /// Build a day from its parts.
    #[must_use]
    pub fn new(tz: Tz, date: NaiveDate) -> Self {
        Self { tz, date }
    }

    /// The day `instant` falls on, in the instant's own timezone.
    #[must_use]
    pub fn of(instant: &LocalTime) -> Self {
        Self {
            tz: instant.timezone(),
            date: instant.date_naive(),
        }
    }

    /// Today, according to the wall clock.
    #[must_use]
    pub fn today(tz: Tz) -> Self {
        Self::of(&now(tz))
    }

    #[must_use]
    pub fn tz(&self) -> Tz {
        self.tz
    }

    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Local 00:00:00 of this day.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::NonexistentLocalTime`] when the timezone skips
    /// midnight on this date.
    pub fn midnight(&self) -> Result<LocalTime, ScheduleError> {
        self.tz
            .from_local_datetime(&self.date.and_time(chrono::NaiveTime::MIN))
            .earliest()
            .ok_or(ScheduleError::NonexistentLocalTime {
                date: self.date,
                tz: self.tz,
            })
    }
}
