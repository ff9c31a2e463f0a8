//! Timespec resolution and formatting.
//!
//! Device timespecs are six-field cron expressions (seconds first). The
//! triggers cheapswitch writes only carry a time of day, so resolution pins
//! every timespec to one [`LocalDay`] to make triggers comparable.

use std::str::FromStr;

use chrono::{Duration, Offset, TimeZone};

use crate::error::ScheduleError;
use crate::time::{LocalDay, LocalTime};

/// Day-of-week field matching every day.
const EVERY_DAY: &str = "MON,TUE,WED,THU,FRI,SAT,SUN";

/// Resolve `timespec` to its first occurrence after local midnight of `day`.
///
/// An occurrence landing on a later date (a `00:00:00` timespec always does,
/// since the anchor itself is excluded) is moved back one day so that every
/// resolved trigger shares `day`'s date. A time of day the clocks skip on
/// `day` is read with the offset in force before the gap, so 02:30 on a
/// spring-forward date becomes 03:30.
///
/// # Errors
///
/// - [`ScheduleError::MalformedTimespec`] if the expression does not parse
/// - [`ScheduleError::NoOccurrence`] if it never fires after the anchor
/// - [`ScheduleError::NonexistentLocalTime`] if `day` has no local midnight
pub fn resolve(timespec: &str, day: &LocalDay) -> Result<LocalTime, ScheduleError> {
    let schedule =
        cron::Schedule::from_str(timespec).map_err(|source| ScheduleError::MalformedTimespec {
            timespec: timespec.to_string(),
            source,
        })?;
    let anchor = day.midnight()?;
    let next = schedule
        .after(&anchor)
        .next()
        .ok_or_else(|| ScheduleError::NoOccurrence {
            timespec: timespec.to_string(),
        })?;
    if next.date_naive() == anchor.date_naive() {
        return Ok(next);
    }
    day_before(&next)
}

/// The same wall-clock time one day before `t`.
fn day_before(t: &LocalTime) -> Result<LocalTime, ScheduleError> {
    let naive = t.naive_local() - Duration::days(1);
    let tz = t.timezone();
    if let Some(shifted) = tz.from_local_datetime(&naive).earliest() {
        return Ok(shifted);
    }
    let midnight = LocalDay::new(tz, naive.date()).midnight()?;
    let offset = i64::from(midnight.offset().fix().local_minus_utc());
    Ok(tz.from_utc_datetime(&(naive - Duration::seconds(offset))))
}

/// Format the time of day of `t` as a timespec firing every day.
#[must_use]
pub fn encode(t: &LocalTime) -> String {
    format!("{} * * {EVERY_DAY}", t.format("%S %M %H"))
}
