//! Hour prices — the selected cheap hours handed over by the price source.

use chrono::Duration;
use serde::Serialize;

use crate::error::ScheduleError;
use crate::interval::Interval;
use crate::time::LocalTime;

/// One selected hour and its price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourPrice {
    pub start: LocalTime,
    pub price: f64,
}

impl HourPrice {
    #[must_use]
    pub fn end(&self) -> LocalTime {
        self.start + Duration::hours(1)
    }
}

/// Merge runs of consecutive hours into intervals.
///
/// Hours are sorted first and duplicates dropped. Each interval's cost is the
/// mean price of the hours it covers.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidInterval`] if a merged run does not end
/// after it starts.
pub fn intervals_from_hours(hours: &[HourPrice]) -> Result<Vec<Interval>, ScheduleError> {
    let mut sorted = hours.to_vec();
    sorted.sort_by_key(|h| h.start);
    sorted.dedup_by_key(|h| h.start);

    let mut intervals = Vec::new();
    let mut run: Option<(LocalTime, LocalTime, f64, u32)> = None;
    for hour in sorted {
        run = match run {
            Some((start, end, sum, count)) if end == hour.start => {
                Some((start, hour.end(), sum + hour.price, count + 1))
            }
            Some((start, end, sum, count)) => {
                intervals.push(Interval::new(start, end, Some(sum / f64::from(count)))?);
                Some((hour.start, hour.end(), hour.price, 1))
            }
            None => Some((hour.start, hour.end(), hour.price, 1)),
        };
    }
    if let Some((start, end, sum, count)) = run {
        intervals.push(Interval::new(start, end, Some(sum / f64::from(count)))?);
    }
    Ok(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use chrono_tz::Europe::Copenhagen;

    fn hour(h: u32, price: f64) -> HourPrice {
        HourPrice {
            start: Copenhagen.with_ymd_and_hms(2024, 3, 10, h, 0, 0).unwrap(),
            price,
        }
    }

    #[test]
    fn should_merge_consecutive_hours() {
        let intervals =
            intervals_from_hours(&[hour(2, 1.0), hour(3, 3.0), hour(7, 0.5)]).unwrap();
        assert_eq!(intervals.len(), 2);
        assert_eq!(intervals[0].start().hour(), 2);
        assert_eq!(intervals[0].stop().hour(), 4);
        assert_eq!(intervals[0].cost(), Some(2.0));
        assert_eq!(intervals[1].start().hour(), 7);
        assert_eq!(intervals[1].cost(), Some(0.5));
    }

    #[test]
    fn should_sort_and_deduplicate_hours() {
        let intervals =
            intervals_from_hours(&[hour(5, 1.0), hour(4, 1.0), hour(5, 1.0)]).unwrap();
        assert_eq!(intervals.len(), 1);
        assert_eq!(intervals[0].hours(), 2);
    }

    #[test]
    fn should_end_last_hour_at_next_midnight() {
        let intervals = intervals_from_hours(&[hour(23, 1.0)]).unwrap();
        assert_eq!(intervals[0].stop().hour(), 0);
        assert_eq!(intervals[0].stop().date_naive().to_string(), "2024-03-11");
    }

    #[test]
    fn should_return_nothing_for_no_hours() {
        assert!(intervals_from_hours(&[]).unwrap().is_empty());
    }
}
