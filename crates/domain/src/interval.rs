//! Interval — a continuous span during which the switch should be on.

use serde::Serialize;

use crate::error::ScheduleError;
use crate::time::LocalTime;

/// A validated `start < stop` span with an optional price annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Interval {
    start: LocalTime,
    stop: LocalTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    cost: Option<f64>,
}

impl Interval {
    /// Create an interval.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::InvalidInterval`] unless `start < stop`.
    pub fn new(start: LocalTime, stop: LocalTime, cost: Option<f64>) -> Result<Self, ScheduleError> {
        if start >= stop {
            return Err(ScheduleError::InvalidInterval {
                start: start.to_rfc3339(),
                stop: stop.to_rfc3339(),
            });
        }
        Ok(Self { start, stop, cost })
    }

    #[must_use]
    pub fn start(&self) -> LocalTime {
        self.start
    }

    #[must_use]
    pub fn stop(&self) -> LocalTime {
        self.stop
    }

    #[must_use]
    pub fn cost(&self) -> Option<f64> {
        self.cost
    }

    /// Whether `now` lies strictly inside the interval.
    #[must_use]
    pub fn contains(&self, now: &LocalTime) -> bool {
        *now > self.start && *now < self.stop
    }

    /// Length of the interval in whole hours.
    #[must_use]
    pub fn hours(&self) -> i64 {
        (self.stop - self.start).num_hours()
    }
}

/// Whether the schedule demands the switch be on at `now`.
#[must_use]
pub fn demands_on(intervals: &[Interval], now: &LocalTime) -> bool {
    intervals.iter().any(|interval| interval.contains(now))
}

/// Total whole hours covered by `intervals`.
#[must_use]
pub fn total_hours(intervals: &[Interval]) -> i64 {
    intervals.iter().map(Interval::hours).sum()
}
