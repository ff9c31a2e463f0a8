//! Encoding — turn intervals into the device's trigger list.

use chrono::{Duration, Timelike};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;
use crate::time::LocalTime;
use crate::timespec;
use crate::trigger::{Action, SwitchIntent, Trigger};

/// A device schedule collection, as listed by and written to the device.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceSchedule {
    #[serde(default)]
    pub jobs: Vec<Trigger>,
}

/// Encode `intervals` as one "on" and one "off" trigger each, in order.
///
/// All triggers share the `enabled` flag. A stop at exactly 00:00 is encoded
/// as 23:59 so that it resolves to the end of the day instead of its start.
#[must_use]
pub fn device_schedule(intervals: &[Interval], enabled: bool) -> DeviceSchedule {
    let mut jobs = Vec::with_capacity(intervals.len() * 2);
    for interval in intervals {
        jobs.push(Trigger::new(
            enabled,
            timespec::encode(&interval.start()),
            vec![Action::switch(SwitchIntent::On, interval.cost())],
        ));
        jobs.push(Trigger::new(
            enabled,
            timespec::encode(&before_midnight(interval.stop())),
            vec![Action::switch(SwitchIntent::Off, None)],
        ));
    }
    DeviceSchedule { jobs }
}

fn before_midnight(stop: LocalTime) -> LocalTime {
    if stop.hour() == 0 && stop.minute() == 0 {
        stop - Duration::minutes(1)
    } else {
        stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble;
    use crate::time::LocalDay;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Europe::Copenhagen;

    fn day() -> LocalDay {
        LocalDay::new(Copenhagen, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
    }

    fn at(d: u32, h: u32, m: u32) -> LocalTime {
        Copenhagen.with_ymd_and_hms(2024, 3, d, h, m, 0).unwrap()
    }

    fn interval(start: LocalTime, stop: LocalTime) -> Interval {
        Interval::new(start, stop, Some(1.5)).unwrap()
    }

    #[test]
    fn should_emit_on_then_off_per_interval() {
        let schedule = device_schedule(
            &[
                interval(at(10, 1, 0), at(10, 2, 0)),
                interval(at(10, 5, 0), at(10, 7, 30)),
            ],
            true,
        );
        let timespecs: Vec<&str> = schedule.jobs.iter().map(|j| j.timespec.as_str()).collect();
        assert_eq!(
            timespecs,
            vec![
                "00 00 01 * * MON,TUE,WED,THU,FRI,SAT,SUN",
                "00 00 02 * * MON,TUE,WED,THU,FRI,SAT,SUN",
                "00 00 05 * * MON,TUE,WED,THU,FRI,SAT,SUN",
                "00 30 07 * * MON,TUE,WED,THU,FRI,SAT,SUN",
            ]
        );
        let intents: Vec<_> = schedule
            .jobs
            .iter()
            .map(|j| j.switch_intent().unwrap())
            .collect();
        assert_eq!(
            intents,
            vec![
                SwitchIntent::On,
                SwitchIntent::Off,
                SwitchIntent::On,
                SwitchIntent::Off
            ]
        );
    }

    #[test]
    fn should_propagate_enabled_flag_to_every_trigger() {
        let schedule = device_schedule(&[interval(at(10, 1, 0), at(10, 2, 0))], false);
        assert!(schedule.jobs.iter().all(|j| !j.enabled));
    }

    #[test]
    fn should_put_cost_on_on_trigger_only() {
        let schedule = device_schedule(&[interval(at(10, 1, 0), at(10, 2, 0))], true);
        assert_eq!(
            schedule.jobs[0].calls,
            vec![Action::switch(SwitchIntent::On, Some(1.5))]
        );
        assert_eq!(
            schedule.jobs[1].calls,
            vec![Action::switch(SwitchIntent::Off, None)]
        );
    }

    #[test]
    fn should_encode_midnight_stop_as_one_minute_before() {
        let schedule = device_schedule(&[interval(at(10, 22, 0), at(11, 0, 0))], true);
        assert_eq!(
            schedule.jobs[1].timespec,
            "00 59 23 * * MON,TUE,WED,THU,FRI,SAT,SUN"
        );
        let stop = schedule.jobs[1].resolve_time(&day()).unwrap();
        assert_eq!(stop, at(10, 23, 59));
    }

    #[test]
    fn should_leave_non_midnight_stop_untouched() {
        let schedule = device_schedule(&[interval(at(10, 22, 0), at(11, 0, 30))], true);
        assert_eq!(
            schedule.jobs[1].timespec,
            "00 30 00 * * MON,TUE,WED,THU,FRI,SAT,SUN"
        );
    }

    #[test]
    fn should_roundtrip_through_general_mode_assembly() {
        let intervals = vec![
            interval(at(10, 0, 0), at(10, 3, 0)),
            interval(at(10, 12, 0), at(10, 13, 0)),
            interval(at(10, 17, 15), at(10, 21, 45)),
        ];
        let schedule = device_schedule(&intervals, true);
        let decoded = assemble::schedule(&schedule.jobs, &day()).unwrap();
        assert_eq!(decoded, intervals);
    }

    #[test]
    fn should_roundtrip_through_strict_mode_assembly() {
        let intervals = vec![
            interval(at(10, 2, 0), at(10, 4, 0)),
            interval(at(10, 22, 0), at(10, 23, 0)),
        ];
        let schedule = device_schedule(&intervals, true);
        assert_eq!(assemble::paired(&schedule.jobs, &day()).unwrap(), intervals);
    }

    #[test]
    fn should_decode_midnight_stop_as_end_of_day() {
        let schedule = device_schedule(&[interval(at(10, 22, 0), at(11, 0, 0))], true);
        let decoded = assemble::schedule(&schedule.jobs, &day()).unwrap();
        assert_eq!(decoded[0].start(), at(10, 22, 0));
        assert_eq!(decoded[0].stop(), at(10, 23, 59));
    }

    #[test]
    fn should_serialize_as_jobs_envelope() {
        let json = serde_json::to_value(DeviceSchedule::default()).unwrap();
        assert_eq!(json, serde_json::json!({"jobs": []}));
    }
}
