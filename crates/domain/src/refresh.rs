//! Refresh trigger — the daily job asking cheapswitch to renew the schedule.

use std::net::SocketAddr;

use crate::id::TriggerId;
use crate::trigger::{Action, Trigger};

/// Path the refresh trigger calls back on.
pub const RENEW_PATH: &str = "/renewSchedules";

/// Fires every day at 00:01:00, right after the new day's prices apply.
const REFRESH_TIMESPEC: &str = "00 01 00 * * MON,TUE,WED,THU,FRI,SAT,SUN";

/// The refresh trigger, calling back to cheapswitch at `callback`.
#[must_use]
pub fn refresh_trigger(callback: SocketAddr) -> Trigger {
    Trigger {
        id: TriggerId::REFRESH,
        enabled: true,
        timespec: REFRESH_TIMESPEC.to_string(),
        calls: vec![Action::HttpGet {
            url: format!("http://{callback}{RENEW_PATH}"),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::LocalDay;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn should_call_back_renew_endpoint() {
        let t = refresh_trigger("192.168.0.10:8080".parse().unwrap());
        assert_eq!(t.id, TriggerId::REFRESH);
        assert!(t.enabled);
        assert_eq!(
            t.calls,
            vec![Action::HttpGet {
                url: "http://192.168.0.10:8080/renewSchedules".to_string()
            }]
        );
    }

    #[test]
    fn should_fire_shortly_after_midnight() {
        let day = LocalDay::new(
            chrono_tz::Europe::Copenhagen,
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        );
        let t = refresh_trigger("10.0.0.1:80".parse().unwrap())
            .resolve_time(&day)
            .unwrap();
        assert_eq!((t.hour(), t.minute()), (0, 1));
    }

    #[test]
    fn should_carry_no_switch_intent() {
        let t = refresh_trigger("10.0.0.1:80".parse().unwrap());
        assert_eq!(t.switch_intent(), None);
    }

    #[test]
    fn should_bracket_ipv6_callback() {
        let t = refresh_trigger("[fe80::1]:8080".parse().unwrap());
        assert!(matches!(&t.calls[0], Action::HttpGet { url } if url == "http://[fe80::1]:8080/renewSchedules"));
    }
}
