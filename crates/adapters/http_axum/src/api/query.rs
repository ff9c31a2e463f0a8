//! Query parameters shared by the control endpoints.

use std::net::IpAddr;

use serde::Deserialize;

use cheapswitch_app::services::schedule_service::PlanRequest;

use crate::error::ApiError;

/// Longest schedulable period, in hours.
const DAY_HOURS: u32 = 24;

/// Every parameter a control endpoint understands. Endpoints ignore the ones
/// they have no use for.
///
/// Flags follow the usual boolean spellings (`1`, `t`, `true`, …); anything
/// else, including absence, reads as false.
#[derive(Debug, Default, Deserialize)]
pub struct ScheduleQuery {
    /// Device address, overriding the configured one.
    pub ip: Option<String>,
    /// Dry run: read from the device but change nothing.
    pub pretend: Option<String>,
    /// Renew outside the renewal window.
    #[serde(rename = "override")]
    pub override_window: Option<String>,
    pub hours: Option<u32>,
    pub dark: Option<u32>,
    /// Shift of the priced day, in hours.
    pub offset: Option<i64>,
    /// Compute tomorrow's schedule instead of reading the device.
    pub tomorrow: Option<String>,
    /// Compute the schedule instead of reading the device.
    pub recalc: Option<String>,
}

impl ScheduleQuery {
    #[must_use]
    pub fn dry_run(&self) -> bool {
        flag(self.pretend.as_deref())
    }

    #[must_use]
    pub fn override_window(&self) -> bool {
        flag(self.override_window.as_deref())
    }

    #[must_use]
    pub fn tomorrow(&self) -> bool {
        flag(self.tomorrow.as_deref())
    }

    #[must_use]
    pub fn recalc(&self) -> bool {
        flag(self.recalc.as_deref())
    }

    /// The schedule computation asked for. `tomorrow` replaces any offset
    /// with a full day.
    ///
    /// # Errors
    ///
    /// Returns a validation error when hours or dark hours exceed a day.
    pub fn plan_request(&self, tomorrow: bool) -> Result<PlanRequest, ApiError> {
        if self.hours.is_some_and(|h| h > DAY_HOURS) {
            return Err(ApiError::validation(format!(
                "hours must be at most {DAY_HOURS}"
            )));
        }
        if self.dark.is_some_and(|d| d > DAY_HOURS) {
            return Err(ApiError::validation(format!(
                "dark must be at most {DAY_HOURS}"
            )));
        }
        let offset_hours = if tomorrow {
            i64::from(DAY_HOURS)
        } else {
            self.offset.unwrap_or(0)
        };
        Ok(PlanRequest {
            hours: self.hours,
            dark_hours: self.dark,
            offset_hours,
        })
    }

    /// The device host to address: the `ip` parameter when present, the
    /// configured device otherwise.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an `ip` that is not an IP address, or
    /// when neither is available.
    pub fn device_host(&self, configured: Option<&str>) -> Result<String, ApiError> {
        match self.ip.as_deref().filter(|ip| !ip.is_empty()) {
            Some(raw) => {
                let ip: IpAddr = raw
                    .parse()
                    .map_err(|_| ApiError::validation(format!("invalid ip {raw:?}")))?;
                Ok(match ip {
                    IpAddr::V4(v4) => v4.to_string(),
                    IpAddr::V6(v6) => format!("[{v6}]"),
                })
            }
            None => configured
                .map(str::to_string)
                .ok_or_else(|| ApiError::validation("no device given and none configured")),
        }
    }
}

fn flag(value: Option<&str>) -> bool {
    matches!(value, Some("1" | "t" | "T" | "true" | "TRUE" | "True"))
}
