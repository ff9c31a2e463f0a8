//! Trigger — one independently scheduled action stored on the device.
//!
//! The device keeps an unordered collection of cron-style jobs. Each job
//! fires on its own timespec and runs its [`Action`]s; an "on" job and the
//! "off" job closing the same interval are not linked in any way.

mod action;
mod intent;

pub use action::Action;
pub use intent::SwitchIntent;

use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::id::TriggerId;
use crate::time::{LocalDay, LocalTime};
use crate::timespec;

/// A device-resident scheduled job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(default, skip_serializing_if = "TriggerId::is_unassigned")]
    pub id: TriggerId,
    #[serde(rename = "enable")]
    pub enabled: bool,
    /// Six-field cron expression: second, minute, hour, day of month, month, day of week.
    pub timespec: String,
    #[serde(default)]
    pub calls: Vec<Action>,
}

/// A switch trigger resolved against a [`LocalDay`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedTrigger {
    pub intent: SwitchIntent,
    pub time: LocalTime,
    /// Price annotation carried by the switch action, if any.
    pub cost: Option<f64>,
}

impl Trigger {
    /// A trigger with an unassigned id.
    #[must_use]
    pub fn new(enabled: bool, timespec: impl Into<String>, calls: Vec<Action>) -> Self {
        Self {
            id: TriggerId::UNASSIGNED,
            enabled,
            timespec: timespec.into(),
            calls,
        }
    }

    /// The intent of the first switch-set action, if any.
    #[must_use]
    pub fn switch_intent(&self) -> Option<SwitchIntent> {
        self.calls.iter().find_map(Action::switch_intent)
    }

    /// Whether any call targets the switch-set method, regardless of its parameters.
    #[must_use]
    pub fn is_switch_trigger(&self) -> bool {
        self.calls
            .iter()
            .any(|call| call.method().eq_ignore_ascii_case("switch.set"))
    }

    fn switch_cost(&self) -> Option<f64> {
        self.calls.iter().find_map(|call| match call {
            Action::SwitchSet { cost, .. } => *cost,
            _ => None,
        })
    }

    /// Resolve the timespec against `day`.
    ///
    /// # Errors
    ///
    /// See [`timespec::resolve`].
    pub fn resolve_time(&self, day: &LocalDay) -> Result<LocalTime, ScheduleError> {
        timespec::resolve(&self.timespec, day)
    }

    /// Resolve intent and time together; `Ok(None)` when the trigger has no switch intent.
    ///
    /// # Errors
    ///
    /// See [`timespec::resolve`].
    pub fn resolve(&self, day: &LocalDay) -> Result<Option<ResolvedTrigger>, ScheduleError> {
        let Some(intent) = self.switch_intent() else {
            return Ok(None);
        };
        Ok(Some(ResolvedTrigger {
            intent,
            time: self.resolve_time(day)?,
            cost: self.switch_cost(),
        }))
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "trigger({}, {})", self.id, self.timespec)
    }
}
