//! Common error types used across the workspace.
//!
//! [`ScheduleError`] covers everything the codec can reject. Layers above the
//! domain wrap it (and their own failures) into [`CheapSwitchError`].

use chrono::NaiveDate;

use crate::id::TriggerId;
use crate::trigger::SwitchIntent;

/// Failures of the trigger ⇄ interval codec.
///
/// Any of these aborts the whole batch: no partial schedule is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// The timespec is not a valid six-field cron expression.
    #[error("malformed timespec {timespec:?}")]
    MalformedTimespec {
        timespec: String,
        #[source]
        source: cron::error::Error,
    },

    /// The timespec parses but never fires after the anchor.
    #[error("timespec {timespec:?} has no occurrence")]
    NoOccurrence { timespec: String },

    /// Local midnight does not exist on this date in the resolution timezone.
    #[error("no local midnight on {date} in {tz}")]
    NonexistentLocalTime { date: NaiveDate, tz: chrono_tz::Tz },

    /// The trigger carries no switch-set action, so it has no on/off meaning.
    #[error("trigger {id} carries no switch intent")]
    NoSwitchIntent { id: TriggerId },

    /// No trigger qualifies as the counterpart of the anchor trigger.
    #[error("no matching {searched} trigger for trigger {id} ({timespec})")]
    NoMatch {
        id: TriggerId,
        timespec: String,
        searched: SwitchIntent,
    },

    /// Strict pairing received an odd number of switch triggers.
    #[error("uneven number of switch triggers: {0}")]
    OddLength(usize),

    /// Strict pairing found a pair not ordered on/off.
    #[error(
        "unexpected state in elements: idx {on_index} was {on_state} (expected 'on'), idx {off_index} was {off_state} (expected 'off')"
    )]
    UnexpectedState {
        on_index: usize,
        on_state: SwitchIntent,
        off_index: usize,
        off_state: SwitchIntent,
    },

    /// An interval whose start is not strictly before its stop.
    #[error("interval start {start} is not before stop {stop}")]
    InvalidInterval { start: String, stop: String },
}

/// Top-level error crossing the port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum CheapSwitchError {
    /// The codec rejected the trigger collection or interval list.
    #[error("schedule error")]
    Schedule(#[from] ScheduleError),

    /// The device could not be reached or answered with an error.
    #[error("device error")]
    Device(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The price source failed.
    #[error("price source error")]
    Prices {
        /// Whether retrying later may succeed.
        transient: bool,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The service could not determine its own outward-facing address.
    #[error("failed to determine outbound address")]
    OutboundAddress(#[source] std::io::Error),

    /// Schedule renewal was requested outside its window without override.
    #[error("come back between 00:00 and 01:00")]
    OutsideRenewalWindow,

    /// A request parameter failed validation.
    #[error("invalid request: {0}")]
    Validation(String),
}

impl CheapSwitchError {
    /// Whether the operation may succeed when retried later unchanged.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Prices {
                transient: true,
                ..
            }
        )
    }
}
