//! Interval assembly — decode a device trigger collection into intervals.
//!
//! Two modes:
//! - [`paired`]: strict and linear, for collections known to be ordered
//!   on, off, on, off, … (for instance, the output of [`crate::encode`])
//! - [`schedule`]: tolerant of any order, pairing every "on" trigger with its
//!   "off" via [`find_matching`]
//!
//! Triggers without a switch intent are skipped in both modes. Any failure
//! rejects the whole collection.

use crate::error::ScheduleError;
use crate::interval::Interval;
use crate::pairing::find_matching;
use crate::time::LocalDay;
use crate::trigger::{ResolvedTrigger, SwitchIntent, Trigger};

/// Resolve every switch trigger in `triggers`, keeping their order.
///
/// # Errors
///
/// Returns the first resolution error encountered.
pub fn resolve_all(triggers: &[Trigger], day: &LocalDay) -> Result<Vec<ResolvedTrigger>, ScheduleError> {
    let mut resolved = Vec::with_capacity(triggers.len());
    for trigger in triggers {
        if let Some(r) = trigger.resolve(day)? {
            resolved.push(r);
        }
    }
    Ok(resolved)
}

/// Assemble intervals from a collection ordered on/off/on/off/….
///
/// # Errors
///
/// - [`ScheduleError::OddLength`] if the switch triggers cannot form pairs
/// - [`ScheduleError::UnexpectedState`] if a pair is not ordered on, off
/// - [`ScheduleError::InvalidInterval`] if an "off" does not follow its "on"
/// - any resolution error
pub fn paired(triggers: &[Trigger], day: &LocalDay) -> Result<Vec<Interval>, ScheduleError> {
    let resolved = resolve_all(triggers, day)?;
    if resolved.len() % 2 != 0 {
        return Err(ScheduleError::OddLength(resolved.len()));
    }
    resolved
        .chunks_exact(2)
        .enumerate()
        .map(|(pair, chunk)| {
            let (on, off) = (&chunk[0], &chunk[1]);
            if on.intent != SwitchIntent::On || off.intent != SwitchIntent::Off {
                return Err(ScheduleError::UnexpectedState {
                    on_index: pair * 2,
                    on_state: on.intent,
                    off_index: pair * 2 + 1,
                    off_state: off.intent,
                });
            }
            Interval::new(on.time, off.time, on.cost)
        })
        .collect()
}

/// Assemble intervals from a collection in any order.
///
/// Each interval is discovered once, from its "on" side; "off" triggers are
/// only ever consumed as matches. Intervals come out in the order of their
/// "on" triggers.
///
/// # Errors
///
/// Any error of [`find_matching`] for any "on" trigger.
pub fn schedule(triggers: &[Trigger], day: &LocalDay) -> Result<Vec<Interval>, ScheduleError> {
    let mut intervals = Vec::with_capacity(triggers.len() / 2);
    for trigger in triggers {
        let Some(on) = trigger.resolve(day)? else {
            continue;
        };
        if on.intent == SwitchIntent::Off {
            continue;
        }
        let off = find_matching(trigger, triggers, day)?.resolve_time(day)?;
        intervals.push(Interval::new(on.time, off, on.cost)?);
    }
    Ok(intervals)
}
