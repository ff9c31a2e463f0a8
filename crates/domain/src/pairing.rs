//! Pairing — find the trigger that closes (or opens) the interval of another.
//!
//! Candidates must carry the opposite switch intent and lie on the correct
//! side of the anchor in time: an "off" must come after an "on", an "on"
//! before an "off". Among those, the position in the collection decides:
//! the earliest-listed "off" or the latest-listed "on" wins, even if another
//! candidate is closer in time.

use crate::error::ScheduleError;
use crate::time::LocalDay;
use crate::trigger::{SwitchIntent, Trigger};

/// Find the trigger in `triggers` pairing with `target`.
///
/// `target` does not need to be a member of `triggers`. Triggers without a
/// switch intent are ignored.
///
/// # Errors
///
/// - [`ScheduleError::NoSwitchIntent`] if `target` carries no switch intent
/// - [`ScheduleError::NoMatch`] if no candidate qualifies
/// - any resolution error of `target` or of a switch trigger in `triggers`
pub fn find_matching<'a>(
    target: &Trigger,
    triggers: &'a [Trigger],
    day: &LocalDay,
) -> Result<&'a Trigger, ScheduleError> {
    let anchor = target
        .resolve(day)?
        .ok_or(ScheduleError::NoSwitchIntent { id: target.id })?;
    let searched = anchor.intent.opposite();

    let mut candidates = Vec::new();
    for (index, trigger) in triggers.iter().enumerate() {
        let Some(resolved) = trigger.resolve(day)? else {
            continue;
        };
        if resolved.intent != searched {
            continue;
        }
        let on_correct_side = match searched {
            SwitchIntent::Off => resolved.time > anchor.time,
            SwitchIntent::On => resolved.time < anchor.time,
        };
        if on_correct_side {
            candidates.push(index);
        }
    }

    let selected = match searched {
        SwitchIntent::Off => candidates.first(),
        SwitchIntent::On => candidates.last(),
    };
    selected
        .map(|&index| &triggers[index])
        .ok_or_else(|| ScheduleError::NoMatch {
            id: target.id,
            timespec: target.timespec.clone(),
            searched,
        })
}
