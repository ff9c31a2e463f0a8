//! Trigger identifiers as assigned by the device.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a [`Trigger`](crate::trigger::Trigger) on the device.
///
/// The device assigns ids on creation; `0` means "unassigned" and is left out
/// of the wire representation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TriggerId(u32);

impl TriggerId {
    /// Not yet assigned by the device.
    pub const UNASSIGNED: Self = Self(0);

    /// Reserved id of the daily schedule-refresh trigger.
    pub const REFRESH: Self = Self(42);

    /// Wrap a raw device id.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Access the raw id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Whether the device has not assigned an id yet.
    #[must_use]
    pub const fn is_unassigned(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for TriggerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TriggerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_unassigned() {
        assert!(TriggerId::default().is_unassigned());
        assert!(!TriggerId::REFRESH.is_unassigned());
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = TriggerId::new(7);
        let parsed: TriggerId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_serialize_as_bare_number() {
        let json = serde_json::to_string(&TriggerId::new(3)).unwrap();
        assert_eq!(json, "3");
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        assert!(TriggerId::from_str("abc").is_err());
    }
}
