//! Switch intent — the on/off meaning of a switch-set action.

use serde::{Deserialize, Serialize};

/// What a trigger does to the switch when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwitchIntent {
    On,
    Off,
}

impl SwitchIntent {
    /// The intent that closes (or opens) an interval started (or ended) by `self`.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }

    #[must_use]
    pub fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<bool> for SwitchIntent {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

impl std::fmt::Display for SwitchIntent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_flip_when_taking_opposite() {
        assert_eq!(SwitchIntent::On.opposite(), SwitchIntent::Off);
        assert_eq!(SwitchIntent::Off.opposite(), SwitchIntent::On);
    }

    #[test]
    fn should_convert_from_bool() {
        assert_eq!(SwitchIntent::from(true), SwitchIntent::On);
        assert_eq!(SwitchIntent::from(false), SwitchIntent::Off);
    }

    #[test]
    fn should_display_lowercase_variant_name() {
        assert_eq!(SwitchIntent::On.to_string(), "on");
        assert_eq!(SwitchIntent::Off.to_string(), "off");
    }
}
