//! Difficulty modes and the word-count policy behind them.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Reading session size selected by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    #[default]
    Easy,
    Medium,
    Grind,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Easy, Mode::Medium, Mode::Grind];

    /// Parse a mode name (case-insensitive). Returns `None` for anything unknown.
    pub fn from_name(name: &str) -> Option<Mode> {
        match name.trim().to_ascii_uppercase().as_str() {
            "EASY" => Some(Mode::Easy),
            "MEDIUM" => Some(Mode::Medium),
            "GRIND" => Some(Mode::Grind),
            _ => None,
        }
    }

    /// Parse a mode name, resolving unknown values to the lowest tier.
    pub fn parse_or_default(name: &str) -> Mode {
        Self::from_name(name).unwrap_or_else(|| {
            info!("Unknown mode '{}', using {}", name, Mode::default());
            Mode::default()
        })
    }

    /// Total number of words to aim for across all texts
    pub fn target_word_count(self) -> u32 {
        match self {
            Mode::Easy => 200,
            Mode::Medium => 400,
            Mode::Grind => 700,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Easy => "EASY",
            Mode::Medium => "MEDIUM",
            Mode::Grind => "GRIND",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target word count for a raw mode string; unknown modes get the lowest tier.
pub fn word_count_for(mode: &str) -> u32 {
    Mode::parse_or_default(mode).target_word_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_modes() {
        assert_eq!(word_count_for("EASY"), 200);
        assert_eq!(word_count_for("MEDIUM"), 400);
        assert_eq!(word_count_for("GRIND"), 700);
    }

    #[test]
    fn test_mode_names_are_case_insensitive() {
        assert_eq!(Mode::from_name("grind"), Some(Mode::Grind));
        assert_eq!(Mode::from_name(" Medium "), Some(Mode::Medium));
    }

    #[test]
    fn test_unknown_mode_resolves_to_lowest_tier() {
        assert_eq!(word_count_for(""), 200);
        assert_eq!(word_count_for("HARDCORE"), 200);
        assert_eq!(Mode::parse_or_default("nope"), Mode::Easy);
    }

    #[test]
    fn test_every_mode_maps_into_fixed_set() {
        for mode in Mode::ALL {
            assert!([200, 400, 700].contains(&mode.target_word_count()));
        }
    }

    #[test]
    fn test_display_round_trips_through_from_name() {
        for mode in Mode::ALL {
            assert_eq!(Mode::from_name(&mode.to_string()), Some(mode));
        }
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let json = serde_json::to_string(&Mode::Grind).expect("Should serialize");
        assert_eq!(json, "\"GRIND\"");
    }
}
