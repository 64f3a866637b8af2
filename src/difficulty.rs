//! Difficulty tiers and the static profile each one maps to.

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of difficulty tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// How many words a puzzle should hold and how long they may be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DifficultyProfile {
    pub word_count: RangeInclusive<usize>,
    pub word_length: RangeInclusive<usize>,
}

impl DifficultyProfile {
    #[must_use]
    pub fn new(word_count: RangeInclusive<usize>, word_length: RangeInclusive<usize>) -> Self {
        Self { word_count, word_length }
    }

    /// Name of the first range that admits nothing, if any.
    ///
    /// The builder refuses such a profile before sampling.
    #[must_use]
    pub fn empty_range(&self) -> Option<&'static str> {
        if self.word_count.is_empty() {
            Some("word count")
        } else if self.word_length.is_empty() {
            Some("word length")
        } else {
            None
        }
    }

    /// Does `len` (in letters) fall inside this profile's length bounds?
    #[must_use]
    pub fn admits_length(&self, len: usize) -> bool {
        self.word_length.contains(&len)
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn profile(self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile::new(8..=10, 4..=8),
            Difficulty::Medium => DifficultyProfile::new(10..=12, 3..=10),
            Difficulty::Hard => DifficultyProfile::new(12..=15, 3..=12),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Medium
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected easy, medium or hard)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::WORD_LENGTH_BOUNDS;

    #[test]
    fn test_profiles_match_tiers() {
        assert_eq!(Difficulty::Easy.profile().word_count, 8..=10);
        assert_eq!(Difficulty::Medium.profile().word_length, 3..=10);
        assert_eq!(Difficulty::Hard.profile().word_count, 12..=15);
    }

    #[test]
    fn test_profiles_stay_within_global_bounds() {
        for d in Difficulty::ALL {
            let p = d.profile();
            assert!(WORD_LENGTH_BOUNDS.contains(p.word_length.start()));
            assert!(WORD_LENGTH_BOUNDS.contains(p.word_length.end()));
            assert!(*p.word_count.start() >= 8, "{d} allows fewer words than any puzzle needs");
        }
    }

    #[test]
    fn test_from_str_round_trips_display() {
        for d in Difficulty::ALL {
            assert_eq!(d.to_string().parse::<Difficulty>(), Ok(d));
        }
        assert_eq!(" HARD ".parse::<Difficulty>(), Ok(Difficulty::Hard));
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "extreme".parse::<Difficulty>().unwrap_err();
        assert!(err.to_string().contains("extreme"));
    }

    #[test]
    fn test_empty_ranges_are_named() {
        assert_eq!(Difficulty::Medium.profile().empty_range(), None);
        #[allow(clippy::reversed_empty_ranges)]
        let backwards = DifficultyProfile::new(10..=8, 3..=7);
        assert_eq!(backwards.empty_range(), Some("word count"));
        #[allow(clippy::reversed_empty_ranges)]
        let no_lengths = DifficultyProfile::new(8..=10, 7..=3);
        assert_eq!(no_lengths.empty_range(), Some("word length"));
    }

    #[test]
    fn test_admits_length() {
        let p = Difficulty::Easy.profile();
        assert!(!p.admits_length(3));
        assert!(p.admits_length(4));
        assert!(p.admits_length(8));
        assert!(!p.admits_length(9));
    }
}
