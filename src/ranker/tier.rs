//! Score tiers and podium positions.

use serde::{Deserialize, Serialize};

/// Band a single judge score falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    High,
    Mid,
    Low,
    /// The judge has not scored this participant.
    Unknown,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Mid => "mid",
            Self::Low => "low",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds (inclusive) of the `High` and `Mid` tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub high: f64,
    pub mid: f64,
}

impl TierThresholds {
    pub const DEFAULT: Self = Self {
        high: 80.0,
        mid: 50.0,
    };

    pub fn classify(&self, score: Option<f64>) -> Tier {
        match score {
            None => Tier::Unknown,
            Some(s) if s >= self.high => Tier::High,
            Some(s) if s >= self.mid => Tier::Mid,
            Some(_) => Tier::Low,
        }
    }
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Classify a score with the default 80/50 thresholds.
pub fn classify(score: Option<f64>) -> Tier {
    TierThresholds::DEFAULT.classify(score)
}

/// Distinction for the top three leaderboard positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PodiumTier {
    Gold,
    Silver,
    Bronze,
    None,
}

impl PodiumTier {
    /// Podium for a zero-based index into the sorted leaderboard.
    pub fn from_rank(index: usize) -> Self {
        match index {
            0 => Self::Gold,
            1 => Self::Silver,
            2 => Self::Bronze,
            _ => Self::None,
        }
    }

    pub fn is_podium(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// Short marker used in text output.
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Gold => "1st",
            Self::Silver => "2nd",
            Self::Bronze => "3rd",
            Self::None => "",
        }
    }
}
