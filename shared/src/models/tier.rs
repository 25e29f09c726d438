use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered skill classification derived from a player's ranking score.
///
/// Tier is never stored authoritatively on its own; it is recomputed from
/// the ranking score every time the score changes so the two cannot drift.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    #[serde(rename = "beginner")]
    Beginner,
    #[serde(rename = "intermediate")]
    Intermediate,
    #[serde(rename = "advanced")]
    Advanced,
    #[serde(rename = "elite")]
    Elite,
}

/// Absolute score thresholds for tier boundaries (0-1000 score scale).
pub const ELITE_THRESHOLD: f64 = 800.0;
pub const ADVANCED_THRESHOLD: f64 = 600.0;
pub const INTERMEDIATE_THRESHOLD: f64 = 400.0;

impl Tier {
    /// Maps a ranking score onto a tier using fixed absolute thresholds.
    ///
    /// Population-relative standing is exposed separately via the
    /// leaderboard percentile; the two views are intentionally independent.
    pub fn from_score(score: f64) -> Self {
        if score >= ELITE_THRESHOLD {
            Tier::Elite
        } else if score >= ADVANCED_THRESHOLD {
            Tier::Advanced
        } else if score >= INTERMEDIATE_THRESHOLD {
            Tier::Intermediate
        } else {
            Tier::Beginner
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Beginner => write!(f, "Beginner"),
            Tier::Intermediate => write!(f, "Intermediate"),
            Tier::Advanced => write!(f, "Advanced"),
            Tier::Elite => write!(f, "Elite"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(0.0, Tier::Beginner; "zero score")]
    #[test_case(399.9, Tier::Beginner; "just below intermediate")]
    #[test_case(400.0, Tier::Intermediate; "exactly intermediate")]
    #[test_case(599.9, Tier::Intermediate; "just below advanced")]
    #[test_case(600.0, Tier::Advanced; "exactly advanced")]
    #[test_case(799.0, Tier::Advanced; "just below elite")]
    #[test_case(800.0, Tier::Elite; "exactly elite")]
    #[test_case(1000.0, Tier::Elite; "max score")]
    fn test_tier_thresholds(score: f64, expected: Tier) {
        assert_eq!(Tier::from_score(score), expected);
    }

    #[test]
    fn test_tier_is_non_decreasing_in_score() {
        let mut previous = Tier::Beginner;
        for step in 0..=1000 {
            let tier = Tier::from_score(step as f64);
            assert!(tier >= previous, "tier regressed at score {}", step);
            previous = tier;
        }
    }

    #[test]
    fn test_tier_display() {
        assert_eq!(Tier::Elite.to_string(), "Elite");
        assert_eq!(Tier::Beginner.to_string(), "Beginner");
    }
}
