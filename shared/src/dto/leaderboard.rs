use crate::models::tier::Tier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of a game leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeaderboardEntryDto {
    /// 1-based position in the full ordering for the game, not the page
    pub rank: usize,
    pub player_id: String,
    pub ranking_score: f64,
    pub tier: Tier,
    pub matches_played: u32,
    pub last_match_at: Option<DateTime<Utc>>,
}

/// A single player's standing within a game's population.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerRankDto {
    pub player_id: String,
    pub rank: usize,
    pub total_players: usize,
    /// Fraction of the population scoring strictly below this player, 0-100
    pub percentile: f64,
    pub ranking_score: f64,
    pub tier: Tier,
}

/// Count of ranked players per tier for one game.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierDistributionDto {
    pub beginner: usize,
    pub intermediate: usize,
    pub advanced: usize,
    pub elite: usize,
}

impl TierDistributionDto {
    pub fn total(&self) -> usize {
        self.beginner + self.intermediate + self.advanced + self.elite
    }
}
