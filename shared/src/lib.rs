pub mod models {
    pub mod game;
    pub mod match_record;
    pub mod player_stats;
    pub mod tier;
}

pub mod dto {
    pub mod leaderboard;
    pub mod matches;
    pub mod ranking;
}

pub mod error;

// Re-export commonly used items
pub use error::{Result, SharedError};

// Re-export models
pub use models::{
    game::{Game, StatField, StatFieldType, WEIGHT_TOLERANCE},
    match_record::{Match, MatchStatus, PlayerMatchEntry},
    player_stats::PlayerStats,
    tier::Tier,
};

// Re-export DTOs
pub use dto::{
    leaderboard::{LeaderboardEntryDto, PlayerRankDto, TierDistributionDto},
    matches::MatchSubmissionDto,
    ranking::RankingResultDto,
};
