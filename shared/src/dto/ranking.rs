use crate::models::tier::Tier;
use serde::{Deserialize, Serialize};

/// Result of a ranking computation for one (player, game) aggregate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankingResultDto {
    pub score: f64,
    pub tier: Tier,
}
