use shared::dto::leaderboard::{LeaderboardEntryDto, PlayerRankDto, TierDistributionDto};
use shared::{PlayerStats, Result, SharedError, Tier};
use std::cmp::Ordering;
use std::sync::Arc;

use crate::stats::repository::PlayerStatsRepository;

/// Read-side ranking queries over a game's player population.
///
/// The store hands back unordered aggregates; the ordering and percentile
/// definitions live here so every caller sees the same ranking.
pub struct LeaderboardUsecase<S> {
    stats_repo: Arc<S>,
}

/// Leaderboard ordering: ranking score descending, then matches played
/// descending, then player ID ascending as the stable final key.
fn leaderboard_order(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.ranking_score
        .total_cmp(&a.ranking_score)
        .then_with(|| b.matches_played.cmp(&a.matches_played))
        .then_with(|| a.player_id.cmp(&b.player_id))
}

impl<S> LeaderboardUsecase<S>
where
    S: PlayerStatsRepository,
{
    pub fn new(stats_repo: Arc<S>) -> Self {
        Self { stats_repo }
    }

    async fn ranked_population(&self, game_id: &str) -> Result<Vec<PlayerStats>> {
        let mut population = self.stats_repo.list_by_game(game_id).await?;
        population.sort_by(leaderboard_order);
        Ok(population)
    }

    /// Returns one leaderboard page. Ranks are positions in the full
    /// ordering, so page two continues where page one left off.
    pub async fn get_leaderboard(
        &self,
        game_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<LeaderboardEntryDto>> {
        let population = self.ranked_population(game_id).await?;

        Ok(population
            .into_iter()
            .enumerate()
            .skip(offset)
            .take(limit)
            .map(|(index, stats)| LeaderboardEntryDto {
                rank: index + 1,
                player_id: stats.player_id,
                ranking_score: stats.ranking_score,
                tier: stats.tier,
                matches_played: stats.matches_played,
                last_match_at: stats.last_match_at,
            })
            .collect())
    }

    /// A player's standing within a game: rank, population size, and the
    /// percentile of their score.
    pub async fn get_player_rank(&self, game_id: &str, player_id: &str) -> Result<PlayerRankDto> {
        let population = self.ranked_population(game_id).await?;
        let total_players = population.len();

        let (index, stats) = population
            .iter()
            .enumerate()
            .find(|(_, s)| s.player_id == player_id)
            .ok_or_else(|| {
                SharedError::NotFound(format!(
                    "no stats for player {} in game {}",
                    player_id, game_id
                ))
            })?;

        Ok(PlayerRankDto {
            player_id: stats.player_id.clone(),
            rank: index + 1,
            total_players,
            percentile: percentile_of(&population, stats.ranking_score),
            ranking_score: stats.ranking_score,
            tier: stats.tier,
        })
    }

    /// Fraction of the game's players scoring strictly below `score`,
    /// expressed 0-100. 0.0 for an empty population.
    pub async fn calculate_percentile(&self, game_id: &str, score: f64) -> Result<f64> {
        let population = self.stats_repo.list_by_game(game_id).await?;
        Ok(percentile_of(&population, score))
    }

    /// Per-tier player counts for a game; the counts sum to the ranked
    /// population size.
    pub async fn get_tier_distribution(&self, game_id: &str) -> Result<TierDistributionDto> {
        let population = self.stats_repo.list_by_game(game_id).await?;

        let mut distribution = TierDistributionDto::default();
        for stats in &population {
            match stats.tier {
                Tier::Beginner => distribution.beginner += 1,
                Tier::Intermediate => distribution.intermediate += 1,
                Tier::Advanced => distribution.advanced += 1,
                Tier::Elite => distribution.elite += 1,
            }
        }
        Ok(distribution)
    }
}

fn percentile_of(population: &[PlayerStats], score: f64) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    let below = population
        .iter()
        .filter(|s| s.ranking_score < score)
        .count();
    (below as f64 / population.len() as f64) * 100.0
}
