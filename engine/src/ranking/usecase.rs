use log::error;
use shared::dto::ranking::RankingResultDto;
use shared::{Game, PlayerStats, Result, SharedError, Tier};

use super::registry::CalculatorRegistry;

/// Orchestrates score calculation and tier assignment.
pub struct RankingUsecase {
    registry: CalculatorRegistry,
}

impl RankingUsecase {
    pub fn new(registry: CalculatorRegistry) -> Self {
        Self { registry }
    }

    /// Computes the ranking score and tier for a player's aggregate.
    ///
    /// `UnsupportedGame` only happens when no calculator answers for the
    /// slug, which the default registry's catch-all rules out; hitting it
    /// means the registry was assembled without a fallback.
    pub fn calculate_ranking(&self, stats: &PlayerStats, game: &Game) -> Result<RankingResultDto> {
        let calculator = self.registry.select(&game.slug).ok_or_else(|| {
            error!(
                "No calculator registered for game slug '{}'; registry is misconfigured",
                game.slug
            );
            SharedError::UnsupportedGame(game.slug.clone())
        })?;

        let score = calculator.calculate(stats, game)?;
        let tier = Tier::from_score(score);

        log::debug!(
            "Calculated ranking for player {} in game {}: score={:.2} tier={} (calculator={})",
            stats.player_id,
            game.slug,
            score,
            tier,
            calculator.name()
        );

        Ok(RankingResultDto { score, tier })
    }
}

impl Default for RankingUsecase {
    fn default() -> Self {
        Self::new(CalculatorRegistry::default())
    }
}
