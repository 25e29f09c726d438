use shared::{Game, PlayerStats, Result, SharedError};

/// Default weights applied when a game does not configure a given key.
pub const DEFAULT_KD_RATIO_WEIGHT: f64 = 0.40;
pub const DEFAULT_AVG_KILLS_WEIGHT: f64 = 0.30;
pub const DEFAULT_AVG_DAMAGE_WEIGHT: f64 = 0.20;
pub const DEFAULT_CONSISTENCY_WEIGHT: f64 = 0.10;

/// Baseline consistency sub-score.
///
/// A constant stands in for match-by-match variance tracking; replacing it
/// with a real variance model would need per-match score history.
const CONSISTENCY_BASELINE: f64 = 70.0;

/// A pluggable scoring strategy mapping raw stats to a ranking score.
///
/// Implementations must be pure: the same (stats, game) input always
/// produces the same score. A zero-match aggregate scores 0.0 and is never
/// an error.
pub trait ScoreCalculator: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this calculator knows how to score the given game.
    fn supports(&self, game_slug: &str) -> bool;

    /// Computes the ranking score for a player's aggregate in a game.
    ///
    /// Fails with `InvalidStats` when the input counters are malformed.
    fn calculate(&self, stats: &PlayerStats, game: &Game) -> Result<f64>;
}

fn check_counters(stats: &PlayerStats) -> Result<()> {
    for (name, value) in &stats.stats {
        if !value.is_finite() {
            return Err(SharedError::InvalidStats(format!(
                "stat '{}' is not a finite number",
                name
            )));
        }
        if *value < 0.0 {
            return Err(SharedError::InvalidStats(format!(
                "stat '{}' is negative ({})",
                name, value
            )));
        }
    }
    Ok(())
}

fn kd_ratio(kills: f64, deaths: f64) -> f64 {
    if deaths > 0.0 {
        kills / deaths
    } else {
        kills
    }
}

/// Warzone-specific calculator.
///
/// Combines K/D, average kills, average damage and a consistency baseline
/// into a weighted composite, scaled onto 0-1000.
pub struct WarzoneCalculator;

impl ScoreCalculator for WarzoneCalculator {
    fn name(&self) -> &'static str {
        "warzone"
    }

    fn supports(&self, game_slug: &str) -> bool {
        game_slug == "warzone"
    }

    fn calculate(&self, stats: &PlayerStats, game: &Game) -> Result<f64> {
        check_counters(stats)?;
        if stats.matches_played == 0 {
            return Ok(0.0);
        }

        let kills = stats.stat("kills");
        let deaths = stats.stat("deaths");
        let damage = stats.stat("damage");
        let matches = stats.matches_played as f64;

        let kd_score = (kd_ratio(kills, deaths) * 20.0).min(100.0);
        let avg_kills_score = ((kills / matches) * 5.0).min(100.0);
        let avg_damage_score = ((damage / matches) / 30.0).min(100.0);
        let consistency_score = CONSISTENCY_BASELINE;

        let weighted = kd_score * game.weight_or("kd_ratio", DEFAULT_KD_RATIO_WEIGHT)
            + avg_kills_score * game.weight_or("avg_kills", DEFAULT_AVG_KILLS_WEIGHT)
            + avg_damage_score * game.weight_or("avg_damage", DEFAULT_AVG_DAMAGE_WEIGHT)
            + consistency_score * game.weight_or("consistency", DEFAULT_CONSISTENCY_WEIGHT);

        // 0-100 composite onto the 0-1000 score range
        Ok(weighted * 10.0)
    }
}

/// Catch-all calculator for games without a dedicated strategy.
///
/// Always supports every slug so registry dispatch is total.
pub struct GenericCalculator;

impl ScoreCalculator for GenericCalculator {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn supports(&self, _game_slug: &str) -> bool {
        true
    }

    fn calculate(&self, stats: &PlayerStats, _game: &Game) -> Result<f64> {
        check_counters(stats)?;
        if stats.matches_played == 0 {
            return Ok(0.0);
        }

        let kills = stats.stat("kills");
        let deaths = stats.stat("deaths");
        Ok(kd_ratio(kills, deaths) * 100.0 + stats.matches_played as f64)
    }
}
