use async_trait::async_trait;
use shared::{PlayerStats, Result};

/// Persistence contract for per-(player, game) stat aggregates.
///
/// `save` must implement an optimistic version check: the write succeeds
/// only when the stored aggregate's version matches the one the caller
/// read, and the store bumps the version on success. A stale write fails
/// with `Conflict` so the caller can re-read and retry; this backs up the
/// engine's per-key serialization and makes lost updates impossible even
/// when several engine instances share one store.
#[async_trait]
pub trait PlayerStatsRepository: Send + Sync {
    /// Finds the aggregate for a (player, game) pair, if any.
    async fn find(&self, player_id: &str, game_id: &str) -> Result<Option<PlayerStats>>;

    /// Gets the aggregate for a (player, game) pair, creating a zeroed one
    /// on first access.
    async fn get_or_create(&self, player_id: &str, game_id: &str) -> Result<PlayerStats>;

    /// Persists an aggregate; `Conflict` when the stored version differs
    /// from `stats.version`.
    async fn save(&self, stats: &PlayerStats) -> Result<()>;

    /// All aggregates for a game, in no particular order; ordering is the
    /// leaderboard usecase's job.
    async fn list_by_game(&self, game_id: &str) -> Result<Vec<PlayerStats>>;
}
