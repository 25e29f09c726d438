use log::{debug, error, warn};
use shared::{Match, Result, SharedError};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::config::AggregationConfig;
use crate::games::repository::GameRepository;
use crate::ranking::usecase::RankingUsecase;
use crate::stats::repository::PlayerStatsRepository;

type KeyLock = Arc<tokio::sync::Mutex<()>>;

/// Hands out one async mutex per (player, game) key so read-modify-write
/// cycles on the same aggregate are serialized within this process.
struct KeyLockTable {
    locks: Mutex<HashMap<(String, String), KeyLock>>,
}

impl KeyLockTable {
    fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, player_id: &str, game_id: &str) -> KeyLock {
        let mut locks = self.locks.lock().unwrap();
        locks
            .entry((player_id.to_string(), game_id.to_string()))
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    /// Drops a key's entry once no task holds its lock any more, keeping
    /// the table bounded by the number of in-flight keys.
    fn release(&self, player_id: &str, game_id: &str) {
        let mut locks = self.locks.lock().unwrap();
        let key = (player_id.to_string(), game_id.to_string());
        if let Some(lock) = locks.get(&key) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(&key);
            }
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks.lock().unwrap().len()
    }
}

/// Applies verified match results to player aggregates and recomputes
/// rankings.
///
/// Two layers guard against lost updates: the per-key lock table serializes
/// mutations within this process, and the repository's optimistic version
/// check catches stale writes from anywhere else. On `Conflict` the cycle
/// re-reads and retries up to the configured attempt budget.
pub struct StatsAggregationUsecase<S, G> {
    stats_repo: Arc<S>,
    game_repo: Arc<G>,
    ranking: RankingUsecase,
    locks: KeyLockTable,
    config: AggregationConfig,
}

impl<S, G> StatsAggregationUsecase<S, G>
where
    S: PlayerStatsRepository,
    G: GameRepository,
{
    pub fn new(
        stats_repo: Arc<S>,
        game_repo: Arc<G>,
        ranking: RankingUsecase,
        config: AggregationConfig,
    ) -> Self {
        Self {
            stats_repo,
            game_repo,
            ranking,
            locks: KeyLockTable::new(),
            config,
        }
    }

    /// Applies a verified match's per-player deltas and recomputes each
    /// affected player's ranking.
    ///
    /// Entries are applied in order; on failure the match stays flagged as
    /// unapplied and the reconciler re-runs it later. Application is
    /// idempotent per (match, player): each aggregate records the match IDs
    /// already folded in, so a re-run only fills in the entries that failed
    /// and never double-counts the ones that landed.
    pub async fn apply_verified_match(&self, m: &Match) -> Result<()> {
        if !m.is_verified() {
            warn!(
                "Refusing to aggregate stats for match {} in state {:?}",
                m.id, m.status
            );
            return Err(SharedError::Validation(format!(
                "match {} is not verified",
                m.id
            )));
        }

        let game = self.game_repo.get_game(&m.game_id).await?;
        let occurred_at = m.verified_at.unwrap_or(m.created_at);

        for entry in &m.player_entries {
            self.apply_player_entry(entry, &game, m, occurred_at).await?;
        }

        debug!(
            "Applied match {} deltas for {} players in game {}",
            m.id,
            m.player_entries.len(),
            game.slug
        );
        Ok(())
    }

    async fn apply_player_entry(
        &self,
        entry: &shared::PlayerMatchEntry,
        game: &shared::Game,
        m: &Match,
        occurred_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<()> {
        let key_lock = self.locks.lock_for(&entry.player_id, &m.game_id);
        let result = {
            let _guard = key_lock.lock().await;
            self.apply_under_lock(entry, game, m, occurred_at).await
        };
        drop(key_lock);
        self.locks.release(&entry.player_id, &m.game_id);
        result
    }

    async fn apply_under_lock(
        &self,
        entry: &shared::PlayerMatchEntry,
        game: &shared::Game,
        m: &Match,
        occurred_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<()> {
        let mut attempt = 0;
        loop {
            let mut stats = self
                .stats_repo
                .get_or_create(&entry.player_id, &m.game_id)
                .await?;

            if stats.has_applied(m.id) {
                debug!(
                    "Match {} already applied for player {}; skipping",
                    m.id, entry.player_id
                );
                return Ok(());
            }

            stats.record_match(m.id, entry, occurred_at);
            let ranking = self.ranking.calculate_ranking(&stats, game)?;
            stats.apply_ranking(ranking.score, ranking.tier);

            match self.stats_repo.save(&stats).await {
                Ok(()) => return Ok(()),
                Err(SharedError::Conflict(reason)) if attempt < self.config.max_save_retries => {
                    attempt += 1;
                    warn!(
                        "Stale write for player {} in game {} ({}); retry {}/{}",
                        entry.player_id, m.game_id, reason, attempt, self.config.max_save_retries
                    );
                }
                Err(e) => {
                    error!(
                        "Failed to persist stats for player {} in game {} from match {}: {}",
                        entry.player_id, m.game_id, m.id, e
                    );
                    return Err(e);
                }
            }
        }
    }
}
