use async_trait::async_trait;
use shared::{Match, Result};
use uuid::Uuid;

/// Persistence contract for match documents.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// Inserts a freshly submitted match in Draft state.
    async fn insert(&self, m: &Match) -> Result<()>;

    /// Gets a match by ID; `NotFound` on miss.
    async fn get(&self, match_id: Uuid) -> Result<Match>;

    /// Persists a Draft-to-terminal transition.
    ///
    /// Must be compare-and-set on the stored status: when the stored match
    /// has already left Draft the write fails with `MatchNotDraft` and the
    /// document is left untouched. This is what makes concurrent verify and
    /// reject race to exactly one winner.
    async fn save_transition(&self, m: &Match) -> Result<()>;

    /// Flags a Verified match as having reached the player aggregates.
    async fn mark_stats_applied(&self, match_id: Uuid) -> Result<()>;

    /// Verified matches whose deltas have not been applied yet, oldest
    /// first; drives reconciliation.
    async fn list_verified_unapplied(&self, limit: usize) -> Result<Vec<Match>>;

    /// Paginated matches for a tournament, newest first.
    async fn list_by_tournament(
        &self,
        tournament_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Match>>;

    /// Paginated matches for a team, newest first.
    async fn list_by_team(&self, team_id: &str, limit: usize, offset: usize)
        -> Result<Vec<Match>>;

    /// Paginated matches containing a player entry, newest first.
    async fn list_by_player(
        &self,
        player_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Match>>;

    /// Paginated Draft matches awaiting admin review, oldest first.
    async fn list_unverified(&self, limit: usize, offset: usize) -> Result<Vec<Match>>;
}
