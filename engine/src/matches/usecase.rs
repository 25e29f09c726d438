use log::{error, info};
use shared::dto::matches::MatchSubmissionDto;
use shared::{Match, Result};
use std::sync::Arc;
use uuid::Uuid;

use crate::games::repository::GameRepository;
use crate::matches::repository::MatchRepository;
use crate::stats::repository::PlayerStatsRepository;
use crate::stats::usecase::StatsAggregationUsecase;

/// Drives the match lifecycle: captain submission, admin verification or
/// rejection, and the stats-aggregation side effect of verification.
pub struct MatchUsecase<M, S, G> {
    match_repo: Arc<M>,
    aggregation: Arc<StatsAggregationUsecase<S, G>>,
}

impl<M, S, G> MatchUsecase<M, S, G>
where
    M: MatchRepository,
    S: PlayerStatsRepository,
    G: GameRepository,
{
    pub fn new(match_repo: Arc<M>, aggregation: Arc<StatsAggregationUsecase<S, G>>) -> Self {
        Self {
            match_repo,
            aggregation,
        }
    }

    /// Records a captain's match submission as a Draft.
    ///
    /// Field validation happens in `Match::new`; an invalid submission
    /// fails here and nothing is persisted.
    pub async fn submit_match(&self, dto: MatchSubmissionDto) -> Result<Match> {
        let m = Match::new(
            dto.tournament_id,
            dto.team_id,
            dto.game_id,
            dto.placement,
            dto.team_kills,
            dto.player_entries,
            dto.submitted_by,
        )?;

        self.match_repo.insert(&m).await?;
        info!(
            "Match {} submitted for tournament {} by {}",
            m.id, m.tournament_id, m.submitted_by
        );
        Ok(m)
    }

    /// Verifies a Draft match and feeds its deltas to the aggregates.
    ///
    /// The transition is persisted first through the store's compare-and-set
    /// so a concurrent reject cannot also win. If aggregation then fails
    /// the match stays Verified with `stats_applied == false` and the error
    /// surfaces; the reconciler picks it up rather than letting the
    /// verification status and the aggregates diverge permanently.
    pub async fn verify_match(&self, match_id: Uuid, admin_id: &str) -> Result<Match> {
        let mut m = self.match_repo.get(match_id).await?;
        m.verify(admin_id)?;
        self.match_repo.save_transition(&m).await?;
        info!("Match {} verified by {}", m.id, admin_id);

        match self.aggregation.apply_verified_match(&m).await {
            Ok(()) => {
                self.match_repo.mark_stats_applied(m.id).await?;
                m.stats_applied = true;
            }
            Err(e) => {
                error!(
                    "Stats aggregation for verified match {} failed, leaving it queued for reconciliation: {}",
                    m.id, e
                );
                return Err(e);
            }
        }

        Ok(m)
    }

    /// Rejects a Draft match with a reason. Never touches aggregates.
    pub async fn reject_match(&self, match_id: Uuid, admin_id: &str, reason: &str) -> Result<Match> {
        let mut m = self.match_repo.get(match_id).await?;
        m.reject(admin_id, reason)?;
        self.match_repo.save_transition(&m).await?;
        info!("Match {} rejected by {}: {}", m.id, admin_id, reason);
        Ok(m)
    }

    pub async fn get_match(&self, match_id: Uuid) -> Result<Match> {
        self.match_repo.get(match_id).await
    }

    /// Paginated match history for a tournament, newest first.
    pub async fn get_tournament_matches(
        &self,
        tournament_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Match>> {
        self.match_repo
            .list_by_tournament(tournament_id, limit, offset)
            .await
    }

    /// Paginated match history for a team, newest first.
    pub async fn get_team_matches(
        &self,
        team_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Match>> {
        self.match_repo.list_by_team(team_id, limit, offset).await
    }

    /// Paginated match history for a player, newest first.
    pub async fn get_player_matches(
        &self,
        player_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Match>> {
        self.match_repo.list_by_player(player_id, limit, offset).await
    }

    /// The admin review queue: Draft matches, oldest first.
    pub async fn get_pending_matches(&self, limit: usize, offset: usize) -> Result<Vec<Match>> {
        self.match_repo.list_unverified(limit, offset).await
    }
}
