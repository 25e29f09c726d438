use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep, Duration};

use crate::config::ReconcilerConfig;
use crate::games::repository::GameRepository;
use crate::matches::repository::MatchRepository;
use crate::stats::repository::PlayerStatsRepository;
use crate::stats::usecase::StatsAggregationUsecase;

/// Background reconciler for verified matches whose stats writes failed.
///
/// Verification persists the Verified status before aggregation runs, so a
/// store hiccup can leave a match verified but unapplied. This task sweeps
/// those up on an interval and re-runs aggregation until each match lands,
/// keeping the match status and the aggregates from diverging permanently.
pub struct StatsReconciler<M, S, G> {
    match_repo: Arc<M>,
    aggregation: Arc<StatsAggregationUsecase<S, G>>,
    config: ReconcilerConfig,
    last_run: Arc<Mutex<Option<DateTime<Utc>>>>,
    is_running: Arc<Mutex<bool>>,
}

impl<M, S, G> Clone for StatsReconciler<M, S, G> {
    fn clone(&self) -> Self {
        Self {
            match_repo: self.match_repo.clone(),
            aggregation: self.aggregation.clone(),
            config: self.config.clone(),
            last_run: self.last_run.clone(),
            is_running: self.is_running.clone(),
        }
    }
}

impl<M, S, G> StatsReconciler<M, S, G>
where
    M: MatchRepository + 'static,
    S: PlayerStatsRepository + 'static,
    G: GameRepository + 'static,
{
    pub fn new(
        match_repo: Arc<M>,
        aggregation: Arc<StatsAggregationUsecase<S, G>>,
        config: ReconcilerConfig,
    ) -> Self {
        Self {
            match_repo,
            aggregation,
            config,
            last_run: Arc::new(Mutex::new(None)),
            is_running: Arc::new(Mutex::new(false)),
        }
    }

    /// Spawns the background reconciliation loop.
    pub fn start(&self) {
        if !self.config.enabled {
            info!("Stats reconciler is disabled by configuration");
            return;
        }

        {
            let mut running = self.is_running.lock().unwrap();
            if *running {
                warn!("Stats reconciler is already running");
                return;
            }
            *running = true;
        }

        info!(
            "Starting stats reconciler (interval: {}s, batch size: {})",
            self.config.interval_secs, self.config.batch_size
        );

        let reconciler = self.clone();
        tokio::spawn(async move {
            loop {
                if !*reconciler.is_running.lock().unwrap() {
                    info!("Stats reconciler loop exiting");
                    break;
                }

                match reconciler.run_once().await {
                    Ok(applied) => {
                        if applied > 0 {
                            info!("Reconciled {} verified match(es)", applied);
                        }
                        *reconciler.last_run.lock().unwrap() = Some(Utc::now());
                    }
                    Err(e) => {
                        error!("Reconciliation sweep failed: {}", e);
                    }
                }

                sleep(Duration::from_secs(reconciler.config.interval_secs)).await;
            }
        });
    }

    pub fn stop(&self) {
        *self.is_running.lock().unwrap() = false;
        info!("Stopping stats reconciler...");
    }

    pub fn last_run(&self) -> Option<DateTime<Utc>> {
        *self.last_run.lock().unwrap()
    }

    /// One reconciliation sweep; returns how many matches were applied.
    pub async fn run_once(&self) -> shared::Result<usize> {
        let pending = self
            .match_repo
            .list_verified_unapplied(self.config.batch_size)
            .await?;

        let mut applied = 0;
        for m in pending {
            match self.aggregation.apply_verified_match(&m).await {
                Ok(()) => {
                    self.match_repo.mark_stats_applied(m.id).await?;
                    applied += 1;
                }
                Err(e) => {
                    // Left unapplied; retried next sweep
                    warn!("Match {} still cannot be applied: {}", m.id, e);
                }
            }
        }
        Ok(applied)
    }
}
