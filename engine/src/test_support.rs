//! In-memory repository implementations shared by the usecase tests.

use async_trait::async_trait;
use chrono::Utc;
use shared::{Game, Match, MatchStatus, PlayerStats, Result, SharedError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::games::repository::GameRepository;
use crate::matches::repository::MatchRepository;
use crate::stats::repository::PlayerStatsRepository;

pub fn warzone_game() -> Game {
    Game::new(
        "game/warzone".to_string(),
        "warzone".to_string(),
        "Warzone".to_string(),
        HashMap::new(),
        HashMap::from([
            ("kd_ratio".to_string(), 0.40),
            ("avg_kills".to_string(), 0.30),
            ("avg_damage".to_string(), 0.20),
            ("consistency".to_string(), 0.10),
        ]),
        Utc::now(),
    )
    .unwrap()
}

#[derive(Default)]
pub struct InMemoryGameRepository {
    games: Mutex<HashMap<String, Game>>,
}

impl InMemoryGameRepository {
    pub fn with_games(games: Vec<Game>) -> Arc<Self> {
        let repo = Self::default();
        {
            let mut map = repo.games.lock().unwrap();
            for game in games {
                map.insert(game.id.clone(), game);
            }
        }
        Arc::new(repo)
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn get_game(&self, game_id: &str) -> Result<Game> {
        self.games
            .lock()
            .unwrap()
            .get(game_id)
            .cloned()
            .ok_or_else(|| SharedError::NotFound(format!("game {}", game_id)))
    }

    async fn get_game_by_slug(&self, slug: &str) -> Result<Game> {
        self.games
            .lock()
            .unwrap()
            .values()
            .find(|g| g.slug == slug)
            .cloned()
            .ok_or_else(|| SharedError::NotFound(format!("game slug {}", slug)))
    }
}

/// Version-checked in-memory stats store. `fail_saves` makes the next N
/// save calls fail with a database error to exercise retry paths;
/// `fail_on_save` fails one specific save call for partial-failure
/// scenarios.
#[derive(Default)]
pub struct InMemoryPlayerStatsRepository {
    store: Mutex<HashMap<(String, String), PlayerStats>>,
    fail_saves: AtomicU32,
    conflict_saves: AtomicU32,
    save_calls: AtomicU32,
    fail_on_save: AtomicU32,
}

impl InMemoryPlayerStatsRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_next_saves(&self, count: u32) {
        self.fail_saves.store(count, Ordering::SeqCst);
    }

    pub fn conflict_next_saves(&self, count: u32) {
        self.conflict_saves.store(count, Ordering::SeqCst);
    }

    /// Fails the nth save call (1-based) with a database error.
    pub fn fail_save_number(&self, n: u32) {
        self.fail_on_save.store(n, Ordering::SeqCst);
    }

    pub fn insert(&self, stats: PlayerStats) {
        self.store
            .lock()
            .unwrap()
            .insert((stats.player_id.clone(), stats.game_id.clone()), stats);
    }
}

#[async_trait]
impl PlayerStatsRepository for InMemoryPlayerStatsRepository {
    async fn find(&self, player_id: &str, game_id: &str) -> Result<Option<PlayerStats>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .get(&(player_id.to_string(), game_id.to_string()))
            .cloned())
    }

    async fn get_or_create(&self, player_id: &str, game_id: &str) -> Result<PlayerStats> {
        let mut store = self.store.lock().unwrap();
        Ok(store
            .entry((player_id.to_string(), game_id.to_string()))
            .or_insert_with(|| PlayerStats::new(player_id, game_id))
            .clone())
    }

    async fn save(&self, stats: &PlayerStats) -> Result<()> {
        let call = self.save_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on_save.load(Ordering::SeqCst) {
            return Err(SharedError::Database("injected save failure".to_string()));
        }
        if self.fail_saves.load(Ordering::SeqCst) > 0 {
            self.fail_saves.fetch_sub(1, Ordering::SeqCst);
            return Err(SharedError::Database("injected save failure".to_string()));
        }
        if self.conflict_saves.load(Ordering::SeqCst) > 0 {
            self.conflict_saves.fetch_sub(1, Ordering::SeqCst);
            return Err(SharedError::Conflict("injected stale version".to_string()));
        }

        let mut store = self.store.lock().unwrap();
        let key = (stats.player_id.clone(), stats.game_id.clone());
        if let Some(existing) = store.get(&key) {
            if existing.version != stats.version {
                return Err(SharedError::Conflict(format!(
                    "stale version {} (stored {})",
                    stats.version, existing.version
                )));
            }
        }
        let mut updated = stats.clone();
        updated.version += 1;
        store.insert(key, updated);
        Ok(())
    }

    async fn list_by_game(&self, game_id: &str) -> Result<Vec<PlayerStats>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .values()
            .filter(|s| s.game_id == game_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryMatchRepository {
    matches: Mutex<HashMap<Uuid, Match>>,
}

impl InMemoryMatchRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn list_where<F>(&self, pred: F, limit: usize, offset: usize, newest_first: bool) -> Result<Vec<Match>>
    where
        F: Fn(&Match) -> bool,
    {
        let matches = self.matches.lock().unwrap();
        let mut rows: Vec<Match> = matches.values().filter(|m| pred(m)).cloned().collect();
        rows.sort_by(|a, b| {
            if newest_first {
                b.created_at.cmp(&a.created_at)
            } else {
                a.created_at.cmp(&b.created_at)
            }
        });
        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }
}

#[async_trait]
impl MatchRepository for InMemoryMatchRepository {
    async fn insert(&self, m: &Match) -> Result<()> {
        self.matches.lock().unwrap().insert(m.id, m.clone());
        Ok(())
    }

    async fn get(&self, match_id: Uuid) -> Result<Match> {
        self.matches
            .lock()
            .unwrap()
            .get(&match_id)
            .cloned()
            .ok_or_else(|| SharedError::NotFound(format!("match {}", match_id)))
    }

    async fn save_transition(&self, m: &Match) -> Result<()> {
        let mut matches = self.matches.lock().unwrap();
        let stored = matches
            .get_mut(&m.id)
            .ok_or_else(|| SharedError::NotFound(format!("match {}", m.id)))?;
        if stored.status != MatchStatus::Draft {
            return Err(SharedError::MatchNotDraft(m.id.to_string()));
        }
        *stored = m.clone();
        Ok(())
    }

    async fn mark_stats_applied(&self, match_id: Uuid) -> Result<()> {
        let mut matches = self.matches.lock().unwrap();
        let stored = matches
            .get_mut(&match_id)
            .ok_or_else(|| SharedError::NotFound(format!("match {}", match_id)))?;
        stored.stats_applied = true;
        Ok(())
    }

    async fn list_verified_unapplied(&self, limit: usize) -> Result<Vec<Match>> {
        let matches = self.matches.lock().unwrap();
        let mut pending: Vec<Match> = matches
            .values()
            .filter(|m| m.status == MatchStatus::Verified && !m.stats_applied)
            .cloned()
            .collect();
        pending.sort_by_key(|m| m.created_at);
        pending.truncate(limit);
        Ok(pending)
    }

    async fn list_by_tournament(
        &self,
        tournament_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Match>> {
        self.list_where(|m| m.tournament_id == tournament_id, limit, offset, true)
    }

    async fn list_by_team(
        &self,
        team_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Match>> {
        self.list_where(|m| m.team_id == team_id, limit, offset, true)
    }

    async fn list_by_player(
        &self,
        player_id: &str,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<Match>> {
        self.list_where(
            |m| m.player_entries.iter().any(|e| e.player_id == player_id),
            limit,
            offset,
            true,
        )
    }

    async fn list_unverified(&self, limit: usize, offset: usize) -> Result<Vec<Match>> {
        self.list_where(|m| m.status == MatchStatus::Draft, limit, offset, false)
    }
}
