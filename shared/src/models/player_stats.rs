use crate::models::match_record::PlayerMatchEntry;
use crate::models::tier::Tier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Per-(player, game) stat aggregate.
///
/// Created lazily on the first verified match for the pair and mutated only
/// through `record_match` and `apply_ranking`; the ranking score and tier
/// are derived fields owned by the ranking usecase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerStats {
    /// Player document ID (format: "player/{key}")
    pub player_id: String,

    /// Game document ID (format: "game/{key}")
    pub game_id: String,

    /// Raw counters keyed by stat name; schema-flexible per game
    pub stats: HashMap<String, f64>,

    /// Monotonic count of verified matches applied to this aggregate
    pub matches_played: u32,

    /// IDs of the verified matches already folded into the counters; saved
    /// atomically with them, so a half-applied match cannot exist
    pub applied_match_ids: HashSet<Uuid>,

    /// Derived composite score on the 0-1000 scale
    pub ranking_score: f64,

    /// Derived tier, always consistent with `ranking_score`
    pub tier: Tier,

    /// Timestamp of the most recent verified match applied
    pub last_match_at: Option<DateTime<Utc>>,

    /// Optimistic-concurrency token; bumped by the store on every save
    pub version: u64,

    /// When this aggregate was last written (UTC)
    pub updated_at: DateTime<Utc>,
}

impl PlayerStats {
    /// Creates a zeroed aggregate for a (player, game) pair.
    pub fn new(player_id: &str, game_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            game_id: game_id.to_string(),
            stats: HashMap::new(),
            matches_played: 0,
            applied_match_ids: HashSet::new(),
            ranking_score: 0.0,
            tier: Tier::Beginner,
            last_match_at: None,
            version: 0,
            updated_at: Utc::now(),
        }
    }

    /// Returns a raw counter value, defaulting to 0.0 for stats this player
    /// has not accumulated yet.
    pub fn stat(&self, name: &str) -> f64 {
        self.stats.get(name).copied().unwrap_or(0.0)
    }

    /// Applies one verified match entry's deltas to the raw counters and
    /// bumps the match count. A match already folded into this aggregate is
    /// ignored, so reconciliation re-runs never double-count. Does not
    /// touch score or tier; callers must recompute the ranking afterwards.
    pub fn record_match(&mut self, match_id: Uuid, entry: &PlayerMatchEntry, occurred_at: DateTime<Utc>) {
        if !self.applied_match_ids.insert(match_id) {
            return;
        }
        *self.stats.entry("kills".to_string()).or_insert(0.0) += entry.kills as f64;
        *self.stats.entry("deaths".to_string()).or_insert(0.0) += entry.deaths as f64;
        *self.stats.entry("assists".to_string()).or_insert(0.0) += entry.assists as f64;
        *self.stats.entry("damage".to_string()).or_insert(0.0) += entry.damage as f64;
        *self.stats.entry("downs".to_string()).or_insert(0.0) += entry.downs as f64;
        self.matches_played += 1;
        self.last_match_at = Some(occurred_at);
        self.updated_at = Utc::now();
    }

    /// Whether a match's deltas are already part of this aggregate.
    pub fn has_applied(&self, match_id: Uuid) -> bool {
        self.applied_match_ids.contains(&match_id)
    }

    /// Records a freshly computed ranking. The only mutation path for score
    /// and tier, keeping the two consistent by construction.
    pub fn apply_ranking(&mut self, score: f64, tier: Tier) {
        self.ranking_score = score;
        self.tier = tier;
        self.updated_at = Utc::now();
    }
}
