use crate::error::{Result, SharedError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_PLACEMENT: i32 = 1;
pub const MAX_PLACEMENT: i32 = 100;

/// Lifecycle state of a submitted match result.
///
/// Draft is the only non-terminal state; once a match is Verified or
/// Rejected no further transition is permitted, admin override included.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchStatus {
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "verified")]
    Verified,
    #[serde(rename = "rejected")]
    Rejected,
}

/// One player's raw counters for a single match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerMatchEntry {
    pub player_id: String,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub damage: i64,
    pub downs: i64,
}

impl PlayerMatchEntry {
    fn validate(&self) -> Result<()> {
        let counters = [
            ("kills", self.kills),
            ("deaths", self.deaths),
            ("assists", self.assists),
            ("damage", self.damage),
            ("downs", self.downs),
        ];
        for (name, value) in counters {
            if value < 0 {
                return Err(SharedError::InvalidPlayerStats(format!(
                    "{} for {} is negative ({})",
                    name, self.player_id, value
                )));
            }
        }
        Ok(())
    }
}

/// A match result submitted by a team captain.
///
/// Only a Verified match may feed the stats-aggregation pipeline; Draft and
/// Rejected matches never influence aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Match {
    pub id: Uuid,
    pub tournament_id: String,
    pub team_id: String,
    pub game_id: String,
    pub status: MatchStatus,

    /// Final team placement, 1 (winner) through 100
    pub placement: i32,

    /// Team kill total for the match
    pub team_kills: i64,

    /// Per-player counters; at least one entry required
    pub player_entries: Vec<PlayerMatchEntry>,

    /// Player ID of the submitting captain
    pub submitted_by: String,

    /// Admin who verified or rejected this match
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,

    /// Whether a Verified match's deltas have been applied to the
    /// player aggregates; reconciliation retries while this is false
    pub stats_applied: bool,

    pub created_at: DateTime<Utc>,
}

impl Match {
    /// Creates a new match in Draft state, validating every field before
    /// the value exists. An invalid submission is rejected here and never
    /// reaches persistence.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tournament_id: String,
        team_id: String,
        game_id: String,
        placement: i32,
        team_kills: i64,
        player_entries: Vec<PlayerMatchEntry>,
        submitted_by: String,
    ) -> Result<Self> {
        if !(MIN_PLACEMENT..=MAX_PLACEMENT).contains(&placement) {
            return Err(SharedError::InvalidPlacement(placement));
        }
        if team_kills < 0 {
            return Err(SharedError::InvalidPlayerStats(format!(
                "team kill total is negative ({})",
                team_kills
            )));
        }
        if player_entries.is_empty() {
            return Err(SharedError::MissingPlayerStats);
        }
        for entry in &player_entries {
            entry.validate()?;
        }

        Ok(Self {
            id: Uuid::new_v4(),
            tournament_id,
            team_id,
            game_id,
            status: MatchStatus::Draft,
            placement,
            team_kills,
            player_entries,
            submitted_by,
            verified_by: None,
            verified_at: None,
            rejection_reason: None,
            stats_applied: false,
            created_at: Utc::now(),
        })
    }

    /// Marks this match as verified by an administrator.
    ///
    /// Allowed only from Draft; any prior rejection reason is cleared.
    pub fn verify(&mut self, admin_id: &str) -> Result<()> {
        if self.status != MatchStatus::Draft {
            return Err(SharedError::MatchNotDraft(self.id.to_string()));
        }
        self.status = MatchStatus::Verified;
        self.verified_by = Some(admin_id.to_string());
        self.verified_at = Some(Utc::now());
        self.rejection_reason = None;
        Ok(())
    }

    /// Marks this match as rejected by an administrator with a reason.
    ///
    /// Allowed only from Draft.
    pub fn reject(&mut self, admin_id: &str, reason: &str) -> Result<()> {
        if self.status != MatchStatus::Draft {
            return Err(SharedError::MatchNotDraft(self.id.to_string()));
        }
        self.status = MatchStatus::Rejected;
        self.verified_by = Some(admin_id.to_string());
        self.verified_at = Some(Utc::now());
        self.rejection_reason = Some(reason.to_string());
        Ok(())
    }

    pub fn is_draft(&self) -> bool {
        self.status == MatchStatus::Draft
    }

    pub fn is_verified(&self) -> bool {
        self.status == MatchStatus::Verified
    }
}
