use crate::models::match_record::PlayerMatchEntry;
use serde::{Deserialize, Serialize};

/// Payload a team captain submits to record a match result.
///
/// Field-level validation happens in `Match::new`; nothing is persisted for
/// a submission that fails it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchSubmissionDto {
    pub tournament_id: String,
    pub team_id: String,
    pub game_id: String,
    pub placement: i32,
    pub team_kills: i64,
    pub player_entries: Vec<PlayerMatchEntry>,
    pub submitted_by: String,
}
