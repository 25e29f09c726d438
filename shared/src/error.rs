use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq)]
pub enum SharedError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid ranking weights: {0}")]
    InvalidRankingWeights(String),

    #[error("Invalid stats: {0}")]
    InvalidStats(String),

    #[error("No calculator registered for game: {0}")]
    UnsupportedGame(String),

    #[error("Match {0} is not in draft state")]
    MatchNotDraft(String),

    #[error("Invalid placement: {0} (must be between 1 and 100)")]
    InvalidPlacement(i32),

    #[error("Match must include at least one player stat entry")]
    MissingPlayerStats,

    #[error("Invalid player stats: {0}")]
    InvalidPlayerStats(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationErrors> for SharedError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(error: serde_json::Error) -> Self {
        Self::Validation(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SharedError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_match_not_draft_display() {
        let err = SharedError::MatchNotDraft("match/123".to_string());
        assert_eq!(err.to_string(), "Match match/123 is not in draft state");
    }

    #[test]
    fn test_invalid_placement_display() {
        let err = SharedError::InvalidPlacement(150);
        assert_eq!(
            err.to_string(),
            "Invalid placement: 150 (must be between 1 and 100)"
        );
    }

    #[test]
    fn test_from_validation_errors() {
        use validator::ValidationError;

        let mut errors = ValidationErrors::new();
        let mut validation_error = ValidationError::new("range");
        validation_error.message = Some("out of range".into());
        errors.add("placement", validation_error);

        let err: SharedError = errors.into();
        assert!(matches!(err, SharedError::Validation(_)));
    }

    #[test]
    fn test_errors_round_trip_through_json() {
        let err = SharedError::UnsupportedGame("warzone".to_string());
        let json = serde_json::to_string(&err).unwrap();
        let back: SharedError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, back);
    }
}
