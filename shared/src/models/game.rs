use crate::error::{Result, SharedError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::Validate;

/// Maximum allowed deviation of a weight map's sum from 1.0.
pub const WEIGHT_TOLERANCE: f64 = 0.001;

/// Declared type of a stat field in a game's schema.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum StatFieldType {
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "float")]
    Float,
}

/// Schema entry describing one raw stat tracked for a game.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StatField {
    pub field_type: StatFieldType,
    pub min: f64,
    pub max: f64,
    pub label: String,
}

/// Represents a game and its ranking configuration.
///
/// The engine consumes games read-only; creation and weight updates happen
/// in the admin layer, but both paths must go through the validating
/// constructors here so a game can never persist with invalid weights.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct Game {
    /// Document ID (format: "game/{key}")
    #[serde(rename = "_id")]
    pub id: String,

    /// URL-safe identifier used for calculator dispatch (e.g. "warzone")
    #[validate(length(min = 1, message = "Slug is required"))]
    pub slug: String,

    /// Display name
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    /// Stat name -> schema entry for the raw counters this game tracks
    pub stat_schema: HashMap<String, StatField>,

    /// Weight-key -> weight used by the game's score calculator
    pub ranking_weights: HashMap<String, f64>,

    /// When this game was created (UTC)
    pub created_at: DateTime<Utc>,
}

/// Validates a ranking weight map: non-empty, finite values, sum within
/// tolerance of 1.0. Never normalizes a bad map.
pub fn validate_weights(weights: &HashMap<String, f64>) -> Result<()> {
    if weights.is_empty() {
        return Err(SharedError::InvalidRankingWeights(
            "weight map is empty".to_string(),
        ));
    }

    for (key, value) in weights {
        if !value.is_finite() {
            return Err(SharedError::InvalidRankingWeights(format!(
                "weight '{}' is not a finite number",
                key
            )));
        }
    }

    let sum: f64 = weights.values().sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(SharedError::InvalidRankingWeights(format!(
            "weights sum to {:.4}, expected 1.0 +/- {}",
            sum, WEIGHT_TOLERANCE
        )));
    }

    Ok(())
}

impl Game {
    /// Creates a new game, validating the weight map and basic fields.
    pub fn new(
        id: String,
        slug: String,
        name: String,
        stat_schema: HashMap<String, StatField>,
        ranking_weights: HashMap<String, f64>,
        created_at: DateTime<Utc>,
    ) -> Result<Self> {
        validate_weights(&ranking_weights)?;
        let game = Self {
            id,
            slug,
            name,
            stat_schema,
            ranking_weights,
            created_at,
        };
        game.validate()
            .map_err(|e| SharedError::Validation(e.to_string()))?;
        Ok(game)
    }

    /// Returns a copy of this game with updated ranking weights.
    ///
    /// Fails without modifying anything when the new map is invalid.
    pub fn with_ranking_weights(&self, ranking_weights: HashMap<String, f64>) -> Result<Self> {
        validate_weights(&ranking_weights)?;
        Ok(Self {
            ranking_weights,
            ..self.clone()
        })
    }

    /// Looks up a weight by key, falling back to the supplied default when
    /// the game does not configure that key.
    pub fn weight_or(&self, key: &str, default: f64) -> f64 {
        self.ranking_weights.get(key).copied().unwrap_or(default)
    }
}
