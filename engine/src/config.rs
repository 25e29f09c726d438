use dotenv::dotenv;
use log::{info, warn};
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub environment: Environment,
    pub aggregation: AggregationConfig,
    pub reconciler: ReconcilerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregationConfig {
    /// Optimistic-save attempts per player before surfacing `Conflict`
    pub max_save_retries: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReconcilerConfig {
    pub enabled: bool,
    pub interval_secs: u64,
    /// Verified-unapplied matches fetched per reconciliation tick
    pub batch_size: usize,
}

impl Config {
    pub fn load() -> Self {
        // Optional .env file; real environment variables win
        dotenv().ok();

        let environment = env::var("RUST_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .parse()
            .unwrap_or(Environment::Development);

        info!("Loading configuration for environment: {:?}", environment);

        Config {
            aggregation: Self::load_aggregation_config(),
            reconciler: Self::load_reconciler_config(&environment),
            environment,
        }
    }

    fn load_aggregation_config() -> AggregationConfig {
        AggregationConfig {
            max_save_retries: Self::env_or("AGGREGATION_MAX_SAVE_RETRIES", 3),
        }
    }

    fn load_reconciler_config(environment: &Environment) -> ReconcilerConfig {
        // Reconciliation stays off in tests so they control retries directly
        let default_enabled = *environment != Environment::Test;
        let enabled = env::var("RECONCILER_ENABLED")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(default_enabled);

        ReconcilerConfig {
            enabled,
            interval_secs: Self::env_or("RECONCILER_INTERVAL_SECS", 60),
            batch_size: Self::env_or("RECONCILER_BATCH_SIZE", 50),
        }
    }

    fn env_or<T: std::str::FromStr + std::fmt::Display>(key: &str, default: T) -> T {
        match env::var(key) {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                warn!("Invalid value '{}' for {}, using default {}", raw, key, default);
                default
            }),
            Err(_) => default,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            aggregation: AggregationConfig {
                max_save_retries: 3,
            },
            reconciler: ReconcilerConfig {
                enabled: true,
                interval_secs: 60,
                batch_size: 50,
            },
        }
    }
}
