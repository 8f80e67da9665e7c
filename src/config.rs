// Copyright (c) 2025 - Cowboy AI, Inc.
//! Runtime Configuration
//!
//! | Variable                     | Meaning                                   | Default |
//! |------------------------------|-------------------------------------------|---------|
//! | `POKEDEX_SNAPSHOT_THRESHOLD` | Versions between snapshots; `<= 0` = every command | unset (never) |
//! | `POKEDEX_CATCH_THRESHOLD`    | A throw succeeds iff draw > threshold     | `0.5`   |
//! | `POKEDEX_RANDOM_SEED`        | Seed for reproducible draws               | unset (OS entropy) |

use std::str::FromStr;
use thiserror::Error;

use crate::aggregate::random::CatchPolicy;
use crate::schema::RegistryError;

pub const SNAPSHOT_THRESHOLD_VAR: &str = "POKEDEX_SNAPSHOT_THRESHOLD";
pub const CATCH_THRESHOLD_VAR: &str = "POKEDEX_CATCH_THRESHOLD";
pub const RANDOM_SEED_VAR: &str = "POKEDEX_RANDOM_SEED";

/// Configuration error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Catch threshold outside `[0, 1]`
    #[error("Catch threshold must be within [0, 1], got {0}")]
    CatchThresholdOutOfRange(f64),

    /// Aggregate registration failed
    #[error("Registration failed: {0}")]
    Registry(#[from] RegistryError),
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Versions between snapshots (`None` = never snapshot)
    pub snapshot_threshold: Option<i64>,

    /// Catch draw threshold
    pub catch_threshold: f64,

    /// Seed for the process-wide generator
    pub random_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            snapshot_threshold: None,
            catch_threshold: CatchPolicy::DEFAULT_THRESHOLD,
            random_seed: None,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            snapshot_threshold: parse_var(&lookup, SNAPSHOT_THRESHOLD_VAR)?,
            catch_threshold: parse_var(&lookup, CATCH_THRESHOLD_VAR)?
                .unwrap_or(defaults.catch_threshold),
            random_seed: parse_var(&lookup, RANDOM_SEED_VAR)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_snapshot_threshold(mut self, threshold: Option<i64>) -> Self {
        self.snapshot_threshold = threshold;
        self
    }

    pub fn with_catch_threshold(mut self, threshold: f64) -> Self {
        self.catch_threshold = threshold;
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.catch_policy().map(|_| ())
    }

    /// Catch policy described by this configuration
    pub fn catch_policy(&self) -> Result<CatchPolicy, ConfigError> {
        CatchPolicy::new(self.catch_threshold)
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                key,
                value: raw.clone(),
                reason: e.to_string(),
            }),
    }
}
