//! Solver configuration.
//!
//! Load from TOML to pick the search strategy and guards without code changes.
//!
//! ```
//! use slider_puzzle::{SolverConfig, Strategy};
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     strategy = "visited_set"
//!     expansion_limit = 100000
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, Strategy::VisitedSet);
//! assert!(config.check_solvable);
//! ```

use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// How the search suppresses revisiting states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Skip only the neighbor that undoes the previous move.
    #[default]
    OneStep,

    /// Track every expanded board and never expand or enqueue one twice.
    VisitedSet,
}

/// Main solver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Revisit suppression used by the search.
    pub strategy: Strategy,

    /// Reject unsolvable boards before searching.
    pub check_solvable: bool,

    /// Give up after expanding this many nodes.
    pub expansion_limit: Option<usize>,

    /// Seed for reproducible shuffles.
    pub random_seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::OneStep,
            check_solvable: true,
            expansion_limit: None,
            random_seed: None,
        }
    }
}

impl SolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.expansion_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "expansion_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_check_solvable(mut self, check: bool) -> Self {
        self.check_solvable = check;
        self
    }

    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.expansion_limit = Some(limit);
        self
    }

    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// RNG for shuffling: seeded when `random_seed` is set, from OS entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
