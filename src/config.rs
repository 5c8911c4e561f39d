//! Solver configuration.
//!
//! Load the default strategy, heuristic and search limits from TOML so batch runs
//! can be tuned without code changes. Every key is optional.
//!
//! # Examples
//!
//! ```
//! use eight_puzzle_solver::config::SolverConfig;
//! use eight_puzzle_solver::heuristics::Heuristic;
//! use eight_puzzle_solver::manager::StrategyKind;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     strategy = "iddfs"
//!     heuristic = "linear-conflict"
//!     max_expansions = 100000
//!     iddfs_depth_limit = 30
//!     goal = [1, 2, 3, 8, 0, 4, 7, 6, 5]
//! "#).unwrap();
//!
//! assert_eq!(config.strategy, StrategyKind::Iddfs);
//! assert_eq!(config.heuristic, Heuristic::LinearConflict);
//! assert_eq!(config.limits().max_expansions, Some(100_000));
//! assert_eq!(config.goal_board().unwrap().locate_blank(), (1, 1));
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::Board;
use crate::heuristics::Heuristic;
use crate::manager::StrategyKind;
use crate::solver::{SearchLimits, MAX_IDDFS_DEPTH};

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

fn default_iddfs_depth_limit() -> u32 {
    MAX_IDDFS_DEPTH
}

/// Solver settings shared by the binaries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SolverConfig {
    /// Search strategy used when the caller does not pick one.
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Estimator for the informed strategies.
    #[serde(default)]
    pub heuristic: Heuristic,

    /// Stop a search after this many expansions.
    #[serde(default)]
    pub max_expansions: Option<usize>,

    /// Depth cap for iterative deepening, clamped to `MAX_IDDFS_DEPTH`.
    #[serde(default = "default_iddfs_depth_limit")]
    pub iddfs_depth_limit: u32,

    /// Goal board as nine row-major cells. Defaults to the canonical goal.
    #[serde(default)]
    pub goal: Option<Vec<u8>>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            strategy: StrategyKind::default(),
            heuristic: Heuristic::default(),
            max_expansions: None,
            iddfs_depth_limit: MAX_IDDFS_DEPTH,
            goal: None,
        }
    }
}

impl SolverConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: SolverConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.iddfs_depth_limit > MAX_IDDFS_DEPTH {
            return Err(ConfigError::Invalid(format!(
                "iddfs_depth_limit {} exceeds the maximum of {}",
                self.iddfs_depth_limit, MAX_IDDFS_DEPTH
            )));
        }
        if self.iddfs_depth_limit == 0 {
            return Err(ConfigError::Invalid(
                "iddfs_depth_limit must be positive".to_string(),
            ));
        }
        if self.max_expansions == Some(0) {
            return Err(ConfigError::Invalid(
                "max_expansions must be positive".to_string(),
            ));
        }
        self.goal_board()?;
        Ok(())
    }

    /// The configured goal, or the canonical goal when none is set.
    pub fn goal_board(&self) -> Result<Board, ConfigError> {
        match &self.goal {
            Some(cells) => {
                Board::from_cells(cells).map_err(|e| ConfigError::Invalid(format!("goal: {}", e)))
            }
            None => Ok(Board::goal()),
        }
    }

    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = SolverConfig::from_toml_str("").unwrap();
        assert_eq!(config, SolverConfig::default());
        assert_eq!(config.strategy, StrategyKind::AStar);
        assert_eq!(config.heuristic, Heuristic::Manhattan);
        assert_eq!(config.iddfs_depth_limit, 50);
        assert_eq!(config.goal_board().unwrap(), Board::goal());
        assert_eq!(config.limits(), SearchLimits::unlimited());
    }

    #[test]
    fn test_strategy_names() {
        for (text, kind) in [
            ("bfs", StrategyKind::Bfs),
            ("dfs", StrategyKind::Dfs),
            ("iddfs", StrategyKind::Iddfs),
            ("astar", StrategyKind::AStar),
            ("greedy", StrategyKind::Greedy),
        ] {
            let config = SolverConfig::from_toml_str(&format!("strategy = \"{}\"", text)).unwrap();
            assert_eq!(config.strategy, kind);
        }
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let err = SolverConfig::from_toml_str("strategy = \"hill-climb\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        assert!(SolverConfig::from_toml_str("depth = 3").is_err());
    }

    #[test]
    fn test_depth_limit_above_cap_is_rejected() {
        let err = SolverConfig::from_toml_str("iddfs_depth_limit = 80").unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum of 50"));
    }

    #[test]
    fn test_zero_depth_limit_is_rejected() {
        let err = SolverConfig::from_toml_str("iddfs_depth_limit = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("iddfs_depth_limit must be positive"));
    }

    #[test]
    fn test_invalid_goal_is_rejected() {
        let err = SolverConfig::from_toml_str("goal = [1, 2, 3]").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("goal"));
    }

    #[test]
    fn test_zero_expansions_is_rejected() {
        assert!(SolverConfig::from_toml_str("max_expansions = 0").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SolverConfig::load("/nonexistent/solver.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
