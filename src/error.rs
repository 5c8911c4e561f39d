//! Error types for the 8-puzzle solver.
//!
//! Running out of frontier is not an error: strategies report it as `None`.
//! Everything here is raised at the boundary, before a search starts.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for the solver crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PuzzleError {
    #[error("invalid board: {reason}")]
    InvalidBoard { reason: String },

    #[error("cannot parse board '{input}': {reason}")]
    Parse { input: String, reason: String },

    #[error("unknown strategy '{name}' (expected one of: bfs, dfs, iddfs, astar, greedy)")]
    UnknownStrategy { name: String },

    #[error(
        "unknown heuristic '{name}' (expected one of: manhattan, nilsson, linear-conflict, pattern-database)"
    )]
    UnknownHeuristic { name: String },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },
}

impl PuzzleError {
    pub(crate) fn invalid_board(reason: impl Into<String>) -> Self {
        PuzzleError::InvalidBoard {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PuzzleError>;
