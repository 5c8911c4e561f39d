//! # 8-Puzzle Solver Library
//!
//! This library provides a state-space search engine for the 3x3 sliding-tile puzzle:
//! a board model, a family of heuristic estimators, and interchangeable search
//! strategies that return a path of blank moves from a start board to a goal.
//!
//! It is used by two binaries:
//! - `solve_puzzle`: solves one start/goal pair with a chosen strategy and prints the
//!   moves, move count and elapsed time.
//! - `strategy_evaluator`: runs every strategy over seeded scrambles and compares path
//!   lengths and expansion counts.
//!
//! ## Modules
//! - `engine`: the immutable `Board`, the `Action` enum, successor generation, parity
//!   and seeded scrambling.
//! - `heuristics`: Manhattan, Nilsson sequence, linear conflict and a pattern-database
//!   stand-in, plus the `Heuristic` selector.
//! - `node`: `SearchNode`, the parent-linked search tree and path reconstruction.
//! - `solver`: the `SearchStrategy` trait and its BFS, DFS, IDDFS, A* and greedy
//!   implementations.
//! - `manager`: `SolveManager`, the strategy selector and solution reports.
//! - `config`: TOML solver configuration.
//! - `utils`: parsing boards from text.
//! - `logging`: tracing subscriber setup for the binaries.
//!
//! ## Example
//! ```
//! use eight_puzzle_solver::{Board, Heuristic, SolveManager, StrategyKind};
//!
//! let initial = eight_puzzle_solver::utils::parse_board("1 2 3 4 5 6 0 7 8").unwrap();
//! let manager =
//!     SolveManager::with_kind(initial, Board::goal(), StrategyKind::AStar, Heuristic::Manhattan, 50);
//! let outcome = manager.solve_timed();
//! assert_eq!(outcome.solution.unwrap().action_string(), "R R");
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod logging;
pub mod manager;
pub mod node;
pub mod solver;
pub mod utils;

pub use engine::{Action, Board};
pub use error::{PuzzleError, Result};
pub use heuristics::Heuristic;
pub use manager::{SolveManager, SolveOutcome, Solution, StrategyKind};
pub use node::SearchNode;
pub use solver::{SearchLimits, SearchStats, SearchStrategy};
