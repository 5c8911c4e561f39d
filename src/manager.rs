//! Entry point for callers: bind a start board, a goal and a strategy, then solve.
//!
//! `SolveManager` is the only type a front end needs. It delegates to the chosen
//! `SearchStrategy`, times the call from the outside, and turns the terminal node into
//! a `Solution` report or a printed step-by-step path.

use crate::engine::{Action, Board};
use crate::error::PuzzleError;
use crate::heuristics::Heuristic;
use crate::node::{format_actions, SearchNode};
use crate::solver::{
    AStar, BreadthFirst, DepthFirst, GreedyBestFirst, IterativeDeepening, SearchLimits,
    SearchStats, SearchStrategy,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::info;

/// Closed set of strategies a caller can select by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Bfs,
    Dfs,
    Iddfs,
    #[default]
    #[serde(alias = "a*")]
    #[value(name = "astar", alias = "a*")]
    AStar,
    Greedy,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Bfs,
        StrategyKind::Dfs,
        StrategyKind::Iddfs,
        StrategyKind::AStar,
        StrategyKind::Greedy,
    ];

    /// Builds the strategy. `heuristic` is used by A* and greedy search only,
    /// `iddfs_depth_cap` by iterative deepening only.
    pub fn build(&self, heuristic: Heuristic, iddfs_depth_cap: u32) -> Box<dyn SearchStrategy> {
        match self {
            StrategyKind::Bfs => Box::new(BreadthFirst),
            StrategyKind::Dfs => Box::new(DepthFirst),
            StrategyKind::Iddfs => Box::new(IterativeDeepening::with_depth_cap(iddfs_depth_cap)),
            StrategyKind::AStar => Box::new(AStar::with_heuristic(heuristic)),
            StrategyKind::Greedy => Box::new(GreedyBestFirst::with_heuristic(heuristic)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::Bfs => "bfs",
            StrategyKind::Dfs => "dfs",
            StrategyKind::Iddfs => "iddfs",
            StrategyKind::AStar => "astar",
            StrategyKind::Greedy => "greedy",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = PuzzleError;

    /// Accepts the names shown in selector menus, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(StrategyKind::Bfs),
            "dfs" => Ok(StrategyKind::Dfs),
            "iddfs" => Ok(StrategyKind::Iddfs),
            "astar" | "a*" => Ok(StrategyKind::AStar),
            "greedy" => Ok(StrategyKind::Greedy),
            _ => Err(PuzzleError::UnknownStrategy {
                name: s.to_string(),
            }),
        }
    }
}

/// A solved instance, detached from the search tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Moves of the blank from the start board to the goal.
    pub actions: Vec<Action>,
    /// Every board along the way, starting with the initial board.
    pub path: Vec<(Option<Action>, Board)>,
    /// The board the last move produces. Always equal to the goal.
    pub final_board: Board,
}

impl Solution {
    pub fn from_node(node: &SearchNode) -> Self {
        Solution {
            actions: node.actions(),
            path: node.path(),
            final_board: *node.state(),
        }
    }

    pub fn moves(&self) -> usize {
        self.actions.len()
    }

    /// Letters joined by spaces, e.g. `"U L D"`.
    pub fn action_string(&self) -> String {
        format_actions(&self.actions)
    }

    /// Writes each step of the path: the action taken (`None` for the start board)
    /// followed by the board, with a blank line between steps.
    pub fn write_path<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (action, board) in &self.path {
            match action {
                Some(action) => writeln!(out, "Action: {}", action)?,
                None => writeln!(out, "Action: None")?,
            }
            writeln!(out, "{}", board)?;
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Everything a front end reports after a timed solve.
#[derive(Clone, Debug)]
pub struct SolveOutcome {
    pub strategy: &'static str,
    pub solution: Option<Solution>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

impl SolveOutcome {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    /// Three-line report: `Solution: ...`, `Moves: N`, `Time: S.SSSSs`, or
    /// `No solution found.` when the search came back empty.
    pub fn summary(&self) -> String {
        match &self.solution {
            Some(solution) => format!(
                "Solution: {}\nMoves: {}\nTime: {:.4}s",
                solution.action_string(),
                solution.moves(),
                self.elapsed.as_secs_f64()
            ),
            None => "No solution found.".to_string(),
        }
    }
}

/// Binds a start board, a goal board and one strategy.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::manager::SolveManager;
/// use eight_puzzle_solver::solver::AStar;
///
/// let initial = Board::from_rows([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
/// let manager = SolveManager::new(initial, Board::goal(), Box::new(AStar::new()));
///
/// let node = manager.solve().unwrap();
/// assert_eq!(node.action_string(), "R");
///
/// let outcome = manager.solve_timed();
/// assert!(outcome.summary().starts_with("Solution: R\nMoves: 1\n"));
/// ```
pub struct SolveManager {
    initial: Board,
    goal: Board,
    strategy: Box<dyn SearchStrategy>,
    limits: SearchLimits,
}

impl SolveManager {
    pub fn new(initial: Board, goal: Board, strategy: Box<dyn SearchStrategy>) -> Self {
        SolveManager {
            initial,
            goal,
            strategy,
            limits: SearchLimits::unlimited(),
        }
    }

    /// Builds a manager from a strategy selector.
    pub fn with_kind(
        initial: Board,
        goal: Board,
        kind: StrategyKind,
        heuristic: Heuristic,
        iddfs_depth_cap: u32,
    ) -> Self {
        SolveManager::new(initial, goal, kind.build(heuristic, iddfs_depth_cap))
    }

    pub fn with_limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn goal(&self) -> &Board {
        &self.goal
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Runs the strategy and returns its result unchanged.
    pub fn solve(&self) -> Option<Rc<SearchNode>> {
        let mut stats = SearchStats::default();
        self.solve_with_stats(&mut stats)
    }

    pub fn solve_with_stats(&self, stats: &mut SearchStats) -> Option<Rc<SearchNode>> {
        self.strategy
            .search_with_stats(&self.initial, &self.goal, &self.limits, stats)
    }

    /// Runs the strategy with the clock around the call and packages the result.
    pub fn solve_timed(&self) -> SolveOutcome {
        info!(strategy = self.strategy.name(), "solving");
        let mut stats = SearchStats::default();
        let start = Instant::now();
        let result = self.solve_with_stats(&mut stats);
        let elapsed = start.elapsed();

        let solution = result.as_deref().map(Solution::from_node);
        match &solution {
            Some(s) => info!(
                strategy = self.strategy.name(),
                moves = s.moves(),
                expanded = stats.expanded,
                elapsed_ms = elapsed.as_millis() as u64,
                "solved"
            ),
            None => info!(
                strategy = self.strategy.name(),
                expanded = stats.expanded,
                limit_reached = stats.limit_reached,
                elapsed_ms = elapsed.as_millis() as u64,
                "no solution"
            ),
        }

        SolveOutcome {
            strategy: self.strategy.name(),
            solution,
            stats,
            elapsed,
        }
    }

    /// Writes the step-by-step path ending at `node`. See `Solution::write_path`.
    pub fn print_solution<W: Write>(&self, node: &SearchNode, out: &mut W) -> io::Result<()> {
        Solution::from_node(node).write_path(out)
    }
}
