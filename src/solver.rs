use crate::engine::Board;
use crate::heuristics::{Heuristic, HeuristicFn};
use crate::node::SearchNode;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use std::rc::Rc;
use tracing::{debug, trace};

/// Hard ceiling on the iterative-deepening depth limit. Bounds both stack depth and
/// running time of `IterativeDeepening`.
pub const MAX_IDDFS_DEPTH: u32 = 50;

/// Counters collected during a single search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose successors were generated.
    pub expanded: usize,
    /// Child nodes created and handed to the frontier (or recursed into).
    pub generated: usize,
    /// Set when the search stopped because `SearchLimits::max_expansions` was hit.
    pub limit_reached: bool,
}

/// Optional guard on how much work a search may do. Unlimited by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_expansions: Option<usize>,
}

impl SearchLimits {
    pub fn unlimited() -> Self {
        SearchLimits::default()
    }

    pub fn with_max_expansions(max_expansions: usize) -> Self {
        SearchLimits {
            max_expansions: Some(max_expansions),
        }
    }

    // Records the stop on `stats` when no expansion budget is left.
    fn exhausted(&self, stats: &mut SearchStats) -> bool {
        match self.max_expansions {
            Some(max) if stats.expanded >= max => {
                stats.limit_reached = true;
                true
            }
            _ => false,
        }
    }
}

/// A search over the 8-puzzle state space.
///
/// Implementations return the terminal node whose state equals `goal`, or `None` when
/// the frontier empties, the depth cap is reached, or the expansion limit runs out.
/// `None` is an ordinary outcome, not an error.
pub trait SearchStrategy {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Runs the search, recording counters into `stats`.
    fn search_with_stats(
        &self,
        initial: &Board,
        goal: &Board,
        limits: &SearchLimits,
        stats: &mut SearchStats,
    ) -> Option<Rc<SearchNode>>;

    /// Runs the search without limits, discarding the counters.
    fn search(&self, initial: &Board, goal: &Board) -> Option<Rc<SearchNode>> {
        let mut stats = SearchStats::default();
        self.search_with_stats(initial, goal, &SearchLimits::unlimited(), &mut stats)
    }
}

fn log_finish(name: &str, result: &Option<Rc<SearchNode>>, stats: &SearchStats) {
    debug!(
        strategy = name,
        found = result.is_some(),
        moves = result.as_ref().map(|n| n.depth()),
        expanded = stats.expanded,
        generated = stats.generated,
        limit_reached = stats.limit_reached,
        "search finished"
    );
}

/// Breadth-first search over a FIFO queue.
///
/// States enter the visited set when they are expanded, not when they are generated,
/// so the same board can sit in the queue more than once. A dequeued entry whose state
/// was already expanded is dropped without expanding it again. Returns a shortest path.
#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirst;

impl SearchStrategy for BreadthFirst {
    fn name(&self) -> &'static str {
        "bfs"
    }

    fn search_with_stats(
        &self,
        initial: &Board,
        goal: &Board,
        limits: &SearchLimits,
        stats: &mut SearchStats,
    ) -> Option<Rc<SearchNode>> {
        debug!(strategy = self.name(), "search started");
        let mut queue = VecDeque::new();
        queue.push_back(SearchNode::root(*initial, 0));
        let mut visited: HashSet<Board> = HashSet::new();

        let result = loop {
            let Some(node) = queue.pop_front() else {
                break None;
            };
            if node.state() == goal {
                break Some(node);
            }
            if !visited.insert(*node.state()) {
                continue;
            }
            if limits.exhausted(stats) {
                break None;
            }
            stats.expanded += 1;

            for (action, next) in node.state().successors() {
                if !visited.contains(&next) {
                    queue.push_back(SearchNode::child(&node, action, next, 0));
                    stats.generated += 1;
                }
            }
        };

        log_finish(self.name(), &result, stats);
        result
    }
}

/// Depth-first search over an explicit LIFO stack.
///
/// Successors are pushed in reverse so they pop in up, down, left, right order.
/// Visited-set handling matches `BreadthFirst`. Terminates on the finite 8-puzzle
/// space, but the path it returns is usually far from shortest.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirst;

impl SearchStrategy for DepthFirst {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn search_with_stats(
        &self,
        initial: &Board,
        goal: &Board,
        limits: &SearchLimits,
        stats: &mut SearchStats,
    ) -> Option<Rc<SearchNode>> {
        debug!(strategy = self.name(), "search started");
        let mut stack = vec![SearchNode::root(*initial, 0)];
        let mut visited: HashSet<Board> = HashSet::new();

        let result = loop {
            let Some(node) = stack.pop() else {
                break None;
            };
            if node.state() == goal {
                break Some(node);
            }
            if !visited.insert(*node.state()) {
                continue;
            }
            if limits.exhausted(stats) {
                break None;
            }
            stats.expanded += 1;

            for (action, next) in node.state().successors().into_iter().rev() {
                if !visited.contains(&next) {
                    stack.push(SearchNode::child(&node, action, next, 0));
                    stats.generated += 1;
                }
            }
        };

        log_finish(self.name(), &result, stats);
        result
    }
}

enum DepthLimited {
    Found(Rc<SearchNode>),
    NotFound,
    Aborted,
}

/// Iterative-deepening depth-first search.
///
/// Runs a recursive depth-limited search with limits `0, 1, 2, ...` below the depth
/// cap and returns the first hit. No visited set is kept, neither across iterations
/// nor within one, so memory stays proportional to the current depth. The cap never
/// exceeds `MAX_IDDFS_DEPTH`.
#[derive(Clone, Copy, Debug)]
pub struct IterativeDeepening {
    depth_cap: u32,
}

impl IterativeDeepening {
    pub fn new() -> Self {
        IterativeDeepening {
            depth_cap: MAX_IDDFS_DEPTH,
        }
    }

    /// Uses a smaller cap, clamped to `1..=MAX_IDDFS_DEPTH`. A cap of at least one
    /// keeps the depth-0 round, so a start equal to the goal is always found.
    pub fn with_depth_cap(depth_cap: u32) -> Self {
        IterativeDeepening {
            depth_cap: depth_cap.clamp(1, MAX_IDDFS_DEPTH),
        }
    }

    pub fn depth_cap(&self) -> u32 {
        self.depth_cap
    }

    fn depth_limited(
        node: Rc<SearchNode>,
        goal: &Board,
        remaining: u32,
        limits: &SearchLimits,
        stats: &mut SearchStats,
    ) -> DepthLimited {
        if node.state() == goal {
            return DepthLimited::Found(node);
        }
        if remaining == 0 {
            return DepthLimited::NotFound;
        }
        if limits.exhausted(stats) {
            return DepthLimited::Aborted;
        }
        stats.expanded += 1;

        for (action, next) in node.state().successors() {
            let child = SearchNode::child(&node, action, next, 0);
            stats.generated += 1;
            match Self::depth_limited(child, goal, remaining - 1, limits, stats) {
                DepthLimited::NotFound => {}
                outcome => return outcome,
            }
        }
        DepthLimited::NotFound
    }
}

impl Default for IterativeDeepening {
    fn default() -> Self {
        IterativeDeepening::new()
    }
}

impl SearchStrategy for IterativeDeepening {
    fn name(&self) -> &'static str {
        "iddfs"
    }

    fn search_with_stats(
        &self,
        initial: &Board,
        goal: &Board,
        limits: &SearchLimits,
        stats: &mut SearchStats,
    ) -> Option<Rc<SearchNode>> {
        debug!(strategy = self.name(), depth_cap = self.depth_cap, "search started");
        let mut result = None;

        for depth_limit in 0..self.depth_cap {
            trace!(depth_limit, expanded = stats.expanded, "deepening");
            let root = SearchNode::root(*initial, 0);
            match Self::depth_limited(root, goal, depth_limit, limits, stats) {
                DepthLimited::Found(node) => {
                    result = Some(node);
                    break;
                }
                DepthLimited::NotFound => {}
                DepthLimited::Aborted => break,
            }
        }

        log_finish(self.name(), &result, stats);
        result
    }
}

// Min-heap entry. Equal priorities pop in insertion order.
struct FrontierEntry {
    priority: u32,
    seq: u64,
    node: Rc<SearchNode>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Shared best-first loop. `priority` turns a node into its heap key.
fn best_first(
    name: &'static str,
    initial: &Board,
    goal: &Board,
    heuristic: HeuristicFn,
    priority: fn(&SearchNode) -> u32,
    limits: &SearchLimits,
    stats: &mut SearchStats,
) -> Option<Rc<SearchNode>> {
    debug!(strategy = name, "search started");
    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;
    let root = SearchNode::root(*initial, heuristic(initial, goal));
    frontier.push(FrontierEntry {
        priority: priority(&root),
        seq,
        node: root,
    });
    let mut visited: HashSet<Board> = HashSet::new();

    let result = loop {
        let Some(FrontierEntry { node, .. }) = frontier.pop() else {
            break None;
        };
        if node.state() == goal {
            break Some(node);
        }
        if !visited.insert(*node.state()) {
            continue;
        }
        if limits.exhausted(stats) {
            break None;
        }
        stats.expanded += 1;

        for (action, next) in node.state().successors() {
            if visited.contains(&next) {
                continue;
            }
            let child = SearchNode::child(&node, action, next, heuristic(&next, goal));
            seq += 1;
            frontier.push(FrontierEntry {
                priority: priority(&child),
                seq,
                node: child,
            });
            stats.generated += 1;
        }
    };

    log_finish(name, &result, stats);
    result
}

/// A* search ordered by `cost + depth`.
///
/// `cost` holds the heuristic estimate of the node itself and `depth` its path length.
/// With unit move costs `depth` is the path cost so far, so the key is the usual
/// `f = g + h`. With an admissible estimator the first goal popped is optimal.
#[derive(Clone, Copy, Debug)]
pub struct AStar {
    heuristic: HeuristicFn,
}

impl AStar {
    /// A* with the Manhattan estimator.
    pub fn new() -> Self {
        AStar::with_heuristic(Heuristic::Manhattan)
    }

    pub fn with_heuristic(heuristic: Heuristic) -> Self {
        AStar {
            heuristic: heuristic.function(),
        }
    }

    /// A* with an arbitrary estimator function.
    pub fn with_estimator(heuristic: HeuristicFn) -> Self {
        AStar { heuristic }
    }
}

impl Default for AStar {
    fn default() -> Self {
        AStar::new()
    }
}

impl SearchStrategy for AStar {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn search_with_stats(
        &self,
        initial: &Board,
        goal: &Board,
        limits: &SearchLimits,
        stats: &mut SearchStats,
    ) -> Option<Rc<SearchNode>> {
        best_first(
            self.name(),
            initial,
            goal,
            self.heuristic,
            |node| node.cost() + node.depth(),
            limits,
            stats,
        )
    }
}

/// Greedy best-first search ordered by the heuristic alone.
///
/// Ignores path length entirely, so it tends to expand few nodes but returns long
/// paths.
#[derive(Clone, Copy, Debug)]
pub struct GreedyBestFirst {
    heuristic: HeuristicFn,
}

impl GreedyBestFirst {
    pub fn new() -> Self {
        GreedyBestFirst::with_heuristic(Heuristic::Manhattan)
    }

    pub fn with_heuristic(heuristic: Heuristic) -> Self {
        GreedyBestFirst {
            heuristic: heuristic.function(),
        }
    }

    pub fn with_estimator(heuristic: HeuristicFn) -> Self {
        GreedyBestFirst { heuristic }
    }
}

impl Default for GreedyBestFirst {
    fn default() -> Self {
        GreedyBestFirst::new()
    }
}

impl SearchStrategy for GreedyBestFirst {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn search_with_stats(
        &self,
        initial: &Board,
        goal: &Board,
        limits: &SearchLimits,
        stats: &mut SearchStats,
    ) -> Option<Rc<SearchNode>> {
        best_first(
            self.name(),
            initial,
            goal,
            self.heuristic,
            |node| node.cost(),
            limits,
            stats,
        )
    }
}
