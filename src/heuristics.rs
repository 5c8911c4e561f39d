use crate::engine::{Board, BLANK, BOARD_SIZE, CELL_COUNT};
use crate::error::PuzzleError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Signature shared by every estimator: `(state, goal) -> estimated remaining moves`.
pub type HeuristicFn = fn(&Board, &Board) -> u32;

/// Border cells in clockwise order, starting at the top-left corner.
const SPIRAL_ORDER: [(usize, usize); 8] = [
    (0, 0),
    (0, 1),
    (0, 2),
    (1, 2),
    (2, 2),
    (2, 1),
    (2, 0),
    (1, 0),
];

/// Penalty added for each out-of-sequence neighbour pair on the border.
const SEQUENCE_PENALTY: u32 = 2;

/// Penalty added when the centre cell is occupied by a tile.
const CENTRE_PENALTY: u32 = 1;

// Goal coordinates indexed by tile value.
fn goal_positions(goal: &Board) -> [(usize, usize); CELL_COUNT] {
    let mut positions = [(0, 0); CELL_COUNT];
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            positions[goal.get(r, c) as usize] = (r, c);
        }
    }
    positions
}

/// Sum of the Manhattan distances of every tile from its goal cell.
///
/// The blank is not counted. Admissible and consistent, and the default estimator
/// for A*.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::heuristics::manhattan;
///
/// let goal = Board::goal();
/// let one_off = Board::from_rows([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
/// assert_eq!(manhattan(&goal, &goal), 0);
/// assert_eq!(manhattan(&one_off, &goal), 1);
/// ```
pub fn manhattan(state: &Board, goal: &Board) -> u32 {
    let targets = goal_positions(goal);
    let mut total = 0;
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            let value = state.get(r, c);
            if value != BLANK {
                let (gr, gc) = targets[value as usize];
                total += (r.abs_diff(gr) + c.abs_diff(gc)) as u32;
            }
        }
    }
    total
}

/// Nilsson's sequence score: Manhattan distance plus a placement penalty.
///
/// Walking the border clockwise, every neighbour pair `(a, b)` with
/// `(a + 1) % 8 != b % 8` adds 2, and a tile in the centre adds 1. The walk
/// is open: the last border cell is not compared back to the first.
///
/// The penalty is blind to the goal layout, so the raw score of a solved board can be
/// positive. A board equal to `goal` always scores 0.
///
/// This estimator can overestimate and is not admissible.
pub fn nilsson_sequence(state: &Board, goal: &Board) -> u32 {
    if state == goal {
        return 0;
    }

    let border: Vec<u32> = SPIRAL_ORDER
        .iter()
        .map(|&(r, c)| state.get(r, c) as u32)
        .collect();
    let mut sequence_score = 0;
    for pair in border.windows(2) {
        if (pair[0] + 1) % 8 != pair[1] % 8 {
            sequence_score += SEQUENCE_PENALTY;
        }
    }
    if state.get(1, 1) != BLANK {
        sequence_score += CENTRE_PENALTY;
    }

    manhattan(state, goal) + sequence_score
}

/// Counts reversed pairs in one line.
///
/// `goal_index` maps a tile to its index along this line in the goal, or `None` when
/// the tile belongs to another line.
fn line_conflicts(line: &[u8; BOARD_SIZE], goal_index: impl Fn(u8) -> Option<usize>) -> u32 {
    let mut conflicts = 0;
    for i in 0..BOARD_SIZE {
        for j in i + 1..BOARD_SIZE {
            if line[i] == BLANK || line[j] == BLANK {
                continue;
            }
            if let (Some(gi), Some(gj)) = (goal_index(line[i]), goal_index(line[j])) {
                if gi > gj {
                    conflicts += 1;
                }
            }
        }
    }
    conflicts
}

/// Manhattan distance plus two moves for every linear conflict.
///
/// Two tiles are in linear conflict when they sit in the same row (or column), both
/// belong to that row (or column) in the goal, and appear in reversed order. Each such
/// pair needs at least two moves beyond their Manhattan distance, so the estimate stays
/// admissible while dominating plain Manhattan.
pub fn linear_conflict(state: &Board, goal: &Board) -> u32 {
    let targets = goal_positions(goal);
    let mut conflicts = 0;

    for i in 0..BOARD_SIZE {
        let row = state.rows()[i];
        conflicts += line_conflicts(&row, |tile| {
            let (gr, gc) = targets[tile as usize];
            (gr == i).then_some(gc)
        });

        let col = [state.get(0, i), state.get(1, i), state.get(2, i)];
        conflicts += line_conflicts(&col, |tile| {
            let (gr, gc) = targets[tile as usize];
            (gc == i).then_some(gr)
        });
    }

    manhattan(state, goal) + 2 * conflicts
}

/// Stand-in for a pattern database lookup. Always 0, which turns A* into
/// uniform-cost search.
pub fn pattern_database(_state: &Board, _goal: &Board) -> u32 {
    0
}

/// Selector over the available estimators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    #[default]
    Manhattan,
    Nilsson,
    LinearConflict,
    #[value(alias = "pdb")]
    PatternDatabase,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::Manhattan,
        Heuristic::Nilsson,
        Heuristic::LinearConflict,
        Heuristic::PatternDatabase,
    ];

    /// The estimator function behind this selector.
    pub fn function(&self) -> HeuristicFn {
        match self {
            Heuristic::Manhattan => manhattan,
            Heuristic::Nilsson => nilsson_sequence,
            Heuristic::LinearConflict => linear_conflict,
            Heuristic::PatternDatabase => pattern_database,
        }
    }

    pub fn estimate(&self, state: &Board, goal: &Board) -> u32 {
        (self.function())(state, goal)
    }

    /// Whether the estimate never exceeds the true remaining move count.
    pub fn is_admissible(&self) -> bool {
        !matches!(self, Heuristic::Nilsson)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::Manhattan => "manhattan",
            Heuristic::Nilsson => "nilsson",
            Heuristic::LinearConflict => "linear-conflict",
            Heuristic::PatternDatabase => "pattern-database",
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "manhattan" => Ok(Heuristic::Manhattan),
            "nilsson" => Ok(Heuristic::Nilsson),
            "linear-conflict" => Ok(Heuristic::LinearConflict),
            "pattern-database" | "pdb" => Ok(Heuristic::PatternDatabase),
            _ => Err(PuzzleError::UnknownHeuristic {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [[u8; 3]; 3]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_every_heuristic_is_zero_at_goal() {
        let goal = Board::goal();
        for h in Heuristic::ALL {
            assert_eq!(h.estimate(&goal, &goal), 0, "{} should be 0 at the goal", h);
        }

        let other_goal = board([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        for h in Heuristic::ALL {
            assert_eq!(h.estimate(&other_goal, &other_goal), 0, "{}", h);
        }
    }

    #[test]
    fn test_manhattan_values() {
        let goal = Board::goal();
        // 8 sits one column left of home.
        assert_eq!(manhattan(&board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]), &goal), 1);
        // 1 and 2 swapped: one step each.
        assert_eq!(manhattan(&board([[2, 1, 3], [4, 5, 6], [7, 8, 0]]), &goal), 2);
        let reversed = board([[0, 8, 7], [6, 5, 4], [3, 2, 1]]);
        assert_eq!(manhattan(&reversed, &goal), 20);
    }

    #[test]
    fn test_manhattan_respects_custom_goal() {
        let goal = board([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        let state = board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        assert_eq!(manhattan(&state, &goal), 1);
    }

    #[test]
    fn test_linear_conflict_values() {
        let goal = Board::goal();
        let swapped = board([[2, 1, 3], [4, 5, 6], [7, 8, 0]]);
        assert_eq!(linear_conflict(&swapped, &goal), 2 + 2);

        // No conflicts: plain Manhattan.
        let one_off = board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert_eq!(linear_conflict(&one_off, &goal), manhattan(&one_off, &goal));

        // Column conflict: 1 and 4 swapped vertically.
        let col = board([[4, 2, 3], [1, 5, 6], [7, 8, 0]]);
        assert_eq!(linear_conflict(&col, &goal), 2 + 2);
    }

    #[test]
    fn test_linear_conflict_dominates_manhattan() {
        let goal = Board::goal();
        for seed in 0..50 {
            let state = Board::scrambled(&goal, 30, seed);
            assert!(linear_conflict(&state, &goal) >= manhattan(&state, &goal));
        }
    }

    #[test]
    fn test_nilsson_sequence_values() {
        let goal = Board::goal();
        // Border reads 1 2 3 6 8 0 7 4: every pair after 3 breaks, and 5 holds the centre.
        let state = board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        let expected_sequence = 2 * 5 + 1;
        assert_eq!(
            nilsson_sequence(&state, &goal),
            manhattan(&state, &goal) + expected_sequence
        );
    }

    #[test]
    fn test_nilsson_counts_breaks_around_displaced_blank() {
        // Goal holds 1..8 clockwise around the border with the blank in the centre.
        let spiral_goal = board([[1, 2, 3], [8, 0, 4], [7, 6, 5]]);
        let state = board([[1, 2, 3], [8, 4, 0], [7, 6, 5]]);
        assert_eq!(
            nilsson_sequence(&state, &spiral_goal),
            manhattan(&state, &spiral_goal) + SEQUENCE_PENALTY * 2 + CENTRE_PENALTY
        );
    }

    #[test]
    fn test_pattern_database_is_always_zero() {
        let goal = Board::goal();
        for seed in 0..10 {
            assert_eq!(pattern_database(&Board::scrambled(&goal, 20, seed), &goal), 0);
        }
    }

    #[test]
    fn test_heuristic_from_str() {
        assert_eq!("Manhattan".parse::<Heuristic>().unwrap(), Heuristic::Manhattan);
        assert_eq!(
            "linear_conflict".parse::<Heuristic>().unwrap(),
            Heuristic::LinearConflict
        );
        assert_eq!("pdb".parse::<Heuristic>().unwrap(), Heuristic::PatternDatabase);
        assert!(matches!(
            "euclid".parse::<Heuristic>(),
            Err(PuzzleError::UnknownHeuristic { .. })
        ));
        for h in Heuristic::ALL {
            assert_eq!(h.name().parse::<Heuristic>().unwrap(), h);
        }
    }
}
