//! Board model for the 8-puzzle.
//!
//! This module defines the two value types every search works with:
//! - `Action`: one of the four directions the blank can travel.
//! - `Board`: an immutable 3x3 arrangement of the tiles `1..=8` and the blank `0`,
//!   with blank lookup, move application and ordered successor generation.
//!
//! A board never changes in place. `apply` and `successors` hand back new boards,
//! which is what lets the searches share states freely between nodes and the
//! visited set.
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;

use crate::error::{PuzzleError, Result};

/// Width and height of the board.
pub const BOARD_SIZE: usize = 3;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The value used for the empty cell.
pub const BLANK: u8 = 0;

/// The goal arrangement used when none is supplied.
pub const GOAL_ROWS: [[u8; BOARD_SIZE]; BOARD_SIZE] = [[1, 2, 3], [4, 5, 6], [7, 8, 0]];

/// A move of the blank cell.
///
/// Directions describe where the *blank* travels, not the tile that slides into it.
/// `Action::Up` swaps the blank with the tile above it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// All actions in generation order. Successors are always produced in this order,
    /// which fixes exploration and tie-breaking for every strategy.
    pub const ALL: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    /// Row and column delta applied to the blank.
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
            Action::Left => (0, -1),
            Action::Right => (0, 1),
        }
    }

    /// The action that undoes this one.
    pub fn opposite(&self) -> Self {
        match self {
            Action::Up => Action::Down,
            Action::Down => Action::Up,
            Action::Left => Action::Right,
            Action::Right => Action::Left,
        }
    }

    /// Lowercase name, as printed in full solution paths.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
        }
    }

    /// Single-letter code used in compact summaries such as `"U R D"`.
    ///
    /// ```
    /// use eight_puzzle_solver::engine::Action;
    /// assert_eq!(Action::Left.letter(), 'L');
    /// ```
    pub fn letter(&self) -> char {
        match self {
            Action::Up => 'U',
            Action::Down => 'D',
            Action::Left => 'L',
            Action::Right => 'R',
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A 3x3 sliding-tile arrangement.
///
/// Equality and hashing are structural: two boards are equal iff every cell matches
/// position for position. The searches key their visited sets directly on `Board`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[u8; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// The canonical goal `[[1, 2, 3], [4, 5, 6], [7, 8, 0]]`.
    pub fn goal() -> Self {
        Board { cells: GOAL_ROWS }
    }

    /// Builds a board from rows, checking that the cells are a permutation of `0..=8`.
    ///
    /// # Errors
    /// Returns `PuzzleError::InvalidBoard` if a value is above 8 or appears twice.
    /// A permutation of nine distinct values in `0..=8` always has exactly one blank.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    ///
    /// let board = Board::from_rows([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
    /// assert_eq!(board.locate_blank(), (2, 1));
    ///
    /// assert!(Board::from_rows([[1, 1, 3], [4, 5, 6], [7, 0, 8]]).is_err());
    /// assert!(Board::from_rows([[1, 9, 3], [4, 5, 6], [7, 0, 8]]).is_err());
    /// ```
    pub fn from_rows(rows: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Result<Self> {
        let mut seen = [false; CELL_COUNT];
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let idx = value as usize;
                if idx >= CELL_COUNT {
                    return Err(PuzzleError::invalid_board(format!(
                        "value {} at ({}, {}) is outside 0..={}",
                        value,
                        r,
                        c,
                        CELL_COUNT - 1
                    )));
                }
                if seen[idx] {
                    return Err(PuzzleError::invalid_board(format!(
                        "value {} appears more than once",
                        value
                    )));
                }
                seen[idx] = true;
            }
        }
        Ok(Board { cells: rows })
    }

    /// Builds a board from nine cells in row-major order.
    ///
    /// # Errors
    /// Returns `PuzzleError::InvalidBoard` for a slice that is not nine cells long,
    /// plus everything `from_rows` rejects.
    pub fn from_cells(cells: &[u8]) -> Result<Self> {
        if cells.len() != CELL_COUNT {
            return Err(PuzzleError::invalid_board(format!(
                "expected {} cells, found {}",
                CELL_COUNT,
                cells.len()
            )));
        }
        let mut rows = [[BLANK; BOARD_SIZE]; BOARD_SIZE];
        for (i, &value) in cells.iter().enumerate() {
            rows[i / BOARD_SIZE][i % BOARD_SIZE] = value;
        }
        Board::from_rows(rows)
    }

    /// Builds a board without validation.
    ///
    /// The caller guarantees the rows hold a permutation of `0..=8`. Blank lookup
    /// panics on a board without a blank.
    pub fn from_rows_unchecked(rows: [[u8; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        Board { cells: rows }
    }

    /// Returns the value at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if `r` or `c` is not below `BOARD_SIZE`.
    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.cells[r][c]
    }

    /// Returns the underlying rows.
    pub fn rows(&self) -> &[[u8; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Returns the cells in row-major order.
    pub fn to_cells(&self) -> [u8; CELL_COUNT] {
        let mut out = [BLANK; CELL_COUNT];
        for (i, value) in self.cells.iter().flatten().enumerate() {
            out[i] = *value;
        }
        out
    }

    /// Finds the position of `value`, if present.
    pub fn position_of(&self, value: u8) -> Option<(usize, usize)> {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if self.cells[r][c] == value {
                    return Some((r, c));
                }
            }
        }
        None
    }

    /// Returns `(row, col)` of the blank.
    ///
    /// # Panics
    /// Panics if the board has no blank, which only an unchecked board can have.
    pub fn locate_blank(&self) -> (usize, usize) {
        self.position_of(BLANK)
            .expect("board invariant violated: no blank cell")
    }

    /// Moves the blank one cell in `action`'s direction.
    ///
    /// Returns `None` when the blank would leave the grid. The receiver is never modified.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::{Action, Board};
    ///
    /// let goal = Board::goal();
    /// assert!(goal.apply(Action::Right).is_none());
    /// let moved = goal.apply(Action::Up).unwrap();
    /// assert_eq!(moved.locate_blank(), (1, 2));
    /// assert_eq!(goal.locate_blank(), (2, 2));
    /// ```
    pub fn apply(&self, action: Action) -> Option<Board> {
        let (r, c) = self.locate_blank();
        let (dr, dc) = action.offset();
        let new_r = r as isize + dr;
        let new_c = c as isize + dc;

        if new_r < 0 || new_r >= BOARD_SIZE as isize || new_c < 0 || new_c >= BOARD_SIZE as isize {
            return None;
        }
        let (new_r, new_c) = (new_r as usize, new_c as usize);

        let mut cells = self.cells;
        cells[r][c] = cells[new_r][new_c];
        cells[new_r][new_c] = BLANK;
        Some(Board { cells })
    }

    /// Every legal `(action, board)` pair, in `Action::ALL` order.
    ///
    /// Yields two results in a corner, three on an edge and four from the centre.
    pub fn successors(&self) -> Vec<(Action, Board)> {
        Action::ALL
            .iter()
            .filter_map(|&action| self.apply(action).map(|next| (action, next)))
            .collect()
    }

    /// Number of tile pairs that appear in reversed order in the row-major reading,
    /// ignoring the blank.
    pub fn inversions(&self) -> usize {
        let flat = self.to_cells();
        flat.iter()
            .enumerate()
            .filter(|&(_, &val)| val != BLANK)
            .map(|(i, &val)| {
                flat[i + 1..]
                    .iter()
                    .filter(|&&next| next != BLANK && next < val)
                    .count()
            })
            .sum()
    }

    /// Whether `goal` is reachable from this board.
    ///
    /// On an odd-width board a move never changes inversion parity, so the two boards
    /// are mutually reachable iff their parities match.
    pub fn is_solvable_from(&self, goal: &Board) -> bool {
        self.inversions() % 2 == goal.inversions() % 2
    }

    /// Produces a reproducible scramble by walking `moves` random legal actions away
    /// from `start`. The walk never immediately undoes its previous step, so the
    /// result is always solvable back to `start`.
    ///
    /// ```
    /// use eight_puzzle_solver::engine::Board;
    ///
    /// let goal = Board::goal();
    /// let a = Board::scrambled(&goal, 20, 7);
    /// assert_eq!(a, Board::scrambled(&goal, 20, 7));
    /// assert!(a.is_solvable_from(&goal));
    /// ```
    pub fn scrambled(start: &Board, moves: usize, seed: u64) -> Board {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = *start;
        let mut last: Option<Action> = None;

        for _ in 0..moves {
            let options: Vec<(Action, Board)> = board
                .successors()
                .into_iter()
                .filter(|(action, _)| last.map_or(true, |prev| *action != prev.opposite()))
                .collect();
            // Every cell has at least two neighbours, so one option always survives the filter.
            if let Some(&(action, next)) = options.choose(&mut rng) {
                board = next;
                last = Some(action);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::goal()
    }
}

impl fmt::Display for Board {
    /// Three lines of space-separated cells, with the blank shown as `_`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.cells.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .map(|&v| if v == BLANK { "_".to_string() } else { v.to_string() })
                .collect();
            write!(f, "{}", line.join(" "))?;
            if r < BOARD_SIZE - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: [[u8; 3]; 3]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    #[test]
    fn test_goal_board() {
        let goal = Board::goal();
        assert_eq!(goal.locate_blank(), (2, 2));
        assert_eq!(goal.get(0, 0), 1);
        assert_eq!(goal.to_cells(), [1, 2, 3, 4, 5, 6, 7, 8, 0]);
    }

    #[test]
    fn test_from_rows_rejects_duplicates_and_range() {
        let dup = Board::from_rows([[1, 2, 3], [4, 5, 6], [7, 8, 8]]);
        assert!(matches!(dup, Err(PuzzleError::InvalidBoard { .. })));

        let out_of_range = Board::from_rows([[1, 2, 3], [4, 5, 6], [7, 9, 0]]);
        assert!(matches!(out_of_range, Err(PuzzleError::InvalidBoard { .. })));

        // Two blanks means one value is missing, which shows up as a duplicate zero.
        let two_blanks = Board::from_rows([[1, 2, 3], [4, 5, 6], [0, 8, 0]]);
        assert!(two_blanks.is_err());
    }

    #[test]
    fn test_from_cells_wrong_length() {
        let err = Board::from_cells(&[1, 2, 3]).unwrap_err();
        assert!(err.to_string().contains("expected 9 cells, found 3"));
        assert_eq!(
            Board::from_cells(&[1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap(),
            Board::goal()
        );
    }

    #[test]
    fn test_locate_blank() {
        let b = board([[0, 6, 3], [2, 1, 8], [7, 5, 4]]);
        assert_eq!(b.locate_blank(), (0, 0));
        let b = board([[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        assert_eq!(b.locate_blank(), (1, 1));
    }

    #[test]
    fn test_apply_moves_blank_not_tile() {
        let b = board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        let right = b.apply(Action::Right).unwrap();
        assert_eq!(right, Board::goal());
        let up = b.apply(Action::Up).unwrap();
        assert_eq!(up.rows(), &[[1, 2, 3], [4, 0, 6], [7, 5, 8]]);
        assert!(b.apply(Action::Down).is_none());
    }

    #[test]
    fn test_apply_does_not_mutate_receiver() {
        let b = Board::goal();
        let copy = b;
        let _ = b.apply(Action::Up);
        let _ = b.apply(Action::Left);
        assert_eq!(b, copy);
    }

    #[test]
    fn test_apply_then_opposite_restores_board() {
        for seed in 0..30 {
            let b = Board::scrambled(&Board::goal(), 15, seed);
            for action in Action::ALL {
                if let Some(next) = b.apply(action) {
                    let (r, c) = next.locate_blank();
                    assert!(r < BOARD_SIZE && c < BOARD_SIZE);
                    assert_eq!(next.apply(action.opposite()), Some(b));
                }
            }
        }
    }

    #[test]
    fn test_successor_counts_and_order() {
        let corner = board([[0, 1, 2], [3, 4, 5], [6, 7, 8]]);
        let succ = corner.successors();
        assert_eq!(succ.len(), 2);
        assert_eq!(succ[0].0, Action::Down);
        assert_eq!(succ[1].0, Action::Right);

        let edge = board([[1, 0, 2], [3, 4, 5], [6, 7, 8]]);
        let actions: Vec<Action> = edge.successors().iter().map(|(a, _)| *a).collect();
        assert_eq!(actions, vec![Action::Down, Action::Left, Action::Right]);

        let centre = board([[1, 2, 3], [4, 0, 5], [6, 7, 8]]);
        let actions: Vec<Action> = centre.successors().iter().map(|(a, _)| *a).collect();
        assert_eq!(actions, Action::ALL.to_vec());
        assert_eq!(centre.successors(), centre.successors());
    }

    #[test]
    fn test_inversions_and_parity() {
        assert_eq!(Board::goal().inversions(), 0);
        let swapped = board([[2, 1, 3], [4, 5, 6], [7, 8, 0]]);
        assert_eq!(swapped.inversions(), 1);
        assert!(!swapped.is_solvable_from(&Board::goal()));
        let near = board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert!(near.is_solvable_from(&Board::goal()));
    }

    #[test]
    fn test_scrambled_determinism() {
        let goal = Board::goal();
        let a = Board::scrambled(&goal, 30, 123);
        let b = Board::scrambled(&goal, 30, 123);
        assert_eq!(a, b, "same seed must give the same scramble");
        assert_eq!(Board::scrambled(&goal, 0, 99), goal);
        for seed in 0..20 {
            assert!(Board::scrambled(&goal, 25, seed).is_solvable_from(&goal));
        }
    }

    #[test]
    fn test_display_board_formatting() {
        let b = board([[1, 2, 3], [4, 5, 6], [7, 0, 8]]);
        assert_eq!(format!("{}", b), "1 2 3\n4 5 6\n7 _ 8");
    }

    #[test]
    fn test_action_helpers() {
        assert_eq!(Action::Up.opposite(), Action::Down);
        assert_eq!(Action::Right.to_string(), "right");
        let letters: String = Action::ALL.iter().map(|a| a.letter()).collect();
        assert_eq!(letters, "UDLR");
    }
}
