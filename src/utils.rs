use crate::engine::{Board, BOARD_SIZE, CELL_COUNT};
use crate::error::{PuzzleError, Result};

/// Parses a board written as nine digits in row-major order.
///
/// Cells may be separated by whitespace, commas, slashes or semicolons, or written
/// back to back as a nine-character string. `_` is accepted as the blank.
///
/// # Returns
/// * `Ok(Board)` when the text holds exactly nine values forming a permutation of `0..=8`.
/// * `Err(PuzzleError::Parse)` when a token is not a number.
/// * `Err(PuzzleError::InvalidBoard)` when the numbers are not a valid permutation.
///
/// # Examples
/// ```
/// use eight_puzzle_solver::engine::Board;
/// use eight_puzzle_solver::utils::parse_board;
///
/// let spaced = parse_board("1 2 3 4 5 6 7 8 0").unwrap();
/// let packed = parse_board("12345678_").unwrap();
/// let rows = parse_board("1,2,3 / 4,5,6 / 7,8,0").unwrap();
/// assert_eq!(spaced, Board::goal());
/// assert_eq!(packed, Board::goal());
/// assert_eq!(rows, Board::goal());
///
/// assert!(parse_board("1 2 3").is_err());
/// assert!(parse_board("1 2 3 4 5 6 7 8 x").is_err());
/// ```
pub fn parse_board(input: &str) -> Result<Board> {
    let tokens: Vec<&str> = input
        .split(|ch: char| ch.is_whitespace() || matches!(ch, ',' | '/' | ';'))
        .filter(|t| !t.is_empty())
        .collect();

    // A single packed token such as "123456780" is split into characters.
    let owned: Vec<String>;
    let tokens: Vec<&str> = if tokens.len() == 1 && tokens[0].chars().count() == CELL_COUNT {
        owned = tokens[0].chars().map(|c| c.to_string()).collect();
        owned.iter().map(String::as_str).collect()
    } else {
        tokens
    };

    let cells = tokens
        .iter()
        .map(|token| parse_cell(token, input))
        .collect::<Result<Vec<u8>>>()?;
    Board::from_cells(&cells)
}

fn parse_cell(token: &str, input: &str) -> Result<u8> {
    if token == "_" {
        return Ok(0);
    }
    token.parse::<u8>().map_err(|_| PuzzleError::Parse {
        input: input.to_string(),
        reason: format!("'{}' is not a tile number", token),
    })
}

/// Parses a board given one row per string slice, e.g. `["1 2 3", "4 5 6", "7 8 0"]`.
///
/// # Errors
/// Returns `PuzzleError::Parse` if there are not exactly three rows or a row does not
/// hold exactly three cells, and everything `parse_board` rejects.
pub fn board_from_str_array(rows: &[&str]) -> Result<Board> {
    if rows.len() != BOARD_SIZE {
        return Err(PuzzleError::Parse {
            input: rows.join(" / "),
            reason: format!("expected {} rows, found {}", BOARD_SIZE, rows.len()),
        });
    }

    let mut cells = Vec::with_capacity(CELL_COUNT);
    for (r, row) in rows.iter().enumerate() {
        let row_cells: Vec<&str> = row.split_whitespace().collect();
        if row_cells.len() != BOARD_SIZE {
            return Err(PuzzleError::Parse {
                input: rows.join(" / "),
                reason: format!(
                    "row {} has {} cells (expected {})",
                    r,
                    row_cells.len(),
                    BOARD_SIZE
                ),
            });
        }
        for token in row_cells {
            cells.push(parse_cell(token, row)?);
        }
    }
    Board::from_cells(&cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board_formats() {
        let expected = Board::from_rows([[1, 2, 3], [4, 5, 6], [7, 0, 8]]).unwrap();
        assert_eq!(parse_board("1 2 3 4 5 6 7 0 8").unwrap(), expected);
        assert_eq!(parse_board("123456708").unwrap(), expected);
        assert_eq!(parse_board("1 2 3\n4 5 6\n7 _ 8\n").unwrap(), expected);
        assert_eq!(parse_board("1;2;3;4;5;6;7;0;8").unwrap(), expected);
    }

    #[test]
    fn test_parse_board_invalid_token() {
        let err = parse_board("1 2 3 4 5 6 7 8 z").unwrap_err();
        assert!(matches!(err, PuzzleError::Parse { .. }));
        assert!(err.to_string().contains("'z' is not a tile number"));
    }

    #[test]
    fn test_parse_board_invalid_permutation() {
        let err = parse_board("1 1 3 4 5 6 7 8 0").unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidBoard { .. }));
        let err = parse_board("1 2 3 4 5 6 7 8").unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidBoard { .. }));
        let err = parse_board("1 2 3 4 5 6 7 8 9").unwrap_err();
        assert!(matches!(err, PuzzleError::InvalidBoard { .. }));
    }

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["0 6 3", "2 1 8", "7 5 4"]).unwrap();
        assert_eq!(board.locate_blank(), (0, 0));
        assert_eq!(board.get(2, 2), 4);
    }

    #[test]
    fn test_board_from_str_array_wrong_shape() {
        let err = board_from_str_array(&["1 2 3", "4 5 6"]).unwrap_err();
        assert!(err.to_string().contains("expected 3 rows, found 2"));

        let err = board_from_str_array(&["1 2 3", "4 5 6 7", "8 0"]).unwrap_err();
        assert!(err.to_string().contains("row 1 has 4 cells"));
    }
}
