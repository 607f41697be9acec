//! Board construction helpers: a text fixture parser and a seeded random
//! puzzle generator.
//!
//! The parser is the loader side of the engine's contract: it turns rows of
//! symbol characters into a fully validated [`Board`], so everything past it
//! can assume the construction invariants hold.

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

use crate::engine::{Board, BoardError, Exit, ExitSide, Orientation, Piece};

/// Symbol reserved for the primary piece in text fixtures.
pub const PRIMARY_SYMBOL: char = 'P';
/// Symbol for an empty cell in text fixtures.
pub const EMPTY_SYMBOL: char = '.';

/// Errors from the text parser. Structural board violations surface as the
/// wrapped [`BoardError`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("board text is empty")]
    Empty,

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("symbol '{id}' does not form a straight contiguous run")]
    CrookedPiece { id: char },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Parses an array of string slices into a validated `Board`.
///
/// Each string is one row, top to bottom. `.` marks an empty cell, `P` the
/// primary piece, and any other character one vehicle: all cells bearing the
/// same symbol must form a straight contiguous run of length at least 2.
/// Pieces are numbered in order of first appearance (row-major), which is the
/// order moves index them by.
///
/// The exit is given in the edge encoding: `exit_row == -1` for the top edge
/// and `rows` for the bottom, `exit_col == -1` for the left edge and `cols`
/// for the right.
///
/// # Examples
/// ```
/// use rush_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(
///     &[
///         "AA..", //
///         "PP.B",
///         "...B",
///         "....",
///     ],
///     1,
///     4,
/// )
/// .unwrap();
/// assert_eq!(board.pieces().len(), 3);
/// assert_eq!(board.primary().unwrap().id(), 'P');
/// ```
pub fn board_from_str_array(
    rows_str: &[&str],
    exit_row: isize,
    exit_col: isize,
) -> Result<Board, ParseError> {
    if rows_str.is_empty() {
        return Err(ParseError::Empty);
    }
    let height = rows_str.len();
    let width = rows_str[0].chars().count();
    let mut cells: Vec<Vec<char>> = Vec::with_capacity(height);
    for (row, line) in rows_str.iter().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        if chars.len() != width {
            return Err(ParseError::RaggedRow {
                row,
                len: chars.len(),
                expected: width,
            });
        }
        cells.push(chars);
    }

    // Group cells by symbol; `order` preserves first appearance so piece
    // indices are stable identity.
    let mut order: Vec<char> = Vec::new();
    let mut groups: HashMap<char, Vec<(usize, usize)>> = HashMap::new();
    for (r, row) in cells.iter().enumerate() {
        for (c, &ch) in row.iter().enumerate() {
            if ch == EMPTY_SYMBOL {
                continue;
            }
            if !groups.contains_key(&ch) {
                order.push(ch);
            }
            groups.entry(ch).or_default().push((r, c));
        }
    }

    let mut board = Board::new(height, width).map_err(ParseError::Board)?;
    board.set_exit(Exit::from_coords(exit_row, exit_col, height, width)?)?;
    for id in order {
        board.place(piece_from_cells(id, &groups[&id])?)?;
    }
    board.validate()?;
    Ok(board)
}

/// Interprets one symbol's cells (in row-major order) as a piece.
fn piece_from_cells(id: char, cells: &[(usize, usize)]) -> Result<Piece, ParseError> {
    let (row, col) = cells[0];
    let primary = id == PRIMARY_SYMBOL;
    if cells.len() == 1 {
        // Orientation is moot; place() rejects it as too short either way.
        return Ok(Piece::new(id, row, col, 1, Orientation::Horizontal, primary));
    }
    if cells.iter().all(|&(r, _)| r == row) {
        for (i, &(_, c)) in cells.iter().enumerate() {
            if c != col + i {
                return Err(ParseError::CrookedPiece { id });
            }
        }
        Ok(Piece::new(
            id,
            row,
            col,
            cells.len(),
            Orientation::Horizontal,
            primary,
        ))
    } else if cells.iter().all(|&(_, c)| c == col) {
        for (i, &(r, _)) in cells.iter().enumerate() {
            if r != row + i {
                return Err(ParseError::CrookedPiece { id });
            }
        }
        Ok(Piece::new(
            id,
            row,
            col,
            cells.len(),
            Orientation::Vertical,
            primary,
        ))
    } else {
        Err(ParseError::CrookedPiece { id })
    }
}

/// Generates a random puzzle, deterministically per seed.
///
/// The exit sits on the right edge at a random row; the primary piece is a
/// horizontal 2-length vehicle placed somewhere on that lane. Up to
/// `blockers` vehicles of length 2 or 3 are then scattered at random
/// non-overlapping positions (best effort: placement gives up after a
/// bounded number of rejected attempts, so a crowded board may hold fewer).
/// The result always passes [`Board::validate`], but it is not guaranteed to
/// be solvable.
pub fn random_board(
    rows: usize,
    cols: usize,
    blockers: usize,
    seed: u64,
) -> Result<Board, BoardError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new(rows, cols)?;

    let exit_lane = rng.gen_range(0..rows);
    board.set_exit(Exit::new(ExitSide::Right, exit_lane))?;
    board.place(Piece::new(
        PRIMARY_SYMBOL,
        exit_lane,
        rng.gen_range(0..=cols - 2),
        2,
        Orientation::Horizontal,
        true,
    ))?;

    let symbols: Vec<char> = ('A'..='Z')
        .filter(|&c| c != PRIMARY_SYMBOL && c != 'K')
        .collect();
    let mut placed = 0;
    let mut attempts = 0;
    while placed < blockers.min(symbols.len()) && attempts < blockers * 50 {
        attempts += 1;
        let orientation = if rng.gen_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let max_length = match orientation {
            Orientation::Horizontal => 3.min(cols),
            Orientation::Vertical => 3.min(rows),
        };
        let length = rng.gen_range(2..=max_length);
        let (row, col) = match orientation {
            Orientation::Horizontal => (
                rng.gen_range(0..rows),
                rng.gen_range(0..=cols - length),
            ),
            Orientation::Vertical => (
                rng.gen_range(0..=rows - length),
                rng.gen_range(0..cols),
            ),
        };
        let candidate = Piece::new(symbols[placed], row, col, length, orientation, false);
        if board.place(candidate).is_ok() {
            placed += 1;
        }
    }
    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_board() {
        let board = board_from_str_array(
            &[
                "AA..BB", //
                "....C.",
                "PP..C.",
                "DDD.C.",
                "......",
                "......",
            ],
            2,
            6,
        )
        .unwrap();
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 6);
        assert_eq!(board.pieces().len(), 5);

        // First-appearance order: A, B, C, P, D.
        let ids: Vec<char> = board.pieces().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec!['A', 'B', 'C', 'P', 'D']);

        let primary = board.primary().unwrap();
        assert_eq!(primary.id(), 'P');
        assert_eq!((primary.row(), primary.col()), (2, 0));
        assert_eq!(primary.orientation(), Orientation::Horizontal);

        let c = &board.pieces()[2];
        assert_eq!(c.orientation(), Orientation::Vertical);
        assert_eq!(c.length(), 3);

        assert!(board.validate().is_ok());
    }

    #[test]
    fn test_parse_round_trips_through_display() {
        let rows = [
            "AA..BB", //
            "....C.",
            "PP..C.",
            "DDD.C.",
            "......",
            "......",
        ];
        let board = board_from_str_array(&rows, 2, 6).unwrap();
        assert_eq!(board.to_string(), rows.join("\n"));
    }

    #[test]
    fn test_parse_rejects_empty_and_ragged_input() {
        assert_eq!(
            board_from_str_array(&[], 0, 2).unwrap_err(),
            ParseError::Empty
        );
        let err = board_from_str_array(&["PP..", "..."], 0, 4).unwrap_err();
        assert_eq!(
            err,
            ParseError::RaggedRow {
                row: 1,
                len: 3,
                expected: 4
            }
        );
    }

    #[test]
    fn test_parse_rejects_crooked_and_split_pieces() {
        // Bent run.
        let err = board_from_str_array(
            &[
                "AA....", //
                ".A....",
                "PP....",
                "......",
                "......",
                "......",
            ],
            2,
            6,
        )
        .unwrap_err();
        assert_eq!(err, ParseError::CrookedPiece { id: 'A' });

        // Same symbol in two disjoint regions of one row.
        let err = board_from_str_array(
            &[
                "AA.AA.", //
                "......",
                "PP....",
                "......",
                "......",
                "......",
            ],
            2,
            6,
        )
        .unwrap_err();
        assert_eq!(err, ParseError::CrookedPiece { id: 'A' });
    }

    #[test]
    fn test_parse_rejects_single_cell_piece() {
        let err = board_from_str_array(
            &[
                "A.....", //
                "......",
                "PP....",
                "......",
                "......",
                "......",
            ],
            2,
            6,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::Board(BoardError::PieceTooShort { id: 'A', length: 1 })
        );
    }

    #[test]
    fn test_parse_rejects_missing_primary_and_bad_exit() {
        let err = board_from_str_array(
            &[
                "AA....", //
                "......",
                "......",
                "......",
                "......",
                "......",
            ],
            2,
            6,
        )
        .unwrap_err();
        assert_eq!(err, ParseError::Board(BoardError::MissingPrimary));

        // Interior coordinate is not an edge exit.
        let err = board_from_str_array(
            &[
                "......", //
                "......",
                "PP....",
                "......",
                "......",
                "......",
            ],
            2,
            3,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::Board(BoardError::InvalidExit { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_misaligned_primary() {
        // Exit lane is row 0, primary sits on row 2.
        let err = board_from_str_array(
            &[
                "......", //
                "......",
                "PP....",
                "......",
                "......",
                "......",
            ],
            0,
            6,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ParseError::Board(BoardError::MisalignedPrimary { id: 'P' })
        );
    }

    #[test]
    fn test_random_board_is_deterministic_per_seed() {
        let a = random_board(6, 6, 6, 42).unwrap();
        let b = random_board(6, 6, 6, 42).unwrap();
        assert_eq!(a.canonical_key(), b.canonical_key());

        let c = random_board(6, 6, 6, 43).unwrap();
        assert_ne!(a.canonical_key(), c.canonical_key());
    }

    #[test]
    fn test_random_board_always_validates() {
        for seed in 0..20 {
            let board = random_board(6, 6, 8, seed).unwrap();
            assert!(board.validate().is_ok());
            let primary = board.primary().unwrap();
            assert_eq!(primary.row(), board.exit().unwrap().lane());
            assert_eq!(primary.orientation(), Orientation::Horizontal);
        }
    }
}
