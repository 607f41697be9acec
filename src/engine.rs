//! Core data model for the Rush Hour puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Piece`: a vehicle occupying a contiguous run of cells.
//! - `Exit`: the single edge position the primary vehicle must reach.
//! - `Move`: one slide of one piece, recorded as start and end coordinates.
//! - `Board`: owns the pieces and the exit, validates construction, tests the
//!   goal condition, and generates successor states.
//!
//! The occupancy grid is a derived view: it is always recomputed from the
//! pieces, never stored and patched, so a cloned board cannot drift from its
//! piece positions.

use std::fmt;
use thiserror::Error;

/// Axis along which a piece is laid out and may slide.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// The piece spans consecutive columns and slides left/right.
    Horizontal,
    /// The piece spans consecutive rows and slides up/down.
    Vertical,
}

/// Errors raised while building a board. All of these are construction-time
/// failures; a fully built, validated board never produces them during
/// search.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board dimensions must be at least 2x2, got {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("piece '{id}' has length {length}, minimum is 2")]
    PieceTooShort { id: char, length: usize },

    #[error("piece '{id}' does not fit within the board bounds")]
    OutOfBounds { id: char },

    #[error("piece '{id}' overlaps piece '{other}' at ({row}, {col})")]
    Overlap {
        id: char,
        other: char,
        row: usize,
        col: usize,
    },

    #[error("piece '{id}' cannot be primary: '{existing}' already is")]
    DuplicatePrimary { existing: char, id: char },

    #[error("exit is already set")]
    ExitAlreadySet,

    #[error("({row}, {col}) is not a valid exit position for a {rows}x{cols} board")]
    InvalidExit {
        row: isize,
        col: isize,
        rows: usize,
        cols: usize,
    },

    #[error("board has no exit")]
    MissingExit,

    #[error("board has no primary piece")]
    MissingPrimary,

    #[error("primary piece '{id}' is not on the exit lane or faces the wrong way")]
    MisalignedPrimary { id: char },
}

/// A vehicle on the board.
///
/// A piece's shape (id, length, orientation, primary flag) is fixed at
/// construction; only its origin changes, and only on a cloned board while
/// generating successors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    id: char,
    row: usize,
    col: usize,
    length: usize,
    orientation: Orientation,
    primary: bool,
}

impl Piece {
    pub fn new(
        id: char,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
        primary: bool,
    ) -> Self {
        Piece {
            id,
            row,
            col,
            length,
            orientation,
            primary,
        }
    }

    pub fn id(&self) -> char {
        self.id
    }

    /// Row of the piece's origin (top-most or left-most cell).
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column of the piece's origin.
    pub fn col(&self) -> usize {
        self.col
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_primary(&self) -> bool {
        self.primary
    }

    /// Coordinate of the origin along the piece's own sliding axis.
    pub fn axis_position(&self) -> usize {
        match self.orientation {
            Orientation::Horizontal => self.col,
            Orientation::Vertical => self.row,
        }
    }

    /// The fixed perpendicular coordinate: the row of a horizontal piece, the
    /// column of a vertical one.
    pub fn lane(&self) -> usize {
        match self.orientation {
            Orientation::Horizontal => self.row,
            Orientation::Vertical => self.col,
        }
    }

    /// Coordinate of the last occupied cell along the sliding axis.
    pub fn end(&self) -> usize {
        self.axis_position() + self.length - 1
    }

    /// Whether this piece occupies the cell at `(row, col)`.
    pub fn occupies(&self, row: usize, col: usize) -> bool {
        match self.orientation {
            Orientation::Horizontal => {
                row == self.row && col >= self.col && col < self.col + self.length
            }
            Orientation::Vertical => {
                col == self.col && row >= self.row && row < self.row + self.length
            }
        }
    }

    /// Iterates over the cells this piece occupies, origin first.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let piece = *self;
        (0..piece.length).map(move |i| match piece.orientation {
            Orientation::Horizontal => (piece.row, piece.col + i),
            Orientation::Vertical => (piece.row + i, piece.col),
        })
    }

    /// Copy of this piece relocated to `pos` along its sliding axis.
    fn with_axis_position(&self, pos: usize) -> Piece {
        let mut moved = *self;
        match moved.orientation {
            Orientation::Horizontal => moved.col = pos,
            Orientation::Vertical => moved.row = pos,
        }
        moved
    }
}

/// The board edge holding the exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitSide {
    Top,
    Bottom,
    Left,
    Right,
}

/// The single exit: an edge plus the lane (row or column) it opens onto.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Exit {
    side: ExitSide,
    lane: usize,
}

impl Exit {
    pub fn new(side: ExitSide, lane: usize) -> Self {
        Exit { side, lane }
    }

    /// Decodes the conventional edge encoding: row -1 is the top edge, row
    /// `rows` the bottom, column -1 the left edge, column `cols` the right.
    pub fn from_coords(
        row: isize,
        col: isize,
        rows: usize,
        cols: usize,
    ) -> Result<Self, BoardError> {
        let invalid = BoardError::InvalidExit {
            row,
            col,
            rows,
            cols,
        };
        if row == -1 && col >= 0 && (col as usize) < cols {
            Ok(Exit::new(ExitSide::Top, col as usize))
        } else if row == rows as isize && col >= 0 && (col as usize) < cols {
            Ok(Exit::new(ExitSide::Bottom, col as usize))
        } else if col == -1 && row >= 0 && (row as usize) < rows {
            Ok(Exit::new(ExitSide::Left, row as usize))
        } else if col == cols as isize && row >= 0 && (row as usize) < rows {
            Ok(Exit::new(ExitSide::Right, row as usize))
        } else {
            Err(invalid)
        }
    }

    pub fn side(&self) -> ExitSide {
        self.side
    }

    /// The row (left/right exits) or column (top/bottom exits) the exit
    /// opens onto.
    pub fn lane(&self) -> usize {
        self.lane
    }

    /// Re-encodes the exit as the conventional `(row, col)` pair just outside
    /// the grid.
    pub fn coords(&self, rows: usize, cols: usize) -> (isize, isize) {
        match self.side {
            ExitSide::Top => (-1, self.lane as isize),
            ExitSide::Bottom => (rows as isize, self.lane as isize),
            ExitSide::Left => (self.lane as isize, -1),
            ExitSide::Right => (self.lane as isize, cols as isize),
        }
    }

    /// Orientation the primary piece must have to pass through this exit.
    pub fn required_orientation(&self) -> Orientation {
        match self.side {
            ExitSide::Top | ExitSide::Bottom => Orientation::Vertical,
            ExitSide::Left | ExitSide::Right => Orientation::Horizontal,
        }
    }
}

/// One slide of one piece: which piece moved (by index into the board's
/// piece list) and its origin before and after. Direction and distance are
/// derived from the coordinate pair, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub piece: usize,
    pub from: (usize, usize),
    pub to: (usize, usize),
}

impl Move {
    /// Direction of travel as a lowercase word.
    pub fn direction(&self) -> &'static str {
        let (from_row, from_col) = self.from;
        let (to_row, to_col) = self.to;
        if to_row < from_row {
            "up"
        } else if to_row > from_row {
            "down"
        } else if to_col < from_col {
            "left"
        } else {
            "right"
        }
    }

    /// Number of cells covered by the slide. Always at least 1; the move
    /// still costs a single unit regardless.
    pub fn distance(&self) -> usize {
        let rows = self.from.0.abs_diff(self.to.0);
        let cols = self.from.1.abs_diff(self.to.1);
        rows + cols
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "piece {} from ({}, {}) to ({}, {})",
            self.piece, self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

/// The puzzle board: dimensions, an ordered list of pieces, and the exit.
///
/// Piece order is stable identity; moves index into it. Construction happens
/// through [`Board::new`], [`Board::place`], and [`Board::set_exit`], each of
/// which fails with a descriptive [`BoardError`] rather than accepting an
/// inconsistent state. [`Board::validate`] checks the cross-cutting
/// invariants a loader must establish before handing the board to a solver.
///
/// # Examples
/// ```
/// use rush_solver::engine::{Board, Exit, ExitSide, Orientation, Piece};
///
/// let mut board = Board::new(6, 6).unwrap();
/// board.set_exit(Exit::new(ExitSide::Right, 2)).unwrap();
/// board
///     .place(Piece::new('P', 2, 0, 2, Orientation::Horizontal, true))
///     .unwrap();
/// board.validate().unwrap();
/// assert!(!board.is_goal());
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    rows: usize,
    cols: usize,
    pieces: Vec<Piece>,
    exit: Option<Exit>,
}

impl Board {
    /// Creates an empty board. Dimensions below 2x2 cannot hold a piece and
    /// are rejected.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows < 2 || cols < 2 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        Ok(Board {
            rows,
            cols,
            pieces: Vec::new(),
            exit: None,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn exit(&self) -> Option<Exit> {
        self.exit
    }

    /// The primary piece, if one has been placed.
    pub fn primary(&self) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.is_primary())
    }

    /// Adds a piece during construction.
    ///
    /// Fails if the piece is shorter than 2 cells, extends beyond the board,
    /// overlaps an already placed piece, or would be a second primary. On
    /// failure the board is left unchanged.
    pub fn place(&mut self, piece: Piece) -> Result<(), BoardError> {
        if piece.length() < 2 {
            return Err(BoardError::PieceTooShort {
                id: piece.id(),
                length: piece.length(),
            });
        }
        let fits = match piece.orientation() {
            Orientation::Horizontal => {
                piece.row() < self.rows && piece.col() + piece.length() <= self.cols
            }
            Orientation::Vertical => {
                piece.col() < self.cols && piece.row() + piece.length() <= self.rows
            }
        };
        if !fits {
            return Err(BoardError::OutOfBounds { id: piece.id() });
        }
        if piece.is_primary() {
            if let Some(existing) = self.primary() {
                return Err(BoardError::DuplicatePrimary {
                    existing: existing.id(),
                    id: piece.id(),
                });
            }
        }
        for (row, col) in piece.cells() {
            if let Some(other) = self.pieces.iter().find(|p| p.occupies(row, col)) {
                return Err(BoardError::Overlap {
                    id: piece.id(),
                    other: other.id(),
                    row,
                    col,
                });
            }
        }
        self.pieces.push(piece);
        Ok(())
    }

    /// Records the single exit. Fails if one is already set or the exit's
    /// lane falls outside the board.
    pub fn set_exit(&mut self, exit: Exit) -> Result<(), BoardError> {
        if self.exit.is_some() {
            return Err(BoardError::ExitAlreadySet);
        }
        let bound = match exit.side() {
            ExitSide::Top | ExitSide::Bottom => self.cols,
            ExitSide::Left | ExitSide::Right => self.rows,
        };
        if exit.lane() >= bound {
            let (row, col) = exit.coords(self.rows, self.cols);
            return Err(BoardError::InvalidExit {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.exit = Some(exit);
        Ok(())
    }

    /// Checks the invariants a loader must establish: an exit exists, exactly
    /// one primary piece exists, and the primary piece lies on the exit lane
    /// with the matching orientation. Solvers call this before searching so a
    /// malformed board is reported instead of silently mis-searched.
    pub fn validate(&self) -> Result<(), BoardError> {
        let exit = self.exit.ok_or(BoardError::MissingExit)?;
        let primary = self.primary().ok_or(BoardError::MissingPrimary)?;
        if primary.orientation() != exit.required_orientation() || primary.lane() != exit.lane() {
            return Err(BoardError::MisalignedPrimary { id: primary.id() });
        }
        Ok(())
    }

    /// True iff the primary piece's leading edge is flush with the exit edge
    /// on the exit lane. Returns false (rather than panicking) on a board
    /// missing its primary piece or exit.
    pub fn is_goal(&self) -> bool {
        let (primary, exit) = match (self.primary(), self.exit) {
            (Some(p), Some(e)) => (p, e),
            _ => return false,
        };
        if primary.orientation() != exit.required_orientation() || primary.lane() != exit.lane() {
            return false;
        }
        match exit.side() {
            ExitSide::Top | ExitSide::Left => primary.axis_position() == 0,
            ExitSide::Bottom => primary.end() == self.rows - 1,
            ExitSide::Right => primary.end() == self.cols - 1,
        }
    }

    /// Whether any piece other than `skip` occupies `(row, col)`.
    fn occupied_by_other(&self, skip: usize, row: usize, col: usize) -> bool {
        self.pieces
            .iter()
            .enumerate()
            .any(|(j, p)| j != skip && p.occupies(row, col))
    }

    /// Whether piece `index` can slide in a straight line to `target` on its
    /// axis: every cell it would cross or come to rest on must be free of
    /// other pieces. The exit itself sits outside the grid, so it never
    /// blocks anything.
    fn path_clear(&self, index: usize, target: usize) -> bool {
        let piece = &self.pieces[index];
        let current = piece.axis_position();
        let (lo, hi) = if target > current {
            (current + piece.length(), target + piece.length() - 1)
        } else {
            (target, current - 1)
        };
        for pos in lo..=hi {
            let (row, col) = match piece.orientation() {
                Orientation::Horizontal => (piece.row(), pos),
                Orientation::Vertical => (pos, piece.col()),
            };
            if self.occupied_by_other(index, row, col) {
                return false;
            }
        }
        true
    }

    /// Generates every board reachable in one slide, paired with the move
    /// that produced it.
    ///
    /// For each piece, every in-bounds target position along its own axis is
    /// a candidate; the candidate is kept when the straight-line corridor
    /// between the current and target positions is clear of other pieces.
    /// Sliding several cells is a single successor at unit cost, the same as
    /// sliding one. This never fails; an immobile piece simply contributes
    /// nothing.
    pub fn successors(&self) -> Vec<(Board, Move)> {
        let mut next = Vec::new();
        for (i, piece) in self.pieces.iter().enumerate() {
            let extent = match piece.orientation() {
                Orientation::Horizontal => self.cols,
                Orientation::Vertical => self.rows,
            };
            let current = piece.axis_position();
            for target in 0..=(extent - piece.length()) {
                if target == current || !self.path_clear(i, target) {
                    continue;
                }
                let moved = piece.with_axis_position(target);
                let mut board = self.clone();
                board.pieces[i] = moved;
                let mv = Move {
                    piece: i,
                    from: (piece.row(), piece.col()),
                    to: (moved.row(), moved.col()),
                };
                next.push((board, mv));
            }
        }
        next
    }

    /// The derived occupancy grid: piece symbols over `.` for empty cells.
    /// Recomputed from the pieces on every call; there is no stored grid to
    /// drift out of sync.
    pub fn grid(&self) -> Vec<Vec<char>> {
        let mut grid = vec![vec!['.'; self.cols]; self.rows];
        for piece in &self.pieces {
            for (row, col) in piece.cells() {
                grid[row][col] = piece.id();
            }
        }
        grid
    }

    /// Key for the visited-state sets: the rendered grid, one row per line.
    ///
    /// Two boards compare equal under this key iff their grids match
    /// cell-for-cell. Piece symbols are part of the grid, so boards that
    /// merely list the same pieces in a different order share a key, which is
    /// exactly the deduplication the searches rely on.
    pub fn canonical_key(&self) -> String {
        let mut key = String::with_capacity(self.rows * (self.cols + 1));
        for (i, row) in self.grid().iter().enumerate() {
            if i > 0 {
                key.push('\n');
            }
            key.extend(row.iter());
        }
        key
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn six_by_six() -> Board {
        let mut board = Board::new(6, 6).unwrap();
        board.set_exit(Exit::new(ExitSide::Right, 2)).unwrap();
        board
            .place(Piece::new('P', 2, 2, 2, Orientation::Horizontal, true))
            .unwrap();
        board
    }

    #[test]
    fn test_new_rejects_tiny_dimensions() {
        assert_eq!(
            Board::new(1, 6).unwrap_err(),
            BoardError::InvalidDimensions { rows: 1, cols: 6 }
        );
        assert_eq!(
            Board::new(6, 0).unwrap_err(),
            BoardError::InvalidDimensions { rows: 6, cols: 0 }
        );
        assert!(Board::new(2, 2).is_ok());
    }

    #[test]
    fn test_place_rejects_short_piece() {
        let mut board = Board::new(6, 6).unwrap();
        let err = board
            .place(Piece::new('A', 0, 0, 1, Orientation::Horizontal, false))
            .unwrap_err();
        assert_eq!(err, BoardError::PieceTooShort { id: 'A', length: 1 });
    }

    #[test]
    fn test_place_rejects_out_of_bounds() {
        let mut board = Board::new(6, 6).unwrap();
        let err = board
            .place(Piece::new('A', 0, 5, 2, Orientation::Horizontal, false))
            .unwrap_err();
        assert_eq!(err, BoardError::OutOfBounds { id: 'A' });

        let err = board
            .place(Piece::new('B', 5, 0, 2, Orientation::Vertical, false))
            .unwrap_err();
        assert_eq!(err, BoardError::OutOfBounds { id: 'B' });
    }

    #[test]
    fn test_place_rejects_overlap() {
        let mut board = Board::new(6, 6).unwrap();
        board
            .place(Piece::new('A', 2, 1, 3, Orientation::Horizontal, false))
            .unwrap();
        let err = board
            .place(Piece::new('B', 0, 2, 4, Orientation::Vertical, false))
            .unwrap_err();
        assert_eq!(
            err,
            BoardError::Overlap {
                id: 'B',
                other: 'A',
                row: 2,
                col: 2
            }
        );
        // Failed placement leaves the board unchanged.
        assert_eq!(board.pieces().len(), 1);
    }

    #[test]
    fn test_place_rejects_second_primary() {
        let mut board = six_by_six();
        let err = board
            .place(Piece::new('Q', 4, 0, 2, Orientation::Horizontal, true))
            .unwrap_err();
        assert_eq!(
            err,
            BoardError::DuplicatePrimary {
                existing: 'P',
                id: 'Q'
            }
        );
    }

    #[test]
    fn test_set_exit_rejects_second_exit() {
        let mut board = six_by_six();
        assert_eq!(
            board.set_exit(Exit::new(ExitSide::Left, 0)).unwrap_err(),
            BoardError::ExitAlreadySet
        );
    }

    #[test]
    fn test_set_exit_rejects_lane_out_of_range() {
        let mut board = Board::new(4, 6).unwrap();
        let err = board.set_exit(Exit::new(ExitSide::Right, 4)).unwrap_err();
        assert_eq!(
            err,
            BoardError::InvalidExit {
                row: 4,
                col: 6,
                rows: 4,
                cols: 6
            }
        );
    }

    #[test]
    fn test_exit_from_coords_edges() {
        let exit = Exit::from_coords(-1, 3, 6, 6).unwrap();
        assert_eq!(exit.side(), ExitSide::Top);
        assert_eq!(exit.lane(), 3);

        let exit = Exit::from_coords(6, 0, 6, 6).unwrap();
        assert_eq!(exit.side(), ExitSide::Bottom);

        let exit = Exit::from_coords(2, -1, 6, 6).unwrap();
        assert_eq!(exit.side(), ExitSide::Left);
        assert_eq!(exit.lane(), 2);

        let exit = Exit::from_coords(2, 6, 6, 6).unwrap();
        assert_eq!(exit.side(), ExitSide::Right);
        assert_eq!(exit.coords(6, 6), (2, 6));
    }

    #[test]
    fn test_exit_from_coords_rejects_interior_and_corners() {
        assert!(Exit::from_coords(2, 3, 6, 6).is_err());
        assert!(Exit::from_coords(-1, -1, 6, 6).is_err());
        assert!(Exit::from_coords(6, 6, 6, 6).is_err());
        assert!(Exit::from_coords(-1, 7, 6, 6).is_err());
    }

    #[test]
    fn test_validate_catches_misaligned_primary() {
        // Primary on row 3, exit lane is row 2.
        let mut board = Board::new(6, 6).unwrap();
        board.set_exit(Exit::new(ExitSide::Right, 2)).unwrap();
        board
            .place(Piece::new('P', 3, 0, 2, Orientation::Horizontal, true))
            .unwrap();
        assert_eq!(
            board.validate().unwrap_err(),
            BoardError::MisalignedPrimary { id: 'P' }
        );

        // Vertical primary cannot use a right-edge exit.
        let mut board = Board::new(6, 6).unwrap();
        board.set_exit(Exit::new(ExitSide::Right, 2)).unwrap();
        board
            .place(Piece::new('P', 2, 2, 2, Orientation::Vertical, true))
            .unwrap();
        assert_eq!(
            board.validate().unwrap_err(),
            BoardError::MisalignedPrimary { id: 'P' }
        );
    }

    #[test]
    fn test_validate_catches_missing_parts() {
        let mut board = Board::new(6, 6).unwrap();
        assert_eq!(board.validate().unwrap_err(), BoardError::MissingExit);
        board.set_exit(Exit::new(ExitSide::Right, 2)).unwrap();
        assert_eq!(board.validate().unwrap_err(), BoardError::MissingPrimary);
    }

    #[test]
    fn test_is_goal_flush_with_each_edge() {
        let mut board = Board::new(6, 6).unwrap();
        board.set_exit(Exit::new(ExitSide::Right, 2)).unwrap();
        board
            .place(Piece::new('P', 2, 4, 2, Orientation::Horizontal, true))
            .unwrap();
        assert!(board.is_goal());

        let mut board = Board::new(6, 6).unwrap();
        board.set_exit(Exit::new(ExitSide::Left, 1)).unwrap();
        board
            .place(Piece::new('P', 1, 0, 2, Orientation::Horizontal, true))
            .unwrap();
        assert!(board.is_goal());

        let mut board = Board::new(6, 6).unwrap();
        board.set_exit(Exit::new(ExitSide::Top, 4)).unwrap();
        board
            .place(Piece::new('P', 0, 4, 3, Orientation::Vertical, true))
            .unwrap();
        assert!(board.is_goal());

        let mut board = Board::new(6, 6).unwrap();
        board.set_exit(Exit::new(ExitSide::Bottom, 0)).unwrap();
        board
            .place(Piece::new('P', 4, 0, 2, Orientation::Vertical, true))
            .unwrap();
        assert!(board.is_goal());
    }

    #[test]
    fn test_is_goal_false_when_short_of_exit() {
        assert!(!six_by_six().is_goal());
    }

    #[test]
    fn test_successors_slide_semantics() {
        // Lone horizontal primary at columns 2-3 on an empty 6x6 lane: every
        // other start column (0, 1, 3, 4) is one slide away.
        let board = six_by_six();
        let next = board.successors();
        assert_eq!(next.len(), 4);
        for (succ, mv) in &next {
            assert_eq!(mv.piece, 0);
            assert_eq!(mv.from, (2, 2));
            assert_eq!(succ.pieces().len(), 1);
            assert!(succ.validate().is_ok());
        }
        let targets: Vec<usize> = next.iter().map(|(_, mv)| mv.to.1).collect();
        assert_eq!(targets, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_successors_blocked_by_other_piece() {
        // Wall at column 4 spanning the whole lane: primary can only go left.
        let mut board = six_by_six();
        board
            .place(Piece::new('A', 0, 4, 6, Orientation::Vertical, false))
            .unwrap();
        let targets: Vec<usize> = board
            .successors()
            .iter()
            .filter(|(_, mv)| mv.piece == 0)
            .map(|(_, mv)| mv.to.1)
            .collect();
        assert_eq!(targets, vec![0, 1]);
    }

    #[test]
    fn test_successors_change_exactly_one_piece() {
        let mut board = six_by_six();
        board
            .place(Piece::new('A', 0, 4, 2, Orientation::Vertical, false))
            .unwrap();
        board
            .place(Piece::new('B', 4, 1, 3, Orientation::Horizontal, false))
            .unwrap();
        for (succ, mv) in board.successors() {
            let mut changed = 0;
            for (i, (before, after)) in board.pieces().iter().zip(succ.pieces()).enumerate() {
                if before != after {
                    changed += 1;
                    assert_eq!(mv.piece, i);
                    assert_eq!((before.row(), before.col()), mv.from);
                    assert_eq!((after.row(), after.col()), mv.to);
                }
            }
            assert_eq!(changed, 1);
            assert_eq!(succ.primary().unwrap().id(), 'P');
        }
    }

    #[test]
    fn test_successors_empty_when_boxed_in() {
        // 2x2 board completely filled: nothing can move.
        let mut board = Board::new(2, 2).unwrap();
        board.set_exit(Exit::new(ExitSide::Right, 0)).unwrap();
        board
            .place(Piece::new('P', 0, 0, 2, Orientation::Horizontal, true))
            .unwrap();
        board
            .place(Piece::new('A', 1, 0, 2, Orientation::Horizontal, false))
            .unwrap();
        assert!(board.successors().is_empty());
    }

    #[test]
    fn test_move_direction_and_distance() {
        let mv = Move {
            piece: 0,
            from: (2, 2),
            to: (2, 4),
        };
        assert_eq!(mv.direction(), "right");
        assert_eq!(mv.distance(), 2);

        let mv = Move {
            piece: 1,
            from: (5, 3),
            to: (1, 3),
        };
        assert_eq!(mv.direction(), "up");
        assert_eq!(mv.distance(), 4);
    }

    #[test]
    fn test_canonical_key_idempotent_and_grid_based() {
        let board = six_by_six();
        assert_eq!(board.canonical_key(), board.canonical_key());

        // Same cells, different placement order: identical key.
        let mut other = Board::new(6, 6).unwrap();
        other
            .place(Piece::new('A', 0, 0, 2, Orientation::Vertical, false))
            .unwrap();
        other.set_exit(Exit::new(ExitSide::Right, 2)).unwrap();
        other
            .place(Piece::new('P', 2, 2, 2, Orientation::Horizontal, true))
            .unwrap();

        let mut reordered = Board::new(6, 6).unwrap();
        reordered.set_exit(Exit::new(ExitSide::Right, 2)).unwrap();
        reordered
            .place(Piece::new('P', 2, 2, 2, Orientation::Horizontal, true))
            .unwrap();
        reordered
            .place(Piece::new('A', 0, 0, 2, Orientation::Vertical, false))
            .unwrap();
        assert_eq!(other.canonical_key(), reordered.canonical_key());

        // A moved piece changes the key.
        let (succ, _) = &board.successors()[0];
        assert_ne!(board.canonical_key(), succ.canonical_key());
    }

    #[test]
    fn test_display_renders_grid() {
        let mut board = Board::new(3, 4).unwrap();
        board.set_exit(Exit::new(ExitSide::Right, 1)).unwrap();
        board
            .place(Piece::new('P', 1, 0, 2, Orientation::Horizontal, true))
            .unwrap();
        board
            .place(Piece::new('A', 0, 3, 3, Orientation::Vertical, false))
            .unwrap();
        assert_eq!(board.to_string(), "...A\nPP.A\n...A");
    }
}
