//! Heuristic estimators for the remaining move count.
//!
//! Each heuristic reads the primary piece and the cells between its leading
//! edge and the exit, and returns a lower-bound style estimate of the moves
//! still needed. Boards are never mutated.
//!
//! A note on admissibility: the cost model charges one unit per slide no
//! matter how far the piece travels, but [`manhattan`] counts *cells*. It can
//! therefore exceed the true remaining move count, so A* and IDA* lose their
//! optimality guarantee when it is selected. That trade-off is deliberate and
//! documented rather than corrected; [`blocking_pieces`] is admissible under
//! the unit-slide model.

use crate::engine::{Board, ExitSide};

/// Selects which estimator a search strategy uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heuristic {
    /// Count of occupied cells between the primary piece and the exit.
    BlockingPieces,
    /// Cell distance from the primary piece's leading edge to the exit edge.
    Manhattan,
    /// `2 * blocking_pieces + manhattan`, weighted toward blockers.
    Combined,
}

impl Heuristic {
    pub fn evaluate(&self, board: &Board) -> u32 {
        match self {
            Heuristic::BlockingPieces => blocking_pieces(board),
            Heuristic::Manhattan => manhattan(board),
            Heuristic::Combined => combined(board),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Heuristic::BlockingPieces => "blocking pieces",
            Heuristic::Manhattan => "manhattan distance",
            Heuristic::Combined => "combined (2 * blocking + manhattan)",
        }
    }
}

/// The lane cells strictly between the primary piece's leading edge and the
/// exit edge, as (row, col) pairs. Empty when the board has no primary piece
/// or no exit.
fn cells_to_exit(board: &Board) -> Vec<(usize, usize)> {
    let (primary, exit) = match (board.primary(), board.exit()) {
        (Some(p), Some(e)) => (p, e),
        _ => return Vec::new(),
    };
    let lane = primary.lane();
    let range: Vec<usize> = match exit.side() {
        ExitSide::Top | ExitSide::Left => (0..primary.axis_position()).collect(),
        ExitSide::Bottom => (primary.end() + 1..board.rows()).collect(),
        ExitSide::Right => (primary.end() + 1..board.cols()).collect(),
    };
    range
        .into_iter()
        .map(|pos| match exit.side() {
            ExitSide::Left | ExitSide::Right => (lane, pos),
            ExitSide::Top | ExitSide::Bottom => (pos, lane),
        })
        .collect()
}

/// Number of occupied cells between the primary piece's leading edge and the
/// exit. Each blocking vehicle has to leave the lane at least once, so this
/// is a lower bound on the remaining moves.
///
/// Returns `u32::MAX` when the board has no primary piece; that indicates a
/// construction error slipped past validation, not a normal state.
pub fn blocking_pieces(board: &Board) -> u32 {
    if board.primary().is_none() || board.exit().is_none() {
        return u32::MAX;
    }
    cells_to_exit(board)
        .into_iter()
        .filter(|&(row, col)| board.pieces().iter().any(|p| p.occupies(row, col)))
        .count() as u32
}

/// Cell distance from the primary piece's leading edge to the exit edge.
///
/// Counts cells, not moves: one slide may cover many cells at unit cost, so
/// this may overestimate (see the module docs on admissibility).
///
/// Returns `u32::MAX` when the board has no primary piece.
pub fn manhattan(board: &Board) -> u32 {
    let (primary, exit) = match (board.primary(), board.exit()) {
        (Some(p), Some(e)) => (p, e),
        _ => return u32::MAX,
    };
    let distance = match exit.side() {
        ExitSide::Top | ExitSide::Left => primary.axis_position(),
        ExitSide::Bottom => board.rows() - (primary.end() + 1),
        ExitSide::Right => board.cols() - (primary.end() + 1),
    };
    distance as u32
}

/// Fixed linear combination `2 * blocking_pieces + manhattan`, applied
/// uniformly to every strategy that selects it.
pub fn combined(board: &Board) -> u32 {
    let blocking = blocking_pieces(board);
    let distance = manhattan(board);
    if blocking == u32::MAX || distance == u32::MAX {
        return u32::MAX;
    }
    blocking.saturating_mul(2).saturating_add(distance)
}
