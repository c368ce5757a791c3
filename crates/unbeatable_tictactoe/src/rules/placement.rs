//! Legal placements and their application.

use super::super::{Board, InvalidMove, Mark, Position, Square};
use tracing::{instrument, warn};

/// All empty cells, in ascending index order.
pub fn empty_cells(board: &Board) -> Vec<Position> {
    Position::ALL
        .iter()
        .copied()
        .filter(|pos| board.is_empty(*pos))
        .collect()
}

/// Places `mark` at cell `index`, returning the updated board.
///
/// The input board is never modified, so a rejected move leaves the caller's
/// board exactly as it was.
///
/// # Errors
///
/// - [`InvalidMove::OutOfRange`] if `index` is not 0-8.
/// - [`InvalidMove::Occupied`] if the cell already holds a mark.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, index: usize, mark: Mark) -> Result<Board, InvalidMove> {
    let Some(pos) = Position::from_index(index) else {
        warn!(index, "Rejected out-of-range move");
        return Err(InvalidMove::OutOfRange(index));
    };

    if !board.is_empty(pos) {
        warn!(%pos, "Rejected move on occupied square");
        return Err(InvalidMove::Occupied(pos));
    }

    let mut next = *board;
    next.set(pos, Square::Occupied(mark));
    Ok(next)
}
