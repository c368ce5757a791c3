//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};

/// Three cells that win the game when one mark holds all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WinLine([Position; 3]);

impl WinLine {
    /// The cells of this line.
    pub const fn cells(&self) -> [Position; 3] {
        self.0
    }

    /// Returns true when `mark` holds all three cells.
    pub fn held_by(&self, board: &Board, mark: Mark) -> bool {
        self.0
            .iter()
            .all(|pos| board.get(*pos) == Square::Occupied(mark))
    }
}

/// The 8 winning lines, rows then columns then diagonals.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([Position::TopLeft, Position::TopCenter, Position::TopRight]),
    WinLine([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
    WinLine([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
    // Columns
    WinLine([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
    WinLine([Position::TopCenter, Position::Center, Position::BottomCenter]),
    WinLine([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
    // Diagonals
    WinLine([Position::TopLeft, Position::Center, Position::BottomRight]),
    WinLine([Position::BottomLeft, Position::Center, Position::TopRight]),
];

/// Index of the first line in [`WIN_LINES`] held entirely by `mark`.
pub fn winning_line(board: &Board, mark: Mark) -> Option<usize> {
    WIN_LINES.iter().position(|line| line.held_by(board, mark))
}

/// Checks whether `mark` has three in a row.
pub fn evaluate(board: &Board, mark: Mark) -> bool {
    winning_line(board, mark).is_some()
}
