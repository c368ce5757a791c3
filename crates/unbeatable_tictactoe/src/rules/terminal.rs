//! Terminal-state detection.

use super::super::{Board, Mark, Outcome, Square};
use super::win::winning_line;
use tracing::instrument;

/// Checks if the board is full (all squares occupied).
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| *s != Square::Empty)
}

/// Classifies the board.
///
/// A win is checked for the human first, then the computer, and always takes
/// precedence over a full board.
#[instrument(level = "trace")]
pub fn is_terminal(board: &Board) -> Outcome {
    for mark in [Mark::Human, Mark::Computer] {
        if let Some(line) = winning_line(board, mark) {
            return Outcome::Win { mark, line };
        }
    }

    if is_full(board) {
        Outcome::Tie
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(is_terminal(&Board::new()), Outcome::InProgress);
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_tie_detection() {
        // X O X / X O O / O X X  with O the human
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert!(is_full(&board));
        assert_eq!(is_terminal(&board), Outcome::Tie);
    }

    #[test]
    fn test_win_on_full_board_is_not_tie() {
        // Computer completes the left column with the last empty cell.
        let board: Board = "XOOXOXXXO".parse().unwrap();
        assert!(is_full(&board));
        assert_eq!(
            is_terminal(&board),
            Outcome::Win {
                mark: Mark::Computer,
                line: 3
            }
        );
    }

    #[test]
    fn test_human_win_reported() {
        let board: Board = "OOOXX....".parse().unwrap();
        assert_eq!(
            is_terminal(&board),
            Outcome::Win {
                mark: Mark::Human,
                line: 0
            }
        );
    }
}
