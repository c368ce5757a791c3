//! Exhaustive minimax search.
//!
//! The computer maximises and the human minimises. Scores are not discounted
//! by depth, so a win found five plies away is worth the same as an immediate
//! one; among equal scores the lowest cell index is kept. Together these make
//! the chosen move sequence fully deterministic.
//!
//! There is no pruning or caching. The search works on a private copy of the
//! board, placing a mark, recursing for the opponent and removing the mark
//! again before trying the next cell.

use super::rules::{empty_cells, evaluate, is_terminal};
use super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a board the computer has won.
pub const WIN_SCORE: i32 = 10;
/// Score of a board the human has won.
pub const LOSS_SCORE: i32 = -10;
/// Score of a full board with no winner.
pub const TIE_SCORE: i32 = 0;

/// A candidate cell and its minimax value.
///
/// `position` is `None` only when the searched board was already terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredMove {
    /// Cell to play.
    pub position: Option<Position>,
    /// Value of the position from the computer's point of view.
    pub score: i32,
}

impl ScoredMove {
    fn leaf(score: i32) -> Self {
        Self {
            position: None,
            score,
        }
    }
}

/// Returns the optimal cell for `mark`, or `None` if the board is terminal.
#[instrument(skip(board), fields(empty = empty_cells(board).len()))]
pub fn best_move(board: &Board, mark: Mark) -> Option<Position> {
    if is_terminal(board).is_terminal() {
        debug!("No move on a terminal board");
        return None;
    }
    minimax(board, mark).position
}

/// Runs the full search for `mark` and returns the selected cell and score.
#[instrument(level = "debug", skip(board))]
pub fn minimax(board: &Board, mark: Mark) -> ScoredMove {
    let mut scratch = *board;
    let mut nodes = 0u64;
    let result = search(&mut scratch, mark, &mut nodes);
    debug_assert_eq!(&scratch, board, "search must undo every placement");
    debug!(?result, nodes, "Search complete");
    result
}

/// Scores every empty cell for `mark`, in ascending cell order.
///
/// Each entry's score is the minimax value after `mark` plays there.
pub fn candidate_scores(board: &Board, mark: Mark) -> Vec<ScoredMove> {
    let mut scratch = *board;
    let mut nodes = 0u64;
    score_candidates(&mut scratch, mark, &mut nodes)
}

fn search(board: &mut Board, mark: Mark, nodes: &mut u64) -> ScoredMove {
    *nodes += 1;

    if evaluate(board, Mark::Human) {
        return ScoredMove::leaf(LOSS_SCORE);
    }
    if evaluate(board, Mark::Computer) {
        return ScoredMove::leaf(WIN_SCORE);
    }

    let candidates = score_candidates(board, mark, nodes);
    select(mark, &candidates).unwrap_or(ScoredMove::leaf(TIE_SCORE))
}

fn score_candidates(board: &mut Board, mark: Mark, nodes: &mut u64) -> Vec<ScoredMove> {
    empty_cells(board)
        .into_iter()
        .map(|pos| {
            board.set(pos, Square::Occupied(mark));
            let score = search(board, mark.opponent(), nodes).score;
            board.set(pos, Square::Empty);
            ScoredMove {
                position: Some(pos),
                score,
            }
        })
        .collect()
}

/// Strictly best candidate for `mark`; the first one seen wins ties.
fn select(mark: Mark, candidates: &[ScoredMove]) -> Option<ScoredMove> {
    let mut best: Option<ScoredMove> = None;
    for candidate in candidates {
        let better = match best {
            None => true,
            Some(current) => match mark {
                Mark::Computer => candidate.score > current.score,
                Mark::Human => candidate.score < current.score,
            },
        };
        if better {
            best = Some(*candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(index: usize, score: i32) -> ScoredMove {
        ScoredMove {
            position: Position::from_index(index),
            score,
        }
    }

    #[test]
    fn test_select_maximises_for_computer() {
        let candidates = [scored(1, -10), scored(3, 0), scored(5, 10), scored(7, 10)];
        assert_eq!(select(Mark::Computer, &candidates), Some(scored(5, 10)));
    }

    #[test]
    fn test_select_minimises_for_human() {
        let candidates = [scored(0, 0), scored(2, -10), scored(6, -10)];
        assert_eq!(select(Mark::Human, &candidates), Some(scored(2, -10)));
    }

    #[test]
    fn test_select_keeps_first_on_ties() {
        let candidates = [scored(4, 0), scored(0, 0), scored(8, 0)];
        assert_eq!(select(Mark::Computer, &candidates), Some(scored(4, 0)));
        assert_eq!(select(Mark::Human, &candidates), Some(scored(4, 0)));
    }

    #[test]
    fn test_select_empty() {
        assert_eq!(select(Mark::Computer, &[]), None);
    }

    #[test]
    fn test_terminal_boards_score_without_move() {
        let lost: Board = "OOOXX....".parse().unwrap();
        assert_eq!(minimax(&lost, Mark::Computer), ScoredMove::leaf(LOSS_SCORE));

        let won: Board = "XXXOO.O..".parse().unwrap();
        assert_eq!(minimax(&won, Mark::Human), ScoredMove::leaf(WIN_SCORE));

        let tie: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(minimax(&tie, Mark::Computer), ScoredMove::leaf(TIE_SCORE));
        assert_eq!(best_move(&tie, Mark::Computer), None);
    }

    #[test]
    fn test_last_cell_is_forced() {
        let board: Board = "XOXXOOO.X".parse().unwrap();
        assert_eq!(best_move(&board, Mark::Computer), Some(Position::BottomCenter));
    }

    #[test]
    fn test_candidate_scores_cover_every_empty_cell() {
        let board: Board = "XX.O....O".parse().unwrap();
        let scores = candidate_scores(&board, Mark::Computer);
        let cells: Vec<usize> = scores
            .iter()
            .filter_map(|s| s.position.map(Position::to_index))
            .collect();
        assert_eq!(cells, vec![2, 4, 5, 6, 7]);
        assert_eq!(scores[0].score, WIN_SCORE);
    }
}
