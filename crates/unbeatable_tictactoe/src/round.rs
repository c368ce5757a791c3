//! Round controller: the single owner of the authoritative board.
//!
//! A round accepts human move commands, answers each with the computer's
//! reply and reports what happened as [`RoundEvent`]s. Presentation layers
//! replay those events; they never touch the board directly.

use super::invariants::{InvariantSet, InvariantViolation, RoundInvariants};
use super::rules::{apply_move, is_terminal};
use super::search::best_move;
use super::{Board, InvalidMove, Mark, Move, Outcome, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Something the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    /// A mark was placed.
    MovePlayed(Move),
    /// The round reached a terminal state.
    RoundOver(Outcome),
}

/// Error returned when a move command is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum RoundError {
    /// The placement itself was illegal.
    #[display("{}", _0)]
    InvalidMove(InvalidMove),

    /// The round has already been won or tied.
    #[display("Round is already over")]
    #[from(ignore)]
    RoundOver,
}

impl std::error::Error for RoundError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RoundError::InvalidMove(e) => Some(e),
            RoundError::RoundOver => None,
        }
    }
}

/// One round of human versus computer.
///
/// Deserialized rounds are checked against the round invariants and their
/// recorded outcome before they are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoundRecord")]
pub struct Round {
    board: Board,
    outcome: Outcome,
    history: Vec<Move>,
}

/// Unchecked serialized form of a [`Round`].
#[derive(Deserialize)]
struct RoundRecord {
    board: Board,
    outcome: Outcome,
    history: Vec<Move>,
}

impl TryFrom<RoundRecord> for Round {
    type Error = InvariantViolation;

    fn try_from(record: RoundRecord) -> Result<Self, Self::Error> {
        let round = Self {
            board: record.board,
            outcome: record.outcome,
            history: record.history,
        };
        round.check()?;
        Ok(round)
    }
}

impl Round {
    /// Starts a round on an empty board with the human to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            outcome: Outcome::InProgress,
            history: Vec::new(),
        }
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Every move played this round, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The mark to move next, or `None` once the round is over.
    pub fn to_move(&self) -> Option<Mark> {
        if self.outcome.is_terminal() {
            None
        } else if self.history.len() % 2 == 0 {
            Some(Mark::Human)
        } else {
            Some(Mark::Computer)
        }
    }

    /// Plays the human's move at `index`, then the computer's reply.
    ///
    /// On error the round is left unchanged.
    ///
    /// # Errors
    ///
    /// - [`RoundError::RoundOver`] once the round has a Win or Tie outcome.
    /// - [`RoundError::InvalidMove`] for an out-of-range or occupied cell.
    #[instrument(skip(self), fields(moves = self.history.len()))]
    pub fn play(&mut self, index: usize) -> Result<Vec<RoundEvent>, RoundError> {
        if self.outcome.is_terminal() {
            warn!(outcome = %self.outcome, "Move after round end");
            return Err(RoundError::RoundOver);
        }

        let mut events = Vec::with_capacity(3);
        self.place(index, Mark::Human, &mut events)?;

        if !self.outcome.is_terminal()
            && let Some(pos) = best_move(&self.board, Mark::Computer)
        {
            debug!(%pos, "Computer reply");
            self.place(pos.to_index(), Mark::Computer, &mut events)?;
        }

        Ok(events)
    }

    /// Discards the board and starts a fresh round.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        info!(outcome = %self.outcome, moves = self.history.len(), "Resetting round");
        *self = Self::new();
    }

    fn place(
        &mut self,
        index: usize,
        mark: Mark,
        events: &mut Vec<RoundEvent>,
    ) -> Result<(), RoundError> {
        let pos = Position::from_index(index).ok_or(InvalidMove::OutOfRange(index))?;
        self.board = apply_move(&self.board, index, mark)?;
        let mv = Move::new(mark, pos);
        self.history.push(mv);
        events.push(RoundEvent::MovePlayed(mv));

        self.outcome = is_terminal(&self.board);
        if self.outcome.is_terminal() {
            info!(outcome = %self.outcome, "Round over");
            events.push(RoundEvent::RoundOver(self.outcome));
        }

        self.assert_invariants();
        Ok(())
    }

    /// Checks the round invariants and that the outcome matches the board.
    fn check(&self) -> Result<(), InvariantViolation> {
        if let Err(violations) = RoundInvariants::check_all(self) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(InvariantViolation::new(descriptions));
        }

        if is_terminal(&self.board) != self.outcome {
            return Err(InvariantViolation::new("Recorded outcome matches the board"));
        }

        Ok(())
    }

    #[cfg(debug_assertions)]
    fn assert_invariants(&self) {
        if let Err(violation) = self.check() {
            panic!("Round invariant violated: {}", violation);
        }
    }

    #[cfg(not(debug_assertions))]
    fn assert_invariants(&self) {}
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HistoryMatchesBoard, Invariant};

    #[test]
    fn test_new_round() {
        let round = Round::new();
        assert_eq!(round.board(), &Board::new());
        assert_eq!(round.outcome(), Outcome::InProgress);
        assert_eq!(round.to_move(), Some(Mark::Human));
    }

    #[test]
    fn test_play_returns_both_moves() {
        let mut round = Round::new();
        let events = round.play(0).unwrap();
        assert_eq!(
            events,
            vec![
                RoundEvent::MovePlayed(Move::new(Mark::Human, Position::TopLeft)),
                RoundEvent::MovePlayed(Move::new(Mark::Computer, Position::Center)),
            ]
        );
        assert_eq!(round.history().len(), 2);
        assert_eq!(round.to_move(), Some(Mark::Human));
    }

    #[test]
    fn test_rejected_move_leaves_round_unchanged() {
        let mut round = Round::new();
        round.play(4).unwrap();
        let before = round.clone();

        assert_eq!(
            round.play(4),
            Err(RoundError::InvalidMove(InvalidMove::Occupied(Position::Center)))
        );
        assert_eq!(
            round.play(12),
            Err(RoundError::InvalidMove(InvalidMove::OutOfRange(12)))
        );
        assert_eq!(round, before);
    }

    #[test]
    fn test_reset() {
        let mut round = Round::new();
        round.play(8).unwrap();
        round.reset();
        assert_eq!(round, Round::new());
    }

    #[test]
    fn test_deserialize_accepts_consistent_round() {
        let mut round = Round::new();
        round.play(4).unwrap();
        let json = serde_json::to_string(&round).unwrap();
        let restored: Round = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, round);
    }

    #[test]
    fn test_deserialize_rejects_history_board_mismatch() {
        let mut round = Round::new();
        round.play(4).unwrap();
        let mut json = serde_json::to_value(&round).unwrap();
        json["history"] = serde_json::json!([]);

        let err = serde_json::from_value::<Round>(json).unwrap_err();
        assert!(err.to_string().contains(HistoryMatchesBoard::description()));
    }

    #[test]
    fn test_deserialize_rejects_wrong_outcome() {
        let mut json = serde_json::to_value(Round::new()).unwrap();
        json["outcome"] = serde_json::json!("Tie");

        let err = serde_json::from_value::<Round>(json).unwrap_err();
        assert!(err.to_string().contains("outcome"));
    }
}
