//! Tic-tac-toe against a computer that never loses.
//!
//! # Architecture
//!
//! - **Rules**: pure functions over a 3x3 [`Board`] ([`empty_cells`],
//!   [`apply_move`], [`evaluate`], [`is_terminal`])
//! - **Search**: exhaustive minimax ([`best_move`], [`minimax`])
//! - **Round**: the controller that owns the board for one round and reports
//!   [`RoundEvent`]s to whatever draws it
//!
//! # Example
//!
//! ```
//! use unbeatable_tictactoe::{Mark, Position, Round, RoundEvent};
//!
//! let mut round = Round::new();
//! let events = round.play(Position::TopLeft.to_index()).unwrap();
//! assert!(matches!(events[1], RoundEvent::MovePlayed(mv) if mv.mark == Mark::Computer));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod invariants;
mod outcome;
mod position;
mod round;
pub mod rules;
mod search;
mod types;

pub use action::{InvalidMove, Move};
pub use invariants::{
    BalancedMarks, HistoryMatchesBoard, Invariant, InvariantSet, InvariantViolation, Lifted,
    RoundInvariants, SingleWinner,
};
pub use outcome::Outcome;
pub use position::Position;
pub use round::{Round, RoundError, RoundEvent};
pub use rules::{
    WIN_LINES, WinLine, apply_move, empty_cells, evaluate, is_full, is_terminal, winning_line,
};
pub use search::{
    LOSS_SCORE, ScoredMove, TIE_SCORE, WIN_SCORE, best_move, candidate_scores, minimax,
};
pub use types::{Board, COMPUTER_SYMBOL, HUMAN_SYMBOL, Mark, ParseBoardError, Square};
