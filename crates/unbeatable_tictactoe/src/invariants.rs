//! First-class invariants for tic-tac-toe.
//!
//! Invariants are logical properties that must hold throughout a round. The
//! round controller checks them after every transition in debug builds; they
//! are also testable on their own.

use super::rules::evaluate;
use super::{Board, Mark, Round, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = match <(I1, I2)>::check_all(state) {
            Ok(()) => Vec::new(),
            Err(violations) => violations,
        };

        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: the human opens, so the human holds as many marks as the
/// computer or exactly one more.
pub struct BalancedMarks;

impl Invariant<Board> for BalancedMarks {
    fn holds(board: &Board) -> bool {
        let human = board.count(Mark::Human);
        let computer = board.count(Mark::Computer);
        computer <= human && human <= computer + 1
    }

    fn description() -> &'static str {
        "Human holds the same number of marks as the computer, or one more"
    }
}

/// Invariant: at most one mark has three in a row.
pub struct SingleWinner;

impl Invariant<Board> for SingleWinner {
    fn holds(board: &Board) -> bool {
        !(evaluate(board, Mark::Human) && evaluate(board, Mark::Computer))
    }

    fn description() -> &'static str {
        "At most one mark has three in a row"
    }
}

/// Invariant: every recorded move is on the board and nothing else is.
pub struct HistoryMatchesBoard;

impl Invariant<Round> for HistoryMatchesBoard {
    fn holds(round: &Round) -> bool {
        let board = round.board();
        let occupied = board
            .squares()
            .iter()
            .filter(|s| **s != Square::Empty)
            .count();

        occupied == round.history().len()
            && round
                .history()
                .iter()
                .all(|mv| board.get(mv.position) == Square::Occupied(mv.mark))
    }

    fn description() -> &'static str {
        "Move history matches the marks on the board"
    }
}

/// Board-level invariants that lift to a round.
impl<I> Invariant<Round> for Lifted<I>
where
    I: Invariant<Board>,
{
    fn holds(round: &Round) -> bool {
        I::holds(round.board())
    }

    fn description() -> &'static str {
        I::description()
    }
}

/// Applies a board invariant to the board held by a round.
pub struct Lifted<I>(std::marker::PhantomData<I>);

/// Everything a round must satisfy after each transition.
pub type RoundInvariants = (
    Lifted<BalancedMarks>,
    Lifted<SingleWinner>,
    HistoryMatchesBoard,
);
