//! Classification of a board as finished or still being played.

use super::rules::WIN_LINES;
use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// State of a board as seen by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Empty cells remain and nobody has three in a row.
    InProgress,
    /// `mark` holds every cell of win line number `line`.
    Win {
        /// The winning mark.
        mark: Mark,
        /// Index into [`WIN_LINES`].
        line: usize,
    },
    /// Board is full with no winner.
    Tie,
}

impl Outcome {
    /// Returns true for Win and Tie.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win { mark, .. } => Some(*mark),
            _ => None,
        }
    }

    /// Cells of the winning line, if any.
    pub fn winning_cells(&self) -> Option<[Position; 3]> {
        match self {
            Outcome::Win { line, .. } => WIN_LINES.get(*line).map(|l| l.cells()),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Win { mark, .. } => write!(f, "{} wins", mark),
            Outcome::Tie => write!(f, "Tie"),
        }
    }
}
