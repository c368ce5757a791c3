//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Default symbol drawn for the human's mark.
pub const HUMAN_SYMBOL: char = 'O';
/// Default symbol drawn for the computer's mark.
pub const COMPUTER_SYMBOL: char = 'X';

/// The two sides of a round.
///
/// The human always opens a round. The search treats the computer as the
/// maximising side and the human as the minimising side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The person at the keyboard.
    Human,
    /// The minimax opponent.
    Computer,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::Human => Mark::Computer,
            Mark::Computer => Mark::Human,
        }
    }

    /// Default display symbol.
    pub fn symbol(self) -> char {
        match self {
            Mark::Human => HUMAN_SYMBOL,
            Mark::Computer => COMPUTER_SYMBOL,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::Human => write!(f, "Human"),
            Mark::Computer => write!(f, "Computer"),
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position, without any rule checks.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares held by `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Formats the board with the given symbols, empty cells as `.`.
    pub fn render(&self, human: char, computer: char) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let symbol = match self.squares[row * 3 + col] {
                    Square::Empty => '.',
                    Square::Occupied(Mark::Human) => human,
                    Square::Occupied(Mark::Computer) => computer,
                };
                result.push(symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push('\n');
            }
        }
        result
    }

    /// Parses the 9-character row-major form using the given symbols.
    ///
    /// `.`, `-`, `_`, a space or any digit stands for an empty cell. Symbol
    /// matching ignores ASCII case.
    #[instrument]
    pub fn parse_with(s: &str, human: char, computer: char) -> Result<Self, ParseBoardError> {
        let chars: Vec<char> = s.chars().filter(|c| !matches!(c, '|' | '\n' | '\r')).collect();
        if chars.len() != 9 {
            return Err(ParseBoardError::WrongLength(chars.len()));
        }

        let mut board = Self::new();
        for (pos, c) in Position::ALL.into_iter().zip(chars) {
            let square = if c.eq_ignore_ascii_case(&human) {
                Square::Occupied(Mark::Human)
            } else if c.eq_ignore_ascii_case(&computer) {
                Square::Occupied(Mark::Computer)
            } else if matches!(c, '.' | '-' | '_' | ' ') || c.is_ascii_digit() {
                Square::Empty
            } else {
                return Err(ParseBoardError::UnknownSymbol(c));
            };
            board.set(pos, square);
        }
        Ok(board)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render(HUMAN_SYMBOL, COMPUTER_SYMBOL))
    }
}

impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_with(s, HUMAN_SYMBOL, COMPUTER_SYMBOL)
    }
}

/// Error parsing the text form of a board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ParseBoardError {
    /// The input did not hold exactly 9 cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(usize),

    /// A character was neither a mark symbol nor an empty-cell marker.
    #[display("Unknown cell symbol {:?}", _0)]
    UnknownSymbol(char),
}

impl std::error::Error for ParseBoardError {}
