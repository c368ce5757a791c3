//! Application state and logic.

use super::input::{digit_to_index, move_cursor};
use crate::config::AppConfig;
use crossterm::event::KeyCode;
use ratatui::style::Color;
use tracing::{debug, warn};
use unbeatable_tictactoe::{Mark, Outcome, Position, Round, RoundEvent};

/// Prompt shown while the human is to move.
const YOUR_TURN: &str = "Your move: arrows + Enter, or 1-9.";

/// Main application state.
pub struct App {
    round: Round,
    cursor: Position,
    status_message: String,
    human_symbol: char,
    computer_symbol: char,
    should_quit: bool,
}

impl App {
    /// Creates a new application with a fresh round.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            round: Round::new(),
            cursor: Position::Center,
            status_message: YOUR_TURN.to_string(),
            human_symbol: *config.human_symbol(),
            computer_symbol: *config.computer_symbol(),
            should_quit: false,
        }
    }

    /// The round being played.
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Gets the current status message.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Display symbol for a mark.
    pub fn symbol(&self, mark: Mark) -> char {
        match mark {
            Mark::Human => self.human_symbol,
            Mark::Computer => self.computer_symbol,
        }
    }

    /// End-of-round banner, if the round is over.
    pub fn banner(&self) -> Option<&'static str> {
        match self.round.outcome() {
            Outcome::InProgress => None,
            Outcome::Win {
                mark: Mark::Human, ..
            } => Some("You Win!"),
            Outcome::Win {
                mark: Mark::Computer,
                ..
            } => Some("You Lose!"),
            Outcome::Tie => Some("Tie Game!"),
        }
    }

    /// Background colour for a cell once the round is over.
    ///
    /// The winning line is blue when the human won and red when the computer
    /// did; after a tie every cell is green.
    pub fn highlight(&self, pos: Position) -> Option<Color> {
        let outcome = self.round.outcome();
        match outcome {
            Outcome::InProgress => None,
            Outcome::Tie => Some(Color::Green),
            Outcome::Win { mark, .. } => {
                let cells = outcome.winning_cells()?;
                cells.contains(&pos).then_some(match mark {
                    Mark::Human => Color::Blue,
                    Mark::Computer => Color::Red,
                })
            }
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') => self.restart(),
            KeyCode::Enter | KeyCode::Char(' ') => self.place(self.cursor.to_index()),
            KeyCode::Char(c) => {
                if let Some(index) = digit_to_index(c) {
                    self.place(index);
                }
            }
            other => self.cursor = move_cursor(self.cursor, other),
        }
    }

    /// Plays the human's move and replays the resulting events.
    fn place(&mut self, index: usize) {
        match self.round.play(index) {
            Ok(events) => {
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                }
                for event in events {
                    self.handle_event(event);
                }
            }
            Err(e) => {
                warn!(index, error = %e, "Move rejected");
                self.status_message = match self.banner() {
                    Some(banner) => format!("{} Press 'r' to play again or 'q' to quit.", banner),
                    None => format!("{}. {}", e, YOUR_TURN),
                };
            }
        }
    }

    /// Updates the status line for an event from the round.
    fn handle_event(&mut self, event: RoundEvent) {
        debug!(?event, "Handling round event");

        match event {
            RoundEvent::MovePlayed(mv) => {
                self.status_message = match mv.mark {
                    Mark::Human => format!("You played {}.", mv.position.label()),
                    Mark::Computer => format!(
                        "Computer played {}. {}",
                        mv.position.label(),
                        YOUR_TURN
                    ),
                };
            }
            RoundEvent::RoundOver(outcome) => {
                debug!(%outcome, "Round finished");
                if let Some(banner) = self.banner() {
                    self.status_message =
                        format!("{} Press 'r' to play again or 'q' to quit.", banner);
                }
            }
        }
    }

    /// Starts a new round.
    pub fn restart(&mut self) {
        debug!("Restarting round");
        self.round.reset();
        self.cursor = Position::Center;
        self.status_message = YOUR_TURN.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(&AppConfig::default())
    }

    #[test]
    fn test_digit_plays_and_computer_replies() {
        let mut app = app();
        app.handle_key(KeyCode::Char('1'));
        assert_eq!(app.round().history().len(), 2);
        assert!(app.status_message().starts_with("Computer played Center."));
    }

    #[test]
    fn test_enter_plays_under_cursor() {
        let mut app = app();
        app.handle_key(KeyCode::Up);
        app.handle_key(KeyCode::Enter);
        assert_eq!(app.round().history()[0].position, Position::TopCenter);
    }

    #[test]
    fn test_occupied_cell_reported() {
        let mut app = app();
        app.handle_key(KeyCode::Char('5'));
        app.handle_key(KeyCode::Char('5'));
        assert!(app.status_message().contains("already occupied"));
        assert_eq!(app.round().history().len(), 2);
    }

    #[test]
    fn test_losing_round_shows_banner_and_red_line() {
        let mut app = app();
        // 1 -> centre, 2 -> blocked at 3, 4 leaves the anti-diagonal open.
        for key in ['1', '2', '4'] {
            app.handle_key(KeyCode::Char(key));
        }
        assert_eq!(app.banner(), Some("You Lose!"));
        assert!(app.status_message().starts_with("You Lose!"));
        for pos in [Position::TopRight, Position::Center, Position::BottomLeft] {
            assert_eq!(app.highlight(pos), Some(Color::Red));
        }
        assert_eq!(app.highlight(Position::TopLeft), None);

        app.handle_key(KeyCode::Char('9'));
        assert_eq!(app.round().history().len(), 6);
        assert!(app.status_message().starts_with("You Lose!"));
    }

    #[test]
    fn test_restart_and_quit() {
        let mut app = app();
        app.handle_key(KeyCode::Char('3'));
        app.handle_key(KeyCode::Char('r'));
        assert!(app.round().history().is_empty());
        assert_eq!(app.status_message(), YOUR_TURN);
        assert!(!app.should_quit());
        app.handle_key(KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[test]
    fn test_no_highlight_in_progress() {
        let app = app();
        assert!(Position::ALL.iter().all(|p| app.highlight(*p).is_none()));
        assert_eq!(app.banner(), None);
    }
}
