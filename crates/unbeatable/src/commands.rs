//! Non-interactive commands: `hint` and `self-play`.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, instrument, warn};
use unbeatable_tictactoe::{
    BalancedMarks, Board, Invariant, Mark, Move, Outcome, ScoredMove, apply_move, best_move,
    candidate_scores, is_terminal, minimax,
};

/// Result of analysing a board for the computer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HintReport {
    /// The board as parsed, in display form.
    pub board: String,
    /// Classification of the board.
    pub outcome: Outcome,
    /// The chosen cell and its score, absent on a terminal board.
    pub best: Option<ScoredMove>,
    /// Score of every empty cell, ascending by cell.
    pub candidates: Vec<ScoredMove>,
}

/// A full game with the search playing both sides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelfPlayReport {
    /// Moves in order, human side first.
    pub moves: Vec<Move>,
    /// Final classification, always a tie under optimal play.
    pub outcome: Outcome,
    /// Board after the last move.
    pub board: Board,
}

/// Parses `text` with the configured symbols and searches it for the computer.
#[instrument(skip(config))]
pub fn hint(config: &AppConfig, text: &str) -> Result<HintReport> {
    let human = *config.human_symbol();
    let computer = *config.computer_symbol();
    let board = Board::parse_with(text, human, computer)
        .with_context(|| format!("Invalid board {:?}", text))?;

    if !BalancedMarks::holds(&board) {
        warn!("{}", BalancedMarks::description());
    }

    let outcome = is_terminal(&board);
    let (best, candidates) = if outcome.is_terminal() {
        (None, Vec::new())
    } else {
        (
            Some(minimax(&board, Mark::Computer)),
            candidate_scores(&board, Mark::Computer),
        )
    };

    Ok(HintReport {
        board: board.render(human, computer),
        outcome,
        best,
        candidates,
    })
}

/// Plays `best_move` for both sides until the board is terminal.
#[instrument]
pub fn self_play() -> Result<SelfPlayReport> {
    let mut board = Board::new();
    let mut mark = Mark::Human;
    let mut moves = Vec::new();

    while let Some(pos) = best_move(&board, mark) {
        board = apply_move(&board, pos.to_index(), mark)?;
        moves.push(Move::new(mark, pos));
        mark = mark.opponent();
    }

    let outcome = is_terminal(&board);
    info!(moves = moves.len(), %outcome, "Self-play finished");
    Ok(SelfPlayReport {
        moves,
        outcome,
        board,
    })
}

/// Formats a hint for the terminal.
pub fn format_hint(report: &HintReport) -> String {
    let mut out = format!("{}\n\n", report.board);
    match report.best.and_then(|b| b.position.map(|p| (p, b.score))) {
        Some((pos, score)) => {
            out.push_str(&format!(
                "Best move: {} ({}), score {:+}\n",
                pos.to_index(),
                pos.label(),
                score
            ));
            for candidate in &report.candidates {
                if let Some(pos) = candidate.position {
                    out.push_str(&format!(
                        "  {} {:>13}: {:+}\n",
                        pos.to_index(),
                        pos.label(),
                        candidate.score
                    ));
                }
            }
        }
        None => out.push_str(&format!("No move: {}\n", report.outcome)),
    }
    out
}

/// Formats a self-play game for the terminal.
pub fn format_self_play(report: &SelfPlayReport, config: &AppConfig) -> String {
    let mut out = String::new();
    for (i, mv) in report.moves.iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, mv));
    }
    out.push_str(&format!(
        "\n{}\n\n{}\n",
        report.board.render(*config.human_symbol(), *config.computer_symbol()),
        report.outcome
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use unbeatable_tictactoe::{Position, WIN_SCORE};

    #[test]
    fn test_hint_finds_winning_cell() {
        let report = hint(&AppConfig::default(), "XX.O....O").unwrap();
        assert_eq!(report.outcome, Outcome::InProgress);
        assert_eq!(
            report.best,
            Some(ScoredMove {
                position: Some(Position::TopRight),
                score: WIN_SCORE
            })
        );
        assert_eq!(report.candidates.len(), 5);
        assert!(format_hint(&report).contains("Best move: 2 (Top-right), score +10"));
    }

    #[test]
    fn test_hint_on_finished_board() {
        let report = hint(&AppConfig::default(), "OOOXX....").unwrap();
        assert!(report.best.is_none());
        assert!(report.candidates.is_empty());
        assert!(format_hint(&report).contains("No move: Human wins"));
    }

    #[test]
    fn test_hint_rejects_garbage() {
        assert!(hint(&AppConfig::default(), "not a board").is_err());
    }

    #[test]
    fn test_self_play_ties() {
        let report = self_play().unwrap();
        assert_eq!(report.moves.len(), 9);
        assert_eq!(report.outcome, Outcome::Tie);
        assert_eq!(report.moves[0], Move::new(Mark::Human, Position::TopLeft));
        assert!(format_self_play(&report, &AppConfig::default()).ends_with("Tie\n"));
    }

    #[test]
    fn test_self_play_report_carries_final_board() {
        let report = self_play().unwrap();
        let mut replayed = Board::new();
        for mv in &report.moves {
            replayed = apply_move(&replayed, mv.position.to_index(), mv.mark).unwrap();
        }
        assert_eq!(report.board, replayed);
        assert_eq!(is_terminal(&report.board), report.outcome);

        let text = format_self_play(&report, &AppConfig::default());
        assert!(text.contains(&report.board.render('O', 'X')));
    }

    #[test]
    fn test_reports_serialize() {
        let report = hint(&AppConfig::default(), "OO..X....").unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["best"]["position"], "TopRight");
        assert_eq!(json["outcome"], "InProgress");
    }
}
