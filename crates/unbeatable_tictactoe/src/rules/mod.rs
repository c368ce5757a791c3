//! Game rules for tic-tac-toe.
//!
//! Pure functions over [`Board`](super::Board) values. Nothing here knows about
//! rounds, turns or presentation; the search and the round controller both
//! build on these.

pub mod placement;
pub mod terminal;
pub mod win;

pub use placement::{apply_move, empty_cells};
pub use terminal::{is_full, is_terminal};
pub use win::{WIN_LINES, WinLine, evaluate, winning_line};
