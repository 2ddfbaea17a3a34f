//! Game rules.
//!
//! Pure functions over a [`Board`]. Rules are kept apart from session
//! bookkeeping so the opponent selector can run them on simulated boards.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, check_winner, winning_line};

use crate::types::{Board, Side};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of evaluating a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Evaluation {
    /// Nobody has won and empty cells remain.
    InProgress,
    /// A side holds a full line.
    Won(Side),
    /// Board is full without a winning line.
    Draw,
}

impl Evaluation {
    /// Returns true for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Evaluation::InProgress)
    }
}

/// Evaluates a board: win, draw, or still in progress.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> Evaluation {
    if let Some(side) = check_winner(board) {
        Evaluation::Won(side)
    } else if is_full(board) {
        Evaluation::Draw
    } else {
        Evaluation::InProgress
    }
}
