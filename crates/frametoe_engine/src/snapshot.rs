//! Serializable view of a session.

use crate::action::Move;
use crate::phases::{Outcome, Phase};
use crate::position::Position;
use crate::rules::winning_line;
use crate::session::Session;
use crate::types::{Board, Difficulty, Side, Skin};
use serde::{Deserialize, Serialize};

/// Everything a UI needs to draw a session, detached from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The board.
    pub board: Board,
    /// Side to move.
    pub turn: Side,
    /// Lifecycle phase, carrying the outcome when terminal.
    pub phase: Phase,
    /// Opponent strength.
    pub difficulty: Difficulty,
    /// Human's marker skin.
    pub skin: Skin,
    /// Countdown units left.
    pub countdown_remaining: u32,
    /// Whether the countdown is ticking.
    pub countdown_running: bool,
    /// Moves in play order.
    pub history: Vec<Move>,
    /// Completed line, for highlighting.
    pub winning_line: Option<[Position; 3]>,
}

impl SessionSnapshot {
    /// Returns the outcome if the session finished.
    pub fn outcome(&self) -> Option<Outcome> {
        self.phase.outcome()
    }

    /// Returns true once the session finished.
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Most recent move, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Returns a status string for display.
    pub fn status_string(&self) -> String {
        match self.phase {
            Phase::NotStarted => "Ready to start".to_string(),
            Phase::InProgress => match self.turn {
                Side::Human if self.countdown_running => {
                    format!("Your move ({}s left)", self.countdown_remaining)
                }
                Side::Human => "Your move".to_string(),
                Side::Opponent => "Opponent is thinking...".to_string(),
            },
            Phase::Terminal(Outcome::HumanWin) => "Game over. You win!".to_string(),
            Phase::Terminal(Outcome::OpponentWin) => "Game over. Opponent wins!".to_string(),
            Phase::Terminal(Outcome::Draw) => "Game over. Draw!".to_string(),
            Phase::Terminal(Outcome::TimedOut) => "Game over. Time ran out!".to_string(),
        }
    }
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        Self {
            board: *session.board(),
            turn: session.turn(),
            phase: session.phase(),
            difficulty: session.difficulty(),
            skin: session.skin(),
            countdown_remaining: session.countdown().remaining(),
            countdown_running: session.countdown().is_running(),
            history: session.history().to_vec(),
            winning_line: winning_line(session.board()),
        }
    }
}
