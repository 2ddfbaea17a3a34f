//! Moves and engine errors.
//!
//! Moves are domain events: a side placing its marker at a position.
//! They are recorded in session history and can be replayed.

use crate::position::Position;
use crate::types::Side;
use serde::{Deserialize, Serialize};

/// A move: a side placing its marker at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The side making the move.
    pub side: Side,
    /// Where the marker goes.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(side: Side, position: Position) -> Self {
        Self { side, position }
    }

    /// Shorthand for an opponent move.
    pub fn opponent(position: Position) -> Self {
        Self::new(Side::Opponent, position)
    }

    /// Shorthand for a human move.
    pub fn human(position: Position) -> Self {
        Self::new(Side::Human, position)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.side, self.position)
    }
}

/// Why a human move was rejected.
///
/// Recoverable: the caller re-prompts the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMoveError {
    /// Index outside 0-8.
    #[display("Cell index {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The cell already holds a marker.
    #[display("{} is already occupied", _0)]
    CellOccupied(Position),

    /// The opponent is still to move.
    #[display("It's not the human's turn")]
    NotHumansTurn,

    /// The countdown ran out.
    #[display("Countdown has expired")]
    CountdownExpired,

    /// The session is not accepting moves.
    #[display("Session is not in progress")]
    NotInProgress,
}

impl std::error::Error for InvalidMoveError {}

/// Programmer error: an operation was called in a state that forbids it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EngineMisuseError {
    /// The session has not been started.
    #[display("Session has not been started")]
    NotStarted,

    /// `start` was called on a session that already started.
    #[display("Session has already been started")]
    AlreadyStarted,

    /// The session is not in progress.
    #[display("Session is not in progress")]
    NotInProgress,

    /// The operation needs a finished session.
    #[display("Session is not finished")]
    NotTerminal,

    /// An opponent move was requested on the human's turn.
    #[display("It's not the opponent's turn")]
    NotOpponentsTurn,

    /// The selector was asked to move on a full board.
    #[display("No empty cells left")]
    BoardFull,

    /// No session is active.
    #[display("No active session")]
    NoSession,

    /// A replayed history is not a legal game.
    #[display("Invalid replay: {}", _0)]
    InvalidReplay(String),

    /// A postcondition failed after a transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for EngineMisuseError {}

/// Any error raised by a session operation.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum EngineError {
    /// The move was illegal.
    #[display("Invalid move: {}", _0)]
    InvalidMove(InvalidMoveError),

    /// The API was used out of order.
    #[display("Engine misuse: {}", _0)]
    Misuse(EngineMisuseError),
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::InvalidMove(err) => Some(err),
            EngineError::Misuse(err) => Some(err),
        }
    }
}
