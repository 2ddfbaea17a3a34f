//! Contract-based move validation.
//!
//! Preconditions decide whether a human move is legal. Postconditions
//! verify that a transition kept the session invariants.

use crate::action::{EngineMisuseError, InvalidMoveError, Move};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::phases::Phase;
use crate::position::Position;
use crate::session::Session;
use crate::types::Side;
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), InvalidMoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), EngineMisuseError>;
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the session accepts moves.
pub struct SessionInProgress;

impl SessionInProgress {
    /// Fails unless the phase is `InProgress`.
    pub fn check(session: &Session) -> Result<(), InvalidMoveError> {
        if session.phase() == Phase::InProgress {
            Ok(())
        } else {
            Err(InvalidMoveError::NotInProgress)
        }
    }
}

/// Precondition: it is the human's turn.
pub struct HumansTurn;

impl HumansTurn {
    /// Fails while the opponent is to move.
    pub fn check(session: &Session) -> Result<(), InvalidMoveError> {
        if session.turn() == Side::Human {
            Ok(())
        } else {
            Err(InvalidMoveError::NotHumansTurn)
        }
    }
}

/// Precondition: the countdown has time left.
pub struct ClockNotExpired;

impl ClockNotExpired {
    /// Fails once the countdown hit zero.
    pub fn check(session: &Session) -> Result<(), InvalidMoveError> {
        if session.countdown().is_expired() {
            Err(InvalidMoveError::CountdownExpired)
        } else {
            Ok(())
        }
    }
}

/// Precondition: the target cell is empty.
pub struct CellIsEmpty;

impl CellIsEmpty {
    /// Fails if the cell already holds a marker.
    pub fn check(session: &Session, position: Position) -> Result<(), InvalidMoveError> {
        if session.board().is_empty(position) {
            Ok(())
        } else {
            Err(InvalidMoveError::CellOccupied(position))
        }
    }
}

/// Composite precondition for a human move.
pub struct LegalHumanMove;

impl LegalHumanMove {
    /// Validates all preconditions for placing the human's marker.
    pub fn check(session: &Session, position: Position) -> Result<(), InvalidMoveError> {
        SessionInProgress::check(session)?;
        HumansTurn::check(session)?;
        ClockNotExpired::check(session)?;
        CellIsEmpty::check(session, position)?;
        Ok(())
    }
}

/// Validates a human move by raw cell index and returns its position.
#[instrument(skip(session))]
pub fn check_human_move(session: &Session, index: usize) -> Result<Position, InvalidMoveError> {
    let position = Position::from_index(index).ok_or(InvalidMoveError::OutOfBounds(index))?;
    PlacementContract::pre(session, &Move::human(position))?;
    Ok(position)
}

/// Whether the human may place a marker at `index` right now.
pub fn can_move(session: &Session, index: usize) -> bool {
    check_human_move(session, index).is_ok()
}

// ─────────────────────────────────────────────────────────────
//  Move Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for placements.
///
/// Preconditions (human moves):
/// - Session in progress, human to move, clock running, cell empty
///
/// Postconditions (all moves):
/// - Cells occupied before are unchanged
/// - Session invariants hold
pub struct PlacementContract;

impl Contract<Session, Move> for PlacementContract {
    fn pre(session: &Session, action: &Move) -> Result<(), InvalidMoveError> {
        if action.side != Side::Human {
            return Err(InvalidMoveError::NotHumansTurn);
        }
        LegalHumanMove::check(session, action.position)
    }

    fn post(before: &Session, after: &Session) -> Result<(), EngineMisuseError> {
        let overwritten = Position::ALL.iter().find(|pos| {
            let cell = before.board().get(**pos);
            cell.occupant().is_some() && after.board().get(**pos) != cell
        });
        if let Some(pos) = overwritten {
            return Err(EngineMisuseError::InvariantViolation(format!(
                "Postcondition failed: {} was overwritten",
                pos
            )));
        }

        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            EngineMisuseError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}
