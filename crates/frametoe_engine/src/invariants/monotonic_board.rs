//! Monotonic board invariant: cells never change once set.

use super::Invariant;
use crate::session::Session;
use crate::types::{Board, Cell};

/// Invariant: the board is exactly what the history builds.
///
/// Replays the history onto an empty board, requiring every placement to
/// land on an empty cell, and compares with the live board.
pub struct MonotonicBoardInvariant;

impl Invariant<Session> for MonotonicBoardInvariant {
    fn holds(session: &Session) -> bool {
        let mut reconstructed = Board::new();

        for mv in session.history() {
            if !reconstructed.is_empty(mv.position) {
                return false;
            }
            reconstructed.set(mv.position, Cell::for_side(mv.side, session.skin()));
        }

        reconstructed == *session.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::position::Position;
    use crate::types::{Difficulty, Skin};

    #[test]
    fn test_new_session_holds() {
        assert!(MonotonicBoardInvariant::holds(&Session::new()));
    }

    #[test]
    fn test_replayed_session_holds() {
        let session = Session::replay(
            Difficulty::Medium,
            Skin::Pepper,
            &[
                Move::opponent(Position::Center),
                Move::human(Position::TopLeft),
                Move::opponent(Position::BottomRight),
                Move::human(Position::TopRight),
            ],
        )
        .expect("valid replay");
        assert!(MonotonicBoardInvariant::holds(&session));
    }

    #[test]
    fn test_overwritten_cell_violates() {
        let mut session = Session::replay(
            Difficulty::Medium,
            Skin::Pepper,
            &[Move::opponent(Position::Center)],
        )
        .expect("valid replay");
        session.board.set(Position::Center, Cell::Player(Skin::Pepper));
        assert!(!MonotonicBoardInvariant::holds(&session));
    }
}
