//! History consistency invariant: history length matches occupied cells.

use super::Invariant;
use crate::session::Session;
use crate::types::Cell;

/// Invariant: every occupied cell has exactly one history entry.
pub struct HistoryConsistentInvariant;

impl Invariant<Session> for HistoryConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let occupied = session
            .board()
            .cells()
            .iter()
            .filter(|cell| **cell != Cell::Empty)
            .count();

        session.history().len() == occupied
    }

    fn description() -> &'static str {
        "History length matches number of occupied cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::position::Position;
    use crate::types::{Difficulty, Skin};

    #[test]
    fn test_full_game_holds() {
        // O P O / O P P / P O O
        let session = Session::replay(
            Difficulty::Easy,
            Skin::Avocado,
            &[
                Move::opponent(Position::TopLeft),
                Move::human(Position::Center),
                Move::opponent(Position::BottomCenter),
                Move::human(Position::TopCenter),
                Move::opponent(Position::TopRight),
                Move::human(Position::MiddleRight),
                Move::opponent(Position::MiddleLeft),
                Move::human(Position::BottomLeft),
                Move::opponent(Position::BottomRight),
            ],
        )
        .expect("valid replay");
        assert!(HistoryConsistentInvariant::holds(&session));
        assert_eq!(session.history().len(), 9);
    }

    #[test]
    fn test_extra_cell_violates() {
        let mut session = Session::replay(
            Difficulty::Easy,
            Skin::Avocado,
            &[Move::opponent(Position::TopLeft)],
        )
        .expect("valid replay");
        session.board.set(Position::Center, Cell::Opponent);
        assert!(!HistoryConsistentInvariant::holds(&session));
    }
}
