//! Alternating turn invariant: opponent opens, then sides alternate.

use super::Invariant;
use crate::session::Session;
use crate::types::Side;

/// Invariant: history reads Opponent, Human, Opponent, ...
///
/// The side to move is the one the history implies.
pub struct AlternatingTurnInvariant;

impl Invariant<Session> for AlternatingTurnInvariant {
    fn holds(session: &Session) -> bool {
        let history = session.history();

        if let Some(first) = history.first()
            && first.side != Side::Opponent
        {
            return false;
        }

        if history.windows(2).any(|pair| pair[0].side == pair[1].side) {
            return false;
        }

        let expected_next = if history.len() % 2 == 0 {
            Side::Opponent
        } else {
            Side::Human
        };

        session.turn() == expected_next
    }

    fn description() -> &'static str {
        "Opponent opens and sides alternate"
    }
}
