//! Properties of a [`Session`](crate::Session) that no transition may break.
//!
//! Debug builds check them after every placement.

pub mod alternating_turn;
pub mod history_consistent;
pub mod monotonic_board;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

/// A property of a state that every transition must preserve.
pub trait Invariant<S> {
    /// True if `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// Short statement of the property, used in violation reports.
    fn description() -> &'static str;
}

/// One failed invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Statement of the property that failed.
    pub description: String,
}

impl InvariantViolation {
    /// Wraps a failed property's description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Invariants checked as a group.
pub trait InvariantSet<S> {
    /// Collects every violation rather than stopping at the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, A, B, C> InvariantSet<S> for (A, B, C)
where
    A: Invariant<S>,
    B: Invariant<S>,
    C: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let checks: [(fn(&S) -> bool, &'static str); 3] = [
            (A::holds, A::description()),
            (B::holds, B::description()),
            (C::holds, C::description()),
        ];
        let violations: Vec<InvariantViolation> = checks
            .into_iter()
            .filter(|(holds, _)| !holds(state))
            .map(|(_, description)| InvariantViolation::new(description))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::position::Position;
    use crate::session::Session;
    use crate::types::{Cell, Difficulty, Skin};

    #[test]
    fn test_invariant_set_holds_for_new_session() {
        assert!(SessionInvariants::check_all(&Session::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let session = Session::replay(
            Difficulty::Easy,
            Skin::Taco,
            &[
                Move::opponent(Position::TopLeft),
                Move::human(Position::Center),
                Move::opponent(Position::TopRight),
            ],
        )
        .expect("valid replay");
        assert!(SessionInvariants::check_all(&session).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut session = Session::replay(
            Difficulty::Easy,
            Skin::Taco,
            &[Move::opponent(Position::TopLeft)],
        )
        .expect("valid replay");
        // A cell with no history entry breaks monotonicity and consistency.
        session.board.set(Position::BottomRight, Cell::Opponent);

        let violations = SessionInvariants::check_all(&session).unwrap_err();
        assert_eq!(violations.len(), 2);
    }
}
