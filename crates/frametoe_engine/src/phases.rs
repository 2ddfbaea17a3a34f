//! Session phases and outcomes.

use crate::rules::Evaluation;
use crate::types::Side;
use serde::{Deserialize, Serialize};

/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Outcome {
    /// The human completed a line.
    HumanWin,
    /// The opponent completed a line.
    OpponentWin,
    /// Full board, no line.
    Draw,
    /// The countdown reached zero before the game was decided.
    ///
    /// Scored like an opponent win but kept distinct, since no opponent
    /// move produced it.
    TimedOut,
}

impl Outcome {
    /// Maps a terminal board evaluation to an outcome.
    ///
    /// Returns `None` while the board is still in progress.
    pub fn from_evaluation(evaluation: Evaluation) -> Option<Self> {
        match evaluation {
            Evaluation::InProgress => None,
            Evaluation::Won(Side::Human) => Some(Outcome::HumanWin),
            Evaluation::Won(Side::Opponent) => Some(Outcome::OpponentWin),
            Evaluation::Draw => Some(Outcome::Draw),
        }
    }

    /// Returns the side credited with the win, if any.
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::HumanWin => Some(Side::Human),
            Outcome::OpponentWin | Outcome::TimedOut => Some(Side::Opponent),
            Outcome::Draw => None,
        }
    }

    /// The result from the human's point of view.
    pub fn result(&self) -> HumanResult {
        match self.winner() {
            Some(Side::Human) => HumanResult::Win,
            Some(Side::Opponent) => HumanResult::Loss,
            None => HumanResult::Draw,
        }
    }
}

/// Game result from the human's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HumanResult {
    /// Human won.
    Win,
    /// Human lost, including by timeout.
    Loss,
    /// Nobody won.
    Draw,
}

/// Lifecycle phase of a session.
///
/// A terminal session always carries its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Created but not started.
    NotStarted,
    /// Accepting moves.
    InProgress,
    /// Finished. Absorbing.
    Terminal(Outcome),
}

impl Phase {
    /// Returns true once the session has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }

    /// Returns the outcome of a finished session.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::Terminal(outcome) => Some(*outcome),
            Phase::NotStarted | Phase::InProgress => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::NotStarted => write!(f, "not started"),
            Phase::InProgress => write!(f, "in progress"),
            Phase::Terminal(outcome) => write!(f, "finished ({})", outcome),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_out_counts_as_loss() {
        assert_eq!(Outcome::TimedOut.result(), HumanResult::Loss);
        assert_eq!(Outcome::TimedOut.winner(), Some(Side::Opponent));
        assert_ne!(Outcome::TimedOut, Outcome::OpponentWin);
    }

    #[test]
    fn test_from_evaluation() {
        assert_eq!(Outcome::from_evaluation(Evaluation::InProgress), None);
        assert_eq!(
            Outcome::from_evaluation(Evaluation::Won(Side::Human)),
            Some(Outcome::HumanWin)
        );
        assert_eq!(Outcome::from_evaluation(Evaluation::Draw), Some(Outcome::Draw));
    }

    #[test]
    fn test_only_terminal_has_outcome() {
        assert_eq!(Phase::InProgress.outcome(), None);
        assert_eq!(Phase::Terminal(Outcome::Draw).outcome(), Some(Outcome::Draw));
        assert!(!Phase::NotStarted.is_terminal());
    }
}
