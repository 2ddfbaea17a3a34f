//! Game engine for frametoe, a 3x3 board game against a computer opponent.
//!
//! # Architecture
//!
//! - **Board**: [`Board`] of [`Cell`]s addressed by [`Position`]
//! - **Rules**: [`evaluate`] scans the eight lines for a win or draw
//! - **Validation**: [`can_move`] / [`check_human_move`] gate human moves
//! - **Opponent**: [`select_move`] picks a cell by [`Difficulty`]
//! - **Session**: [`Session`] runs turns, the countdown and the outcome
//!
//! The engine is synchronous and keeps no global state. Randomness is
//! passed in as any [`rand::Rng`], so tests can seed it.
//!
//! # Example
//!
//! ```
//! use frametoe_engine::{Difficulty, Phase, Session, Skin};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let mut session = Session::started(Difficulty::Hard, Skin::Chili, &mut rng)?;
//!
//! let index = session.board().empty_positions()[0].to_index();
//! let snapshot = session.apply_human_move(index)?;
//! assert_eq!(snapshot.phase, Phase::InProgress);
//!
//! session.apply_opponent_move(&mut rng)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod countdown;
mod invariants;
mod opponent;
mod phases;
mod position;
mod rules;
mod session;
mod snapshot;
mod types;

pub use action::{EngineError, EngineMisuseError, InvalidMoveError, Move};
pub use contracts::{can_move, check_human_move};
pub use countdown::{COUNTDOWN_START, Countdown};
pub use invariants::{Invariant, InvariantSet, InvariantViolation, SessionInvariants};
pub use opponent::{
    EASY_CENTER_CHANCE, EASY_STRATEGIC_CHANCE, MEDIUM_STRATEGIC_CHANCE, opening_move,
    random_move, select_move, strategic_move,
};
pub use phases::{HumanResult, Outcome, Phase};
pub use position::Position;
pub use rules::{Evaluation, LINES, check_winner, evaluate, is_full, winning_line};
pub use session::Session;
pub use snapshot::SessionSnapshot;
pub use types::{Board, Cell, Difficulty, Side, Skin};
