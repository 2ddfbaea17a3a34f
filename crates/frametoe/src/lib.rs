//! Runtime for frametoe: a controller that owns a game session and its
//! timers, the collaborators outcomes are reported to, and configuration.
//!
//! # Architecture
//!
//! - **Controller**: [`GameController`] drives one [`frametoe_engine::Session`],
//!   schedules the opponent's reply and the countdown, and emits [`GameEvent`]s
//! - **Collaborators**: [`IdentityProvider`], [`ResultsRecorder`], [`Notifier`]
//! - **Results**: [`InMemoryResults`] aggregates outcomes per player
//! - **Config**: [`GameConfig`] from TOML
//!
//! # Example
//!
//! ```no_run
//! use frametoe::{
//!     ChanceNotifier, Collaborators, GameConfig, GameController, InMemoryResults,
//!     StaticIdentity,
//! };
//! use frametoe_engine::{Difficulty, Skin};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default().with_seed(7);
//! let collaborators = Collaborators::new(
//!     Arc::new(StaticIdentity::new(Some("ana".to_string()))),
//!     Arc::new(InMemoryResults::new()),
//!     Arc::new(ChanceNotifier::new(0.25, None)),
//! );
//! let (events, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let mut controller = GameController::new(&config, collaborators, events);
//!
//! controller.start(Difficulty::Hard, Skin::Taco).await?;
//! controller.apply_human_move(0)?;
//! controller.pump().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod collaborators;
mod config;
mod controller;
mod play;
mod results;
mod simulate;

pub use collaborators::{
    ChanceNotifier, CollaboratorError, IdentityProvider, Notifier, PlayerId, ResultsRecorder,
    StaticIdentity,
};
pub use config::{ConfigError, GameConfig, PLAYER_ID_ENV};
pub use controller::{
    Collaborators, ControlCommand, GameController, GameEvent, MIN_TICK_PERIOD, Scheduled,
};
pub use play::{parse_command, run_interactive};
pub use results::{AggregatedStats, InMemoryResults, PlayerResults, ScoreFormula};
pub use simulate::{SimulationReport, simulate};
