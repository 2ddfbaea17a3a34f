//! In-memory results store with per-player aggregates.

use crate::collaborators::{CollaboratorError, PlayerId, ResultsRecorder};
use async_trait::async_trait;
use derive_getters::Getters;
use frametoe_engine::{Difficulty, HumanResult, Outcome};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, instrument};

/// Scoring rule used to order a leaderboard.
///
/// The real formula lives with whoever ranks players; the store only
/// applies it.
pub type ScoreFormula = fn(&AggregatedStats) -> i64;

/// Aggregated results for one player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct AggregatedStats {
    total_games: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    /// Losses that came from the countdown running out.
    timeouts: u32,
}

impl AggregatedStats {
    /// Folds one outcome into the totals.
    pub fn record(&mut self, outcome: Outcome) {
        self.total_games += 1;
        match outcome.result() {
            HumanResult::Win => self.wins += 1,
            HumanResult::Loss => self.losses += 1,
            HumanResult::Draw => self.draws += 1,
        }
        if outcome == Outcome::TimedOut {
            self.timeouts += 1;
        }
    }

    /// Win rate as a percentage (0.0–100.0).
    pub fn win_rate(&self) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            (self.wins as f64 / self.total_games as f64) * 100.0
        }
    }
}

/// One player's results, in total and split by opponent difficulty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerResults {
    overall: AggregatedStats,
    by_difficulty: HashMap<Difficulty, AggregatedStats>,
}

impl PlayerResults {
    /// Folds one outcome into the total and into its difficulty tier.
    pub fn record(&mut self, outcome: Outcome, difficulty: Difficulty) {
        self.overall.record(outcome);
        self.by_difficulty
            .entry(difficulty)
            .or_default()
            .record(outcome);
    }

    /// Totals against one difficulty; empty if never played.
    pub fn at(&self, difficulty: Difficulty) -> AggregatedStats {
        self.by_difficulty
            .get(&difficulty)
            .copied()
            .unwrap_or_default()
    }
}

/// Results recorder that keeps everything in process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResults {
    players: Arc<Mutex<HashMap<PlayerId, PlayerResults>>>,
}

impl InMemoryResults {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating in-memory results store");
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<PlayerId, PlayerResults>> {
        self.players
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Results for one player.
    pub fn stats(&self, identity: &str) -> Option<PlayerResults> {
        self.lock().get(identity).cloned()
    }

    /// Number of players with at least one recorded game.
    pub fn player_count(&self) -> usize {
        self.lock().len()
    }

    /// Players ordered by `formula` over their overall totals, highest
    /// first. Ties order by id.
    #[instrument(skip(self, formula))]
    pub fn leaderboard(&self, formula: ScoreFormula) -> Vec<(PlayerId, i64)> {
        let mut board: Vec<(PlayerId, i64)> = self
            .lock()
            .iter()
            .map(|(id, results)| (id.clone(), formula(&results.overall)))
            .collect();
        board.sort_by(|(a_id, a), (b_id, b)| b.cmp(a).then_with(|| a_id.cmp(b_id)));
        debug!(entries = board.len(), "Leaderboard built");
        board
    }
}

#[async_trait]
impl ResultsRecorder for InMemoryResults {
    #[instrument(skip(self))]
    async fn record_outcome(
        &self,
        identity: &PlayerId,
        outcome: Outcome,
        difficulty: Difficulty,
    ) -> Result<(), CollaboratorError> {
        let mut players = self.lock();
        let entry = players.entry(identity.clone()).or_default();
        entry.record(outcome, difficulty);
        info!(
            total_games = entry.overall.total_games,
            tier_games = entry.at(difficulty).total_games,
            win_rate = entry.overall.win_rate(),
            "Outcome recorded"
        );
        Ok(())
    }
}
