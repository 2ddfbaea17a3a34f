//! Headless games between the opponent and a random human.

use derive_getters::Getters;
use frametoe_engine::{Difficulty, EngineError, Outcome, Session, Skin, random_move};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Tally of simulated games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Getters, Serialize, derive_more::Display)]
#[display(
    "{} games: human {} / opponent {} / draw {}",
    games,
    human_wins,
    opponent_wins,
    draws
)]
pub struct SimulationReport {
    games: u32,
    human_wins: u32,
    opponent_wins: u32,
    draws: u32,
}

impl SimulationReport {
    fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome {
            Outcome::HumanWin => self.human_wins += 1,
            Outcome::OpponentWin | Outcome::TimedOut => self.opponent_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }
}

/// Plays `games` untimed games against a human that picks uniformly at
/// random.
#[instrument]
pub fn simulate(
    games: u32,
    difficulty: Difficulty,
    seed: Option<u64>,
) -> Result<SimulationReport, EngineError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut report = SimulationReport::default();

    for game in 0..games {
        let mut session = Session::started(difficulty, Skin::default(), &mut rng)?;
        let outcome = loop {
            if let Some(outcome) = session.outcome() {
                break outcome;
            }
            if session.awaiting_opponent() {
                session.apply_opponent_move(&mut rng)?;
            } else {
                let position = random_move(session.board(), &mut rng)?;
                session.apply_human_move(position.to_index())?;
            }
        };
        debug!(game, %outcome, "Simulated game finished");
        report.record(outcome);
    }

    info!(%report, "Simulation complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_add_up() {
        let report = simulate(200, Difficulty::Medium, Some(9)).unwrap();
        assert_eq!(*report.games(), 200);
        assert_eq!(
            report.human_wins() + report.opponent_wins() + report.draws(),
            200
        );
    }

    #[test]
    fn test_hard_beats_random_play_more_often_than_easy() {
        let hard = simulate(400, Difficulty::Hard, Some(21)).unwrap();
        let easy = simulate(400, Difficulty::Easy, Some(21)).unwrap();
        assert!(hard.human_wins() < easy.human_wins());
    }

    #[test]
    fn test_seeded_runs_repeat() {
        assert_eq!(
            simulate(50, Difficulty::Easy, Some(4)).unwrap(),
            simulate(50, Difficulty::Easy, Some(4)).unwrap()
        );
    }
}
