//! Seams to the world outside a game: who is playing, where results go,
//! and who hears about them.

use async_trait::async_trait;
use derive_more::{Display, Error};
use frametoe_engine::{Difficulty, Outcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, instrument};

/// Unique identifier for a player.
pub type PlayerId = String;

/// Failure reported by a collaborator.
#[derive(Debug, Clone, Display, Error)]
#[display("Collaborator error: {} at {}:{}", message, file, line)]
pub struct CollaboratorError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl CollaboratorError {
    /// Creates a new collaborator error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

/// Supplies the identity of the person playing.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the player's identity, or `None` when anonymous.
    async fn player_identity(&self) -> Result<Option<PlayerId>, CollaboratorError>;
}

/// Stores finished game outcomes.
#[async_trait]
pub trait ResultsRecorder: Send + Sync {
    /// Records one finished game.
    async fn record_outcome(
        &self,
        identity: &PlayerId,
        outcome: Outcome,
        difficulty: Difficulty,
    ) -> Result<(), CollaboratorError>;
}

/// Tells someone a game finished.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Possibly sends a notification about a finished game.
    async fn notify(&self, identity: &PlayerId, outcome: Outcome) -> Result<(), CollaboratorError>;
}

/// Identity fixed at construction.
#[derive(Debug, Clone, Default, derive_new::new)]
pub struct StaticIdentity {
    identity: Option<PlayerId>,
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn player_identity(&self) -> Result<Option<PlayerId>, CollaboratorError> {
        Ok(self.identity.clone())
    }
}

/// Notifier that sends with a fixed probability and logs what it sends.
#[derive(Debug)]
pub struct ChanceNotifier {
    probability: f64,
    rng: Mutex<StdRng>,
    sent: AtomicUsize,
}

impl ChanceNotifier {
    /// Creates a notifier that fires with `probability`, clamped to
    /// `0.0..=1.0`. NaN never fires.
    #[instrument]
    pub fn new(probability: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            probability,
            rng: Mutex::new(rng),
            sent: AtomicUsize::new(0),
        }
    }

    /// Number of notifications sent so far.
    pub fn sent(&self) -> usize {
        self.sent.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Notifier for ChanceNotifier {
    #[instrument(skip(self), fields(probability = self.probability))]
    async fn notify(&self, identity: &PlayerId, outcome: Outcome) -> Result<(), CollaboratorError> {
        let send = {
            let mut rng = self
                .rng
                .lock()
                .map_err(|e| CollaboratorError::new(format!("Notifier lock poisoned: {}", e)))?;
            rng.random_bool(self.probability)
        };

        if send {
            self.sent.fetch_add(1, Ordering::Relaxed);
            info!(%identity, %outcome, "Notification sent");
        } else {
            debug!(%identity, %outcome, "Notification skipped");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_identity() {
        let anonymous = StaticIdentity::default();
        assert_eq!(anonymous.player_identity().await.unwrap(), None);

        let named = StaticIdentity::new(Some("ana".to_string()));
        assert_eq!(
            named.player_identity().await.unwrap(),
            Some("ana".to_string())
        );
    }

    #[tokio::test]
    async fn test_chance_notifier_extremes() {
        let id = "ana".to_string();

        let always = ChanceNotifier::new(1.0, Some(1));
        let never = ChanceNotifier::new(0.0, Some(1));
        for _ in 0..20 {
            always.notify(&id, Outcome::Draw).await.unwrap();
            never.notify(&id, Outcome::Draw).await.unwrap();
        }
        assert_eq!(always.sent(), 20);
        assert_eq!(never.sent(), 0);
    }

    #[tokio::test]
    async fn test_chance_notifier_clamps_probability() {
        let notifier = ChanceNotifier::new(7.5, Some(3));
        notifier
            .notify(&"ana".to_string(), Outcome::HumanWin)
            .await
            .unwrap();
        assert_eq!(notifier.sent(), 1);
    }
}
