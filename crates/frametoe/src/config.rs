//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use frametoe_engine::{Difficulty, Skin};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::collaborators::PlayerId;

/// Environment variable consulted when the config names no player.
pub const PLAYER_ID_ENV: &str = "FRAMETOE_PLAYER_ID";

/// Runtime configuration for a play session.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Opponent strength.
    #[serde(default)]
    difficulty: Difficulty,

    /// Human's marker skin.
    #[serde(default)]
    skin: Skin,

    /// Pause before the opponent replies, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    reply_delay_ms: u64,

    /// Countdown period, in milliseconds.
    #[serde(default = "default_tick_period_ms")]
    tick_period_ms: u64,

    /// Chance that a finished game sends a notification.
    #[serde(default = "default_notify_probability")]
    notify_probability: f64,

    /// Identity outcomes are recorded under.
    #[serde(default)]
    player_id: Option<PlayerId>,

    /// Seed for reproducible opponent play.
    #[serde(default)]
    seed: Option<u64>,
}

fn default_reply_delay_ms() -> u64 {
    500
}

fn default_tick_period_ms() -> u64 {
    1000
}

fn default_notify_probability() -> f64 {
    0.25
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::default(),
            skin: Skin::default(),
            reply_delay_ms: default_reply_delay_ms(),
            tick_period_ms: default_tick_period_ms(),
            notify_probability: default_notify_probability(),
            player_id: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            difficulty = %config.difficulty,
            skin = %config.skin,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Loads from `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses configuration from TOML text and validates it.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.notify_probability) {
            return Err(ConfigError::new(format!(
                "notify_probability must be within 0.0..=1.0, got {}",
                self.notify_probability
            )));
        }
        if self.tick_period_ms == 0 {
            return Err(ConfigError::new("tick_period_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// Overrides the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Overrides the skin.
    pub fn with_skin(mut self, skin: Skin) -> Self {
        self.skin = skin;
        self
    }

    /// Overrides the player identity.
    pub fn with_player_id(mut self, player_id: impl Into<PlayerId>) -> Self {
        self.player_id = Some(player_id.into());
        self
    }

    /// Overrides the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Overrides both timer periods, rejecting a zero tick period.
    pub fn with_timing(
        mut self,
        reply_delay_ms: u64,
        tick_period_ms: u64,
    ) -> Result<Self, ConfigError> {
        self.reply_delay_ms = reply_delay_ms;
        self.tick_period_ms = tick_period_ms;
        self.validate()?;
        Ok(self)
    }

    /// Delay before the opponent's reply.
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Period of the countdown tick.
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    /// The configured identity, falling back to `FRAMETOE_PLAYER_ID`.
    #[instrument(skip(self))]
    pub fn resolved_player_id(&self) -> Option<PlayerId> {
        self.player_id.clone().or_else(|| {
            let from_env = std::env::var(PLAYER_ID_ENV)
                .ok()
                .filter(|id| !id.trim().is_empty());
            if from_env.is_some() {
                debug!("Using player id from environment");
            }
            from_env
        })
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
