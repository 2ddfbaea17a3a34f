//! frametoe - unified CLI
//!
//! Interactive play, headless simulation and skin listing.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use frametoe::{
    ChanceNotifier, Collaborators, GameConfig, GameController, InMemoryResults, StaticIdentity,
    run_interactive, simulate,
};
use frametoe_engine::{Difficulty, Skin};
use std::path::PathBuf;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            difficulty,
            skin,
            player_id,
            seed,
        } => run_play(config, difficulty, skin, player_id, seed).await,
        Command::Simulate {
            games,
            difficulty,
            seed,
            json,
        } => run_simulate(games, difficulty, seed, json),
        Command::Skins => {
            for skin in Skin::iter() {
                println!("{:<8} {}", skin, skin.symbol());
            }
            Ok(())
        }
    }
}

/// Runs an interactive game on stdin/stdout.
#[instrument(skip_all, fields(config_path = %config_path.display()))]
async fn run_play(
    config_path: PathBuf,
    difficulty: Option<Difficulty>,
    skin: Option<Skin>,
    player_id: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let mut config = GameConfig::load_or_default(&config_path)?;
    if let Some(difficulty) = difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(skin) = skin {
        config = config.with_skin(skin);
    }
    if let Some(player_id) = player_id {
        config = config.with_player_id(player_id);
    }
    if let Some(seed) = seed {
        config = config.with_seed(seed);
    }

    let identity = config.resolved_player_id();
    info!(identity = ?identity, "Starting interactive play");

    let results = InMemoryResults::new();
    let collaborators = Collaborators::new(
        Arc::new(StaticIdentity::new(identity.clone())),
        Arc::new(results.clone()),
        Arc::new(ChanceNotifier::new(*config.notify_probability(), *config.seed())),
    );

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let controller = GameController::new(&config, collaborators, event_tx);
    run_interactive(controller, event_rx, *config.difficulty(), *config.skin()).await?;

    if let Some(player) = identity.as_deref().and_then(|id| results.stats(id)) {
        let stats = player.overall();
        println!(
            "Games: {}  Wins: {}  Losses: {}  Draws: {}  Timeouts: {}  Win rate: {:.1}%",
            stats.total_games(),
            stats.wins(),
            stats.losses(),
            stats.draws(),
            stats.timeouts(),
            stats.win_rate()
        );
    }
    Ok(())
}

/// Runs headless games and prints the tally.
#[instrument]
fn run_simulate(games: u32, difficulty: Difficulty, seed: Option<u64>, json: bool) -> Result<()> {
    let report = simulate(games, difficulty, seed)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} ({})", report, difficulty);
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,frametoe=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
