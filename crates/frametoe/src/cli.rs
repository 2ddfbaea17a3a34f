//! Command-line interface for frametoe.

use clap::{Parser, Subcommand};
use frametoe_engine::{Difficulty, Skin};
use std::path::PathBuf;

/// frametoe - three in a row against the computer, against the clock
#[derive(Parser, Debug)]
#[command(name = "frametoe")]
#[command(about = "Three-in-a-row against a computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive game in the terminal
    Play {
        /// Path to the game config file
        #[arg(short, long, default_value = "frametoe.toml")]
        config: PathBuf,

        /// Opponent strength (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Marker skin (see `frametoe skins`)
        #[arg(short, long)]
        skin: Option<Skin>,

        /// Identity to record results under
        #[arg(long)]
        player_id: Option<String>,

        /// Seed for reproducible opponent play
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Pit the opponent against a random player and print the tally
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "1000")]
        games: u32,

        /// Opponent strength (easy, medium, hard)
        #[arg(short, long, default_value = "medium")]
        difficulty: Difficulty,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the marker skins
    Skins,
}
