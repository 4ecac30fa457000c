//! Command-line interface for the arena
//!
//! Flags override the values loaded from the settings file.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::replay::PlaybackSpeed;
use crate::settings::DEFAULT_SETTINGS_PATH;

/// Battle simulator for developer-profile fighter cards
#[derive(Parser, Debug)]
#[command(name = "devcard-arena")]
#[command(about = "Battle simulator for developer-profile fighter cards")]
#[command(version)]
pub struct Args {
    /// Settings file (RON)
    #[arg(long, value_name = "SETTINGS_FILE", default_value = DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a battle between two fighters and play it back
    Battle(BattleArgs),

    /// Show the leaderboard built from stored battles
    Leaderboard {
        /// Result store (JSON lines)
        #[arg(long, value_name = "STORE_FILE")]
        store: Option<PathBuf>,

        /// Number of entries to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Check a ruleset file (JSON or RON) without running a battle
    Validate {
        #[arg(long, value_name = "GAME_DATA_FILE")]
        game_data: PathBuf,
    },

    /// Show one fighter's record and recent battles
    Player {
        /// Login of the fighter
        #[arg(long)]
        login: String,

        /// Result store (JSON lines)
        #[arg(long, value_name = "STORE_FILE")]
        store: Option<PathBuf>,
    },

    /// List the fighters in a roster snapshot
    Roster {
        #[arg(long, value_name = "SNAPSHOT_FILE")]
        snapshot: Option<PathBuf>,
    },
}

#[derive(clap::Args, Debug)]
pub struct BattleArgs {
    /// Login of the challenging fighter
    #[arg(long)]
    pub challenger: String,

    /// Login of the defending fighter
    #[arg(long)]
    pub opponent: String,

    /// Roster snapshot to read fighters (and the ruleset) from
    #[arg(long, value_name = "SNAPSHOT_FILE")]
    pub snapshot: Option<PathBuf>,

    /// Ruleset file, overriding the one in the snapshot
    #[arg(long, value_name = "GAME_DATA_FILE")]
    pub game_data: Option<PathBuf>,

    /// Seed for a reproducible battle
    #[arg(long)]
    pub seed: Option<u64>,

    /// Playback speed: instant, half, normal, double, triple, or events per second
    #[arg(long, value_name = "SPEED")]
    pub speed: Option<PlaybackSpeed>,

    /// Write the full battle result as JSON
    #[arg(long, value_name = "OUTPUT_PATH")]
    pub output: Option<PathBuf>,

    /// Do not save the result to the store
    #[arg(long)]
    pub no_store: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
