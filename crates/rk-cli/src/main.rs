//! CLI frontend for Rollkeeper, a tabletop dice roller and encounter director.

mod commands;
mod render;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "rk",
    about = "Rollkeeper: dice, stat checks, and luck-aware encounters for tabletop play",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding data.json, character.json, and session_history.json
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// RNG seed for reproducible rolls
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (creates a character if none is saved)
    Play,

    /// Create a new character, replacing any saved one
    Create,

    /// Roll dice, e.g. `rk roll 2d6+3 adv`
    Roll {
        /// Dice notation: <count>d<sides>[+|-<modifier>] [adv|dis]
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        notation: Vec<String>,
    },

    /// Roll 1d20 plus a stat modifier
    Check {
        /// Stat key: STR, DEX, CON, INT, WIS, or CHA
        stat: String,
    },

    /// Resolve an encounter
    Encounter {
        /// Location from the encounter table
        location: String,

        /// Difficulty: easy, normal, or hard
        difficulty: String,
    },

    /// Roll initiative for a list of participants
    Initiative {
        /// Participant names, separated by spaces or commas
        #[arg(required = true, num_args = 1..)]
        names: Vec<String>,
    },

    /// Show the session summary
    Summary,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let dir = cli.dir.as_path();
    let seed = cli.seed;
    let result = match cli.command {
        Commands::Play => commands::play::run(dir, seed),
        Commands::Create => commands::create::run(dir, seed),
        Commands::Roll { notation } => commands::roll::run(dir, seed, &notation.join(" ")),
        Commands::Check { stat } => commands::check::run(dir, seed, &stat),
        Commands::Encounter {
            location,
            difficulty,
        } => commands::encounter::run(dir, seed, &location, &difficulty),
        Commands::Initiative { names } => commands::initiative::run(dir, seed, &names),
        Commands::Summary => commands::summary::run(dir, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
