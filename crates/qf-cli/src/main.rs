//! Terminal front-end for the Quickfire quiz engine.
//!
//! Acts as the presentation sink: renders questions and reveals,
//! drives the session clock from a one-second key poll, and plays the
//! completion cue line for the finishing rank tier.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use commands::play::PlayOpts;

#[derive(Parser)]
#[command(
    name = "qf",
    about = "Quickfire — timed trivia rounds in the terminal",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available categories and their question counts
    Categories {
        /// Directory containing category JSON files
        #[arg(short, long, default_value = "data")]
        data: PathBuf,
    },

    /// Play a timed round
    Play(PlayOpts),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Categories { data } => commands::categories::run(&data),
        Commands::Play(opts) => commands::play::run(&opts),
    };

    if let Err(message) = result {
        eprintln!("error: {message}");
        process::exit(1);
    }
}
