//! RoboRally CLI - play in the terminal or run games headless.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RoboRally - race programmed robots to the flags
#[derive(Parser, Debug)]
#[command(name = "roborally")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory for log files
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Play in an interactive terminal UI
    Play {
        #[command(flatten)]
        game: cli::GameArgs,

        /// Milliseconds per frame (default: 16, about 60 frames a second)
        #[arg(long, default_value = "16")]
        frame_ms: u64,
    },

    /// Run a game without a UI and print its events
    Run {
        #[command(flatten)]
        game: cli::GameArgs,

        /// Stop after this many ticks if nobody has won
        #[arg(short, long, default_value = "100000")]
        max_ticks: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Only print the result
        #[arg(short, long)]
        quiet: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Play { game, frame_ms } => {
            let _guard = cli::logging::init(&args.log_dir, false)?;
            cli::tui::execute(&game, frame_ms)
        }
        Commands::Run {
            game,
            max_ticks,
            format,
            quiet,
        } => {
            let _guard = cli::logging::init(&args.log_dir, true)?;
            cli::headless::execute(&game, max_ticks, format, quiet)
        }
    }
}
