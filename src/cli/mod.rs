//! CLI command implementations.

pub(crate) mod headless;
pub(crate) mod logging;
pub(crate) mod tui;

use anyhow::Context;
use clap::{Args, ValueEnum};
use std::path::PathBuf;

use roborally::{Board, Game, GameBuilder, GameConfig, ProgrammerKind};

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// One JSON event per line.
    Json,
}

/// Register programmer for robots not driven by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProgrammerArg {
    InOrder,
    Random,
    FlagSeeker,
}

impl From<ProgrammerArg> for ProgrammerKind {
    fn from(arg: ProgrammerArg) -> Self {
        match arg {
            ProgrammerArg::InOrder => ProgrammerKind::InOrder,
            ProgrammerArg::Random => ProgrammerKind::Random,
            ProgrammerArg::FlagSeeker => ProgrammerKind::FlagSeeker,
        }
    }
}

/// Options shared by every command that sets up a game.
#[derive(Args, Debug)]
pub(crate) struct GameArgs {
    /// Game config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tiled map exported as JSON (default: built-in board)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Number of robots (1-8)
    #[arg(short, long)]
    players: Option<usize>,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Drive player 1 with the arrow keys
    #[arg(long)]
    manual: bool,

    /// Ticks between register executions
    #[arg(short, long)]
    ticks: Option<u64>,

    /// Register programmer
    #[arg(long)]
    programmer: Option<ProgrammerArg>,
}

impl GameArgs {
    /// The config file with command-line overrides applied.
    pub(crate) fn config(&self) -> anyhow::Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(players) = self.players {
            config = config.with_players(players);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(ticks) = self.ticks {
            config = config.with_ticks_per_step(ticks);
        }
        if let Some(programmer) = self.programmer {
            config = config.with_programmer(programmer.into());
        }
        if self.manual {
            config = config.with_manual(true);
        }
        Ok(config)
    }

    pub(crate) fn build_game(&self) -> anyhow::Result<Game> {
        let config = self.config()?;
        let mut builder = GameBuilder::new(config);
        if let Some(path) = &self.map {
            let board = Board::load(path).with_context(|| format!("loading map {}", path.display()))?;
            builder = builder.board(board);
        }
        Ok(builder.build()?)
    }
}
