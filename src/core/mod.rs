//! Core engine types: players, RNG, configuration.

pub mod config;
pub mod player;
pub mod rng;

pub use config::{DeckEntry, GameConfig, ProgrammerKind, MAX_PLAYERS};
pub use player::PlayerId;
pub use rng::{GameRng, RngStream};
