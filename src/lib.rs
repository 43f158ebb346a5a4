//! # roborally
//!
//! A RoboRally board game engine: robots programmed with movement cards race
//! across a board full of holes to reach numbered flags in order.
//!
//! ## Design
//!
//! 1. **Host-driven loop**: the engine never sleeps or reads the clock. The
//!    host calls [`Game::tick`] once per frame and draws the result.
//!
//! 2. **Deterministic**: every random choice comes from a seeded ChaCha
//!    stream, so a config and seed replay the same game.
//!
//! 3. **Events out**: every state change is reported as a [`RallyEvent`],
//!    returned from `tick` and kept in the game history.
//!
//! ## Modules
//!
//! - `core`: players, RNG, configuration
//! - `board`: coordinates, tiles, map loading, movement rules
//! - `cards`: program cards and the shared deck
//! - `players`: players, robots, register programmers
//! - `game`: rounds, flags, win detection, keyboard input
//! - `view`: render-ready board snapshot
//!
//! ## Example
//!
//! ```
//! use roborally::{Game, GameConfig};
//!
//! let mut game = Game::new(GameConfig::default().with_ticks_per_step(1)).unwrap();
//! let events = game.tick().unwrap();
//!
//! assert_eq!(game.round(), 1);
//! assert!(!events.is_empty());
//! ```

pub mod board;
pub mod cards;
pub mod core;
pub mod error;
pub mod game;
pub mod players;
pub mod view;

pub use crate::core::{DeckEntry, GameConfig, GameRng, PlayerId, ProgrammerKind, RngStream, MAX_PLAYERS};

pub use crate::board::{Board, Direction, Location, Rotation, Tile};

pub use crate::cards::{Card, CardAction, CardDeck, CardId, CardValue};

pub use crate::players::{Player, PlayerKind, Programmer, Robot};

pub use crate::game::{Flag, Game, GameBuilder, Key, PlayerStats, RallyEvent};

pub use crate::error::{RallyError, Result};

pub use crate::view::BoardView;
