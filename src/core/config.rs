//! Game configuration.
//!
//! Everything that shapes a game but is not part of the board itself:
//! player count, hand and register sizes, tick pacing, seed and the program
//! deck composition. Loaded from TOML; every field has a default so a config
//! file only needs the values it changes.
//!
//! ```
//! use roborally::core::GameConfig;
//!
//! let config = GameConfig::from_toml_str("player_count = 2\nseed = 7").unwrap();
//! assert_eq!(config.player_count, 2);
//! assert_eq!(config.hand_size, 9);
//! assert_eq!(config.deck_size(), 84);
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::board::Location;
use crate::cards::CardValue;
use crate::error::{RallyError, Result};

/// Maximum number of robots on a board.
pub const MAX_PLAYERS: usize = 8;

/// How many cards of one value go into the program deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub value: CardValue,
    pub count: usize,
}

impl DeckEntry {
    #[must_use]
    pub const fn new(value: CardValue, count: usize) -> Self {
        Self { value, count }
    }
}

/// Which programmer chooses registers for robots that are not driven by hand.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProgrammerKind {
    /// First cards of the hand, in dealt order.
    InOrder,
    /// Uniformly random cards from the hand.
    Random,
    /// Greedy search toward the next flag.
    #[default]
    FlagSeeker,
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of robots (1-8).
    pub player_count: usize,

    /// Width of the built-in board (ignored when a map file is loaded).
    pub board_width: i32,

    /// Height of the built-in board (ignored when a map file is loaded).
    pub board_height: i32,

    /// Cards dealt to the active player at the start of a round.
    pub hand_size: usize,

    /// Cards picked from the hand into the robot's register.
    pub register_size: usize,

    /// Host-loop ticks between two register executions.
    pub ticks_per_step: u64,

    /// Seed for every random stream in the game.
    pub seed: u64,

    /// Player 1 is driven from the keyboard instead of by program cards.
    pub manual: bool,

    /// Register selection for programmed robots.
    pub programmer: ProgrammerKind,

    /// Program deck composition, in populate order.
    pub deck: Vec<DeckEntry>,

    /// Start tiles, one per player. Player i starts at (i, 0) when absent.
    pub start_locations: Option<Vec<Location>>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 1,
            board_width: 12,
            board_height: 12,
            hand_size: 9,
            register_size: 5,
            ticks_per_step: 60,
            seed: 42,
            manual: false,
            programmer: ProgrammerKind::default(),
            deck: Self::standard_deck(),
            start_locations: None,
        }
    }
}

impl GameConfig {
    /// The 84-card program deck.
    #[must_use]
    pub fn standard_deck() -> Vec<DeckEntry> {
        vec![
            DeckEntry::new(CardValue::F1, 18),
            DeckEntry::new(CardValue::F2, 12),
            DeckEntry::new(CardValue::F3, 6),
            DeckEntry::new(CardValue::B1, 6),
            DeckEntry::new(CardValue::RR, 18),
            DeckEntry::new(CardValue::RL, 18),
            DeckEntry::new(CardValue::UT, 6),
        ]
    }

    /// Parse a config from TOML and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| RallyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Set the player count.
    #[must_use]
    pub fn with_players(mut self, player_count: usize) -> Self {
        self.player_count = player_count;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the ticks between register executions.
    #[must_use]
    pub fn with_ticks_per_step(mut self, ticks: u64) -> Self {
        self.ticks_per_step = ticks;
        self
    }

    /// Set the register programmer.
    #[must_use]
    pub fn with_programmer(mut self, programmer: ProgrammerKind) -> Self {
        self.programmer = programmer;
        self
    }

    /// Drive player 1 from the keyboard.
    #[must_use]
    pub fn with_manual(mut self, manual: bool) -> Self {
        self.manual = manual;
        self
    }

    /// Total cards in the configured deck.
    #[must_use]
    pub fn deck_size(&self) -> usize {
        self.deck.iter().map(|entry| entry.count).sum()
    }

    /// Cards out of the deck while the active player holds a full hand:
    /// every other player keeps the rest of their last hand.
    #[must_use]
    pub fn cards_needed(&self) -> usize {
        let leftover = self.hand_size.saturating_sub(self.register_size);
        self.hand_size + self.player_count.saturating_sub(1) * leftover
    }

    /// Start tile for the player at `index`.
    #[must_use]
    pub fn start_location(&self, index: usize) -> Location {
        self.start_locations
            .as_ref()
            .and_then(|starts| starts.get(index).copied())
            .unwrap_or(Location::new(index as i32, 0))
    }

    /// Check the config is playable.
    pub fn validate(&self) -> Result<()> {
        if self.player_count == 0 || self.player_count > MAX_PLAYERS {
            return Err(RallyError::InvalidConfig(format!(
                "player_count must be 1-{MAX_PLAYERS}, got {}",
                self.player_count
            )));
        }
        if self.board_width <= 0 || self.board_height <= 0 {
            return Err(RallyError::InvalidConfig(format!(
                "board must not be empty, got {}x{}",
                self.board_width, self.board_height
            )));
        }
        if self.register_size == 0 {
            return Err(RallyError::InvalidConfig("register_size must be at least 1".into()));
        }
        if self.register_size > self.hand_size {
            return Err(RallyError::InvalidConfig(format!(
                "register_size ({}) cannot exceed hand_size ({})",
                self.register_size, self.hand_size
            )));
        }
        if self.cards_needed() > self.deck_size() {
            return Err(RallyError::InvalidConfig(format!(
                "{} players with hand_size {} need {} cards, the deck has {}",
                self.player_count,
                self.hand_size,
                self.cards_needed(),
                self.deck_size()
            )));
        }
        if self.ticks_per_step == 0 {
            return Err(RallyError::InvalidConfig("ticks_per_step must be at least 1".into()));
        }
        if let Some(starts) = &self.start_locations {
            if starts.len() < self.player_count {
                return Err(RallyError::InvalidConfig(format!(
                    "{} start locations for {} players",
                    starts.len(),
                    self.player_count
                )));
            }
        }
        Ok(())
    }
}
