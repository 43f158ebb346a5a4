//! Error types for the game engine.

use std::path::PathBuf;

use thiserror::Error;

use crate::board::Location;
use crate::core::PlayerId;

/// Errors raised while loading a game or applying an operation to it.
#[derive(Debug, Error)]
pub enum RallyError {
    /// A config or map file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The map file is not a valid Tiled JSON map.
    #[error("invalid map: {0}")]
    MapFormat(#[from] serde_json::Error),

    /// The config file is not valid TOML for `GameConfig`.
    #[error("invalid config file: {0}")]
    ConfigFormat(#[from] toml::de::Error),

    /// The config parsed but cannot be played.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A required tile layer is absent from the map.
    #[error("map has no `{0}` layer")]
    MissingLayer(String),

    /// A tile layer does not cover the map.
    #[error("layer `{layer}` has {actual} cells, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        actual: usize,
    },

    /// The player queue is empty.
    #[error("no active player")]
    NoActivePlayer,

    /// No player with this id is in the game.
    #[error("{0} is not in the game")]
    UnknownPlayer(PlayerId),

    /// A hand index past the end of the hand.
    #[error("hand index {index} out of range (hand has {size} cards)")]
    HandIndex { index: usize, size: usize },

    /// A location outside the board.
    #[error("{location} is outside the {width}x{height} board")]
    OutOfBounds {
        location: Location,
        width: i32,
        height: i32,
    },
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, RallyError>;
