//! The game board: its size, holes and flags.
//!
//! Boards come from a Tiled map exported as JSON (the same map the desktop
//! tileset edits as `.tmx`), or from the built-in standard board.
//!
//! ## Layers
//!
//! - `hole`: any non-empty cell is a hole
//! - `flag`: non-empty cells are flags, numbered by [`flag_number`]
//! - `board` / `player`: artwork only, not read
//!
//! Tiled stores rows top-down; the board's origin is bottom-left, so row `r`
//! of a layer is `y = height - 1 - r`.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use std::path::Path;

use super::location::Location;
use super::tile::{flag_number, tile_id, Tile};
use crate::error::{RallyError, Result};
use crate::game::Flag;

/// A rectangular board with holes and flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    holes: FxHashSet<Location>,
    flags: FxHashMap<Location, u8>,
}

#[derive(Deserialize)]
struct TiledMap {
    width: i32,
    height: i32,
    #[serde(default)]
    layers: Vec<TiledLayer>,
}

#[derive(Deserialize)]
struct TiledLayer {
    name: String,
    #[serde(default)]
    data: Vec<u32>,
}

impl TiledMap {
    fn layer(&self, name: &str) -> Result<&TiledLayer> {
        let layer = self
            .layers
            .iter()
            .find(|layer| layer.name == name)
            .ok_or_else(|| RallyError::MissingLayer(name.to_string()))?;

        let expected = self.cell_count()?;
        if layer.data.len() != expected {
            return Err(RallyError::LayerSize {
                layer: name.to_string(),
                expected,
                actual: layer.data.len(),
            });
        }
        Ok(layer)
    }

    /// Cells per layer.
    fn cell_count(&self) -> Result<usize> {
        let width = usize::try_from(self.width).ok();
        let height = usize::try_from(self.height).ok();
        width
            .zip(height)
            .and_then(|(width, height)| width.checked_mul(height))
            .ok_or_else(|| {
                RallyError::InvalidConfig(format!("map size {}x{} is not representable", self.width, self.height))
            })
    }

    /// Non-empty cells of a layer as (location, gid).
    ///
    /// Layers are checked against `cell_count` first, so every column is
    /// below `width` and every row below `height`.
    fn cells<'a>(&'a self, layer: &'a TiledLayer) -> impl Iterator<Item = (Location, u32)> + 'a {
        layer
            .data
            .iter()
            .enumerate()
            .filter(|(_, &gid)| tile_id(gid) != 0)
            .map(move |(i, &gid)| {
                let width = self.width as usize;
                let column = (i % width) as i32;
                let row = (i / width) as i32;
                (Location::new(column, self.height - 1 - row), gid)
            })
    }
}

impl Board {
    /// An empty floor board.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            holes: FxHashSet::default(),
            flags: FxHashMap::default(),
        }
    }

    /// Add a hole (builder pattern).
    #[must_use]
    pub fn with_hole(mut self, location: Location) -> Self {
        self.flags.remove(&location);
        self.holes.insert(location);
        self
    }

    /// Add a flag (builder pattern).
    #[must_use]
    pub fn with_flag(mut self, number: u8, location: Location) -> Self {
        self.holes.remove(&location);
        self.flags.insert(location, number);
        self
    }

    /// The built-in board: four flags and a scattering of holes.
    ///
    /// Sized by the config; flags and holes that fall outside a smaller
    /// board are dropped.
    #[must_use]
    pub fn standard(width: i32, height: i32) -> Self {
        let flags = [
            (1, Location::new(5, 3)),
            (2, Location::new(9, 6)),
            (3, Location::new(2, 8)),
            (4, Location::new(10, 10)),
        ];
        let holes = [
            Location::new(0, 11),
            Location::new(3, 5),
            Location::new(4, 5),
            Location::new(7, 2),
            Location::new(8, 8),
            Location::new(6, 10),
            Location::new(10, 4),
        ];

        let mut board = Self::new(width, height);
        for location in holes {
            if board.contains(location) {
                board = board.with_hole(location);
            }
        }
        for (number, location) in flags {
            if board.contains(location) {
                board = board.with_flag(number, location);
            }
        }
        board
    }

    /// Parse a Tiled JSON map.
    pub fn from_tiled_json(json: &str) -> Result<Self> {
        let map: TiledMap = serde_json::from_str(json)?;
        if map.width <= 0 || map.height <= 0 {
            return Err(RallyError::InvalidConfig(format!(
                "map must not be empty, got {}x{}",
                map.width, map.height
            )));
        }

        let mut board = Self::new(map.width, map.height);

        let hole_layer = map.layer("hole")?;
        for (location, _) in map.cells(hole_layer) {
            board.holes.insert(location);
        }

        // A flag drawn over a hole replaces it, as `with_flag` does.
        let flag_layer = map.layer("flag")?;
        for (location, gid) in map.cells(flag_layer) {
            if let Some(number) = flag_number(gid) {
                if board.holes.remove(&location) {
                    tracing::warn!(%location, number, "flag drawn over a hole, dropping the hole");
                }
                board.flags.insert(location, number);
            }
        }

        tracing::debug!(
            width = board.width,
            height = board.height,
            holes = board.holes.len(),
            flags = board.flags.len(),
            "loaded tiled map"
        );
        Ok(board)
    }

    /// Load a Tiled JSON map from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| RallyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_tiled_json(&json)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Check if a location is on the board.
    #[must_use]
    pub fn contains(&self, location: Location) -> bool {
        (0..self.width).contains(&location.x) && (0..self.height).contains(&location.y)
    }

    #[must_use]
    pub fn is_hole(&self, location: Location) -> bool {
        self.holes.contains(&location)
    }

    /// What is on a tile. Off-board locations read as holes.
    #[must_use]
    pub fn tile_at(&self, location: Location) -> Tile {
        if !self.contains(location) || self.is_hole(location) {
            Tile::Hole
        } else if let Some(&number) = self.flags.get(&location) {
            Tile::Flag(number)
        } else {
            Tile::Floor
        }
    }

    /// All flags, in visiting order.
    #[must_use]
    pub fn flags(&self) -> Vec<Flag> {
        let mut flags: Vec<Flag> = self
            .flags
            .iter()
            .map(|(&location, &number)| Flag::new(number, location))
            .collect();
        flags.sort_by_key(|flag| (flag.number, flag.location.y, flag.location.x));
        flags
    }

    /// Error unless `location` is on the board.
    pub fn check_bounds(&self, location: Location) -> Result<()> {
        if self.contains(location) {
            Ok(())
        } else {
            Err(RallyError::OutOfBounds {
                location,
                width: self.width,
                height: self.height,
            })
        }
    }
}
