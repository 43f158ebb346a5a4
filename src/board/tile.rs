//! Tile kinds and the Tiled tile ids that encode them.

use serde::{Deserialize, Serialize};

/// What occupies a board tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Floor,
    /// Robots that end a step here are destroyed.
    Hole,
    /// Checkpoint flag with its visiting order.
    Flag(u8),
}

/// Tiled gid bits used for flipped/rotated tiles.
const GID_FLIP_MASK: u32 = 0xE000_0000;

/// Strip Tiled's flip flags from a global tile id.
#[must_use]
pub const fn tile_id(gid: u32) -> u32 {
    gid & !GID_FLIP_MASK
}

/// Flag number for a tile id on the flag layer.
///
/// The stock tileset draws flags 1-4 at ids 55, 63, 71 and 79. Any other id
/// is taken as the flag number itself so hand-made maps can number flags
/// directly.
///
/// ```
/// use roborally::board::tile::flag_number;
///
/// assert_eq!(flag_number(55), Some(1));
/// assert_eq!(flag_number(79), Some(4));
/// assert_eq!(flag_number(0), None);
/// ```
#[must_use]
pub fn flag_number(gid: u32) -> Option<u8> {
    match tile_id(gid) {
        0 => None,
        55 => Some(1),
        63 => Some(2),
        71 => Some(3),
        79 => Some(4),
        other => u8::try_from(other).ok(),
    }
}
