//! Board geometry: coordinates, tiles, map loading and movement rules.

pub mod location;
pub mod map;
pub mod movement;
pub mod tile;

pub use location::{Direction, Location, Rotation};
pub use map::Board;
pub use movement::{resolve, Motion};
pub use tile::Tile;
