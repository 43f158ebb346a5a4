//! Grid coordinates and facing.
//!
//! The origin is the bottom-left tile and `y` grows upward, so a robot
//! facing `Up` moves toward larger `y`.

use serde::{Deserialize, Serialize};

/// A tile coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The location `tiles` steps away in `direction`. Negative counts step backward.
    ///
    /// ```
    /// use roborally::board::{Direction, Location};
    ///
    /// let start = Location::new(2, 2);
    /// assert_eq!(start.step(Direction::Up, 3), Location::new(2, 5));
    /// assert_eq!(start.step(Direction::Right, -1), Location::new(1, 2));
    /// ```
    #[must_use]
    pub const fn step(self, direction: Direction, tiles: i32) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx * tiles, self.y + dy * tiles)
    }

    /// Manhattan distance between two tiles.
    #[must_use]
    pub const fn distance(self, other: Location) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Robot facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise order starting from `Up`.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// One quarter turn clockwise.
    #[must_use]
    pub const fn rotate_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// One quarter turn counter-clockwise.
    #[must_use]
    pub const fn rotate_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    #[must_use]
    pub const fn u_turn(self) -> Self {
        self.rotate_right().rotate_right()
    }

    /// Apply a card rotation.
    #[must_use]
    pub const fn rotated(self, rotation: Rotation) -> Self {
        match rotation {
            Rotation::Left => self.rotate_left(),
            Rotation::Right => self.rotate_right(),
            Rotation::UTurn => self.u_turn(),
        }
    }

    /// Unit step `(dx, dy)` for this facing.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Right => (1, 0),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
        }
    }
}

/// A turn in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rotation {
    Left,
    Right,
    UTurn,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_right_cycle() {
        let mut dir = Direction::Up;
        let mut seen = Vec::new();
        for _ in 0..4 {
            seen.push(dir);
            dir = dir.rotate_right();
        }

        assert_eq!(seen, Direction::ALL.to_vec());
        assert_eq!(dir, Direction::Up);
    }

    #[test]
    fn test_left_undoes_right() {
        for dir in Direction::ALL {
            assert_eq!(dir.rotate_right().rotate_left(), dir);
        }
    }

    #[test]
    fn test_u_turn() {
        assert_eq!(Direction::Up.u_turn(), Direction::Down);
        assert_eq!(Direction::Left.u_turn(), Direction::Right);
        assert_eq!(Direction::Right.rotated(Rotation::UTurn), Direction::Left);
    }

    #[test]
    fn test_step_and_distance() {
        let origin = Location::new(0, 0);
        let target = origin.step(Direction::Up, 2).step(Direction::Right, 3);

        assert_eq!(target, Location::new(3, 2));
        assert_eq!(origin.distance(target), 5);
        assert_eq!(target.to_string(), "(3, 2)");
    }
}
