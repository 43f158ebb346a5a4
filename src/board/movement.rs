//! Board-aware robot motion.
//!
//! Movement is resolved one tile at a time. A step that would leave the
//! board is not taken and ends the move; a step onto a hole is taken and the
//! robot falls.

use super::location::{Direction, Location};
use super::map::Board;
use crate::cards::CardAction;

/// Where a robot ends up after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Motion {
    pub location: Location,
    pub direction: Direction,
    /// Tiles actually travelled.
    pub travelled: u32,
    /// The robot stepped onto a hole.
    pub fell: bool,
}

impl Motion {
    fn at(location: Location, direction: Direction) -> Self {
        Self {
            location,
            direction,
            travelled: 0,
            fell: false,
        }
    }
}

/// Resolve a card action for a robot at `location` facing `direction`.
///
/// ```
/// use roborally::board::{resolve, Board, Direction, Location};
/// use roborally::cards::CardAction;
///
/// let board = Board::new(4, 4);
/// let motion = resolve(&board, Location::new(0, 2), Direction::Up, CardAction::Move(3));
///
/// // Stopped at the top edge.
/// assert_eq!(motion.location, Location::new(0, 3));
/// assert_eq!(motion.travelled, 1);
/// assert!(!motion.fell);
/// ```
#[must_use]
pub fn resolve(board: &Board, location: Location, direction: Direction, action: CardAction) -> Motion {
    match action {
        CardAction::Rotate(rotation) => Motion::at(location, direction.rotated(rotation)),
        CardAction::Move(tiles) => {
            let heading = if tiles < 0 { direction.u_turn() } else { direction };
            let mut motion = Motion::at(location, direction);

            for _ in 0..tiles.unsigned_abs() {
                let next = motion.location.step(heading, 1);
                if !board.contains(next) {
                    break;
                }
                motion.location = next;
                motion.travelled += 1;
                if board.is_hole(next) {
                    motion.fell = true;
                    break;
                }
            }
            motion
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Rotation;

    #[test]
    fn test_rotation_does_not_move() {
        let board = Board::new(3, 3);
        let motion = resolve(
            &board,
            Location::new(1, 1),
            Direction::Up,
            CardAction::Rotate(Rotation::Right),
        );

        assert_eq!(motion.location, Location::new(1, 1));
        assert_eq!(motion.direction, Direction::Right);
        assert_eq!(motion.travelled, 0);
    }

    #[test]
    fn test_backward_keeps_facing() {
        let board = Board::new(3, 3);
        let motion = resolve(&board, Location::new(1, 1), Direction::Right, CardAction::Move(-1));

        assert_eq!(motion.location, Location::new(0, 1));
        assert_eq!(motion.direction, Direction::Right);
    }

    #[test]
    fn test_fall_stops_movement() {
        let board = Board::new(5, 5).with_hole(Location::new(0, 2));
        let motion = resolve(&board, Location::new(0, 0), Direction::Up, CardAction::Move(3));

        assert!(motion.fell);
        assert_eq!(motion.location, Location::new(0, 2));
        assert_eq!(motion.travelled, 2);
    }

    #[test]
    fn test_edge_blocks_movement() {
        let board = Board::new(2, 2);
        let motion = resolve(&board, Location::new(0, 0), Direction::Left, CardAction::Move(1));

        assert_eq!(motion.location, Location::new(0, 0));
        assert_eq!(motion.travelled, 0);
        assert!(!motion.fell);
    }
}
