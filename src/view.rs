//! A render-ready snapshot of the board.
//!
//! `BoardView` flattens a `Game` into rows of cells, top row first, so a
//! front end only has to draw glyphs. Each robot shows which way it faces,
//! or a won/died sprite.
//!
//! ```
//! use roborally::{Game, GameConfig};
//! use roborally::view::BoardView;
//!
//! let game = Game::new(GameConfig::default()).unwrap();
//! let view = BoardView::from_game(&game);
//!
//! assert_eq!(view.rows().len(), 12);
//! // Player 1 starts in the bottom-left corner facing up.
//! assert_eq!(view.lines().last().unwrap().chars().next(), Some('^'));
//! ```

use crate::board::{Direction, Location, Tile};
use crate::core::PlayerId;
use crate::game::Game;

/// How a robot is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RobotSprite {
    Facing(Direction),
    Won,
    Died,
}

impl RobotSprite {
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            RobotSprite::Facing(Direction::Up) => '^',
            RobotSprite::Facing(Direction::Right) => '>',
            RobotSprite::Facing(Direction::Down) => 'v',
            RobotSprite::Facing(Direction::Left) => '<',
            RobotSprite::Won => '*',
            RobotSprite::Died => 'x',
        }
    }
}

/// One board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub tile: Tile,
    pub robot: Option<(PlayerId, RobotSprite)>,
}

impl Cell {
    /// The robot glyph if one stands here, otherwise the tile's.
    #[must_use]
    pub fn glyph(&self) -> char {
        match self.robot {
            Some((_, sprite)) => sprite.glyph(),
            None => tile_glyph(self.tile),
        }
    }
}

/// `.` floor, `O` hole, flag number for flags.
#[must_use]
pub fn tile_glyph(tile: Tile) -> char {
    match tile {
        Tile::Floor => '.',
        Tile::Hole => 'O',
        Tile::Flag(number) => char::from_digit(u32::from(number), 36).unwrap_or('F'),
    }
}

/// The board as rows of cells, top row first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    rows: Vec<Vec<Cell>>,
}

impl BoardView {
    #[must_use]
    pub fn from_game(game: &Game) -> Self {
        let board = game.board();
        let (width, height) = game.map_size();

        let mut rows: Vec<Vec<Cell>> = (0..height)
            .rev()
            .map(|y| {
                (0..width)
                    .map(|x| Cell {
                        tile: board.tile_at(Location::new(x, y)),
                        robot: None,
                    })
                    .collect()
            })
            .collect();

        // Back of the queue first so the active robot is drawn on top.
        let players: Vec<_> = game.players().collect();
        for player in players.into_iter().rev() {
            let location = player.robot().location();
            if !board.contains(location) {
                continue;
            }
            let sprite = if game.winner() == Some(player.id()) {
                RobotSprite::Won
            } else if player.is_destroyed() {
                RobotSprite::Died
            } else {
                RobotSprite::Facing(player.robot().direction())
            };
            let row = (height - 1 - location.y) as usize;
            rows[row][location.x as usize].robot = Some((player.id(), sprite));
        }

        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// One string per row.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| row.iter().map(Cell::glyph).collect())
            .collect()
    }
}

impl std::fmt::Display for BoardView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
