//! Robots and their program registers.
//!
//! A robot on its own knows nothing about the board: `move_forward` and
//! friends are raw coordinate changes. Board rules (edges, holes) are applied
//! by [`crate::board::resolve`] when the game executes a register.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{Direction, Location};
use crate::cards::{Card, CardAction};

/// The program loaded into a robot for the current round, executed front to back.
///
/// SmallVec keeps the usual five cards inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Register {
    cards: SmallVec<[Card; 5]>,
}

impl Register {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards: SmallVec::from_vec(cards),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Remove the next card.
    pub fn take_next(&mut self) -> Option<Card> {
        if self.cards.is_empty() {
            None
        } else {
            Some(self.cards.remove(0))
        }
    }

    /// Empty the register, returning its cards in order.
    pub fn clear(&mut self) -> Vec<Card> {
        self.cards.drain(..).collect()
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

/// A robot token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    location: Location,
    direction: Direction,
    register: Register,
}

impl Robot {
    /// A robot at `location` facing up with an empty register.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            location,
            direction: Direction::Up,
            register: Register::new(),
        }
    }

    #[must_use]
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = location;
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn move_forward(&mut self, tiles: i32) {
        self.location = self.location.step(self.direction, tiles);
    }

    pub fn move_backward(&mut self, tiles: i32) {
        self.location = self.location.step(self.direction, -tiles);
    }

    /// Turn counter-clockwise `quarter_turns` times.
    pub fn rotate_left(&mut self, quarter_turns: u32) {
        for _ in 0..quarter_turns % 4 {
            self.direction = self.direction.rotate_left();
        }
    }

    /// Turn clockwise `quarter_turns` times.
    pub fn rotate_right(&mut self, quarter_turns: u32) {
        for _ in 0..quarter_turns % 4 {
            self.direction = self.direction.rotate_right();
        }
    }

    pub fn u_turn(&mut self) {
        self.direction = self.direction.u_turn();
    }

    /// Apply a card action with no board rules.
    pub fn apply(&mut self, action: CardAction) {
        match action {
            CardAction::Move(tiles) => self.move_forward(tiles),
            CardAction::Rotate(rotation) => self.direction = self.direction.rotated(rotation),
        }
    }

    /// Replace the program, returning the cards it held.
    pub fn update_register(&mut self, cards: Vec<Card>) -> Vec<Card> {
        let previous = self.register.clear();
        self.register = Register::from_cards(cards);
        previous
    }

    #[must_use]
    pub fn register(&self) -> &Register {
        &self.register
    }

    #[must_use]
    pub fn register_size(&self) -> usize {
        self.register.len()
    }

    /// Remove the next card without executing it.
    pub fn take_next(&mut self) -> Option<Card> {
        self.register.take_next()
    }

    /// Execute the next card with no board rules and return it.
    pub fn execute_next(&mut self) -> Option<Card> {
        let card = self.register.take_next()?;
        self.apply(card.value.action());
        Some(card)
    }

    /// Empty the register.
    pub fn clear_register(&mut self) -> Vec<Card> {
        self.register.clear()
    }
}
