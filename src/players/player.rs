//! Players: a hand of cards, a robot and flag progress.

use serde::{Deserialize, Serialize};

use super::programmer::{ProgramContext, Programmer};
use super::robot::Robot;
use crate::board::{Board, Location};
use crate::cards::{Card, CardDeck};
use crate::core::PlayerId;
use crate::error::{RallyError, Result};
use crate::game::Flag;

/// How a player's robot is controlled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerKind {
    /// Dealt cards each round and driven by its register.
    #[default]
    Programmed,
    /// Driven directly from the keyboard; never dealt cards by the game loop.
    Manual,
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    id: PlayerId,
    name: String,
    kind: PlayerKind,
    hand: Vec<Card>,
    robot: Robot,
    visited_flags: Vec<Flag>,
    /// Where the robot respawns after being destroyed.
    archive: Location,
    destroyed: bool,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, kind: PlayerKind, start: Location) -> Self {
        Self {
            id,
            name: id.to_string(),
            kind,
            hand: Vec::new(),
            robot: Robot::new(start),
            visited_flags: Vec::new(),
            archive: start,
            destroyed: false,
        }
    }

    #[must_use]
    pub fn programmed(id: PlayerId, start: Location) -> Self {
        Self::new(id, PlayerKind::Programmed, start)
    }

    #[must_use]
    pub fn manual(id: PlayerId, start: Location) -> Self {
        Self::new(id, PlayerKind::Manual, start)
    }

    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    #[must_use]
    pub fn is_manual(&self) -> bool {
        self.kind == PlayerKind::Manual
    }

    #[must_use]
    pub fn robot(&self) -> &Robot {
        &self.robot
    }

    pub fn robot_mut(&mut self) -> &mut Robot {
        &mut self.robot
    }

    // === Hand ===

    #[must_use]
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand.len()
    }

    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.hand.get(index)
    }

    /// Add a dealt card to the hand.
    pub fn receive(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Return hand card `index` to the top of `deck`.
    pub fn put_in_deck(&mut self, index: usize, deck: &mut CardDeck) -> Result<Card> {
        if index >= self.hand.len() {
            return Err(RallyError::HandIndex {
                index,
                size: self.hand.len(),
            });
        }
        let card = self.hand.remove(index);
        deck.add_to_top(card);
        Ok(card)
    }

    /// Return the whole hand to the bottom of `deck`.
    pub fn discard_hand(&mut self, deck: &mut CardDeck) -> usize {
        let count = self.hand.len();
        for card in self.hand.drain(..) {
            deck.add_to_bottom(card);
        }
        count
    }

    /// Remove `count` cards from the hand as chosen by `programmer`.
    ///
    /// Invalid or repeated picks are skipped; if the programmer returns too
    /// few cards the rest are taken in hand order.
    pub fn pick_cards(
        &mut self,
        count: usize,
        programmer: &mut dyn Programmer,
        board: &Board,
        target: Option<Location>,
    ) -> Vec<Card> {
        let count = count.min(self.hand.len());
        let ctx = ProgramContext {
            hand: &self.hand,
            location: self.robot.location(),
            direction: self.robot.direction(),
            board,
            target,
        };

        let mut chosen: Vec<usize> = Vec::with_capacity(count);
        for index in programmer.choose(&ctx, count) {
            if chosen.len() == count {
                break;
            }
            if index < self.hand.len() && !chosen.contains(&index) {
                chosen.push(index);
            }
        }
        for index in 0..self.hand.len() {
            if chosen.len() == count {
                break;
            }
            if !chosen.contains(&index) {
                chosen.push(index);
            }
        }

        let picked: Vec<Card> = chosen.iter().map(|&index| self.hand[index]).collect();
        let mut position = 0;
        self.hand.retain(|_| {
            let keep = !chosen.contains(&position);
            position += 1;
            keep
        });
        picked
    }

    // === Flags and respawning ===

    #[must_use]
    pub fn visited_flags(&self) -> &[Flag] {
        &self.visited_flags
    }

    /// Record a flag and make it the respawn point.
    pub fn add_visited_flag(&mut self, flag: Flag) {
        self.archive = flag.location;
        self.visited_flags.push(flag);
    }

    #[must_use]
    pub fn archive(&self) -> Location {
        self.archive
    }

    /// The robot was destroyed since it last moved.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Destroy the robot: it loses its program and returns to the archive
    /// facing up. Returns the register cards it held.
    pub fn destroy_robot(&mut self) -> Vec<Card> {
        self.destroyed = true;
        let program = self.robot.clear_register();
        self.robot.set_location(self.archive);
        self.robot.set_direction(crate::board::Direction::Up);
        program
    }

    /// Clear the destroyed marker once the robot moves again.
    pub fn mark_active(&mut self) {
        self.destroyed = false;
    }
}
