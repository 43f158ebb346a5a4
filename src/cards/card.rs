//! Physical program cards.
//!
//! Two cards can carry the same value but are never the same card: each one
//! has a `CardId` that is unique within its deck, and dealing, picking and
//! returning move the card itself rather than a copy of its value.

use serde::{Deserialize, Serialize};

use super::value::CardValue;

/// Identifier of one physical card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A program card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub value: CardValue,
}

impl Card {
    #[must_use]
    pub const fn new(id: CardId, value: CardValue) -> Self {
        Self { id, value }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
