//! Program cards: values, physical cards and the shared deck.
//!
//! ## Key Types
//!
//! - `CardValue`: the instruction on a card (F1, RR, ...)
//! - `Card`: one physical card, identified by `CardId`
//! - `CardDeck`: ordered deck with deal/shuffle/return operations

pub mod card;
pub mod deck;
pub mod value;

pub use card::{Card, CardId};
pub use deck::CardDeck;
pub use value::{CardAction, CardValue};
