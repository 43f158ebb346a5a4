//! The shared program deck.
//!
//! Index 0 is the top of the deck: dealing takes from the front,
//! `populate` appends to the back.
//!
//! ```
//! use roborally::cards::{CardDeck, CardValue};
//!
//! let mut deck = CardDeck::new();
//! deck.populate(CardValue::F1, 2);
//! deck.populate(CardValue::UT, 1);
//!
//! assert_eq!(deck.size(), 3);
//! assert_eq!(deck.to_string(), "F1 F1 UT");
//! ```

use std::collections::VecDeque;

use super::card::{Card, CardId};
use super::value::CardValue;
use crate::core::{GameConfig, GameRng};
use crate::players::Player;

/// An ordered pile of program cards.
#[derive(Clone, Debug, Default)]
pub struct CardDeck {
    cards: VecDeque<Card>,
    next_id: u32,
}

impl CardDeck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and populate the deck described by a config.
    #[must_use]
    pub fn program_deck(config: &GameConfig) -> Self {
        let mut deck = Self::new();
        for entry in &config.deck {
            deck.populate(entry.value, entry.count);
        }
        deck
    }

    /// Add `count` new cards with `value` to the bottom of the deck.
    pub fn populate(&mut self, value: CardValue, count: usize) {
        for _ in 0..count {
            let card = Card::new(CardId::new(self.next_id), value);
            self.next_id += 1;
            self.cards.push_back(card);
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// The card at `index` from the top.
    #[must_use]
    pub fn card(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn card_value_at(&self, index: usize) -> Option<CardValue> {
        self.cards.get(index).map(|card| card.value)
    }

    /// Iterate from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Shuffle the whole deck.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.cards.make_contiguous());
    }

    /// Remove and return the top card.
    pub fn take_top(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Put a card on top of the deck.
    pub fn add_to_top(&mut self, card: Card) {
        self.cards.push_front(card);
    }

    /// Put a card at the bottom of the deck.
    pub fn add_to_bottom(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Move the top card into a player's hand.
    ///
    /// Returns the dealt card's id, or `None` if the deck is empty.
    pub fn deal_card(&mut self, player: &mut Player) -> Option<CardId> {
        let card = self.take_top()?;
        player.receive(card);
        Some(card.id)
    }

    /// Deal up to `count` cards; returns how many were dealt.
    pub fn deal_cards(&mut self, player: &mut Player, count: usize) -> usize {
        (0..count)
            .take_while(|_| self.deal_card(player).is_some())
            .count()
    }
}

impl std::fmt::Display for CardDeck {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Location;
    use crate::core::PlayerId;

    fn player() -> Player {
        Player::programmed(PlayerId::new(0), Location::new(0, 0))
    }

    #[test]
    fn test_populate_assigns_unique_ids() {
        let mut deck = CardDeck::new();
        deck.populate(CardValue::F1, 3);
        deck.populate(CardValue::RR, 3);

        let mut ids: Vec<_> = deck.iter().map(|c| c.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
        assert_eq!(deck.card_value_at(3), Some(CardValue::RR));
    }

    #[test]
    fn test_top_and_bottom() {
        let mut deck = CardDeck::new();
        deck.populate(CardValue::F1, 1);
        let mut extra = CardDeck::new();
        extra.populate(CardValue::UT, 2);

        let top = extra.take_top().unwrap();
        let bottom = extra.take_top().unwrap();
        deck.add_to_top(top);
        deck.add_to_bottom(bottom);

        assert_eq!(deck.to_string(), "UT F1 UT");
        assert!(extra.is_empty());
    }

    #[test]
    fn test_deal_cards_stops_when_empty() {
        let mut deck = CardDeck::new();
        deck.populate(CardValue::F2, 2);
        let mut player = player();

        assert_eq!(deck.deal_cards(&mut player, 5), 2);
        assert_eq!(player.hand_size(), 2);
        assert_eq!(deck.deal_card(&mut player), None);
    }

    #[test]
    fn test_program_deck_from_config() {
        let deck = CardDeck::program_deck(&GameConfig::default());

        assert_eq!(deck.size(), 84);
        assert_eq!(deck.card_value_at(0), Some(CardValue::F1));
        assert_eq!(deck.card_value_at(83), Some(CardValue::UT));
    }
}
