//! Program deck and hand behaviour.
//!
//! A player is dealt from a freshly populated standard deck, which is laid
//! out F1 x18, F2 x12, F3 x6, B1 x6, RR x18, RL x18, UT x6 from the top.

use roborally::cards::{CardDeck, CardValue};
use roborally::core::{GameConfig, PlayerId};
use roborally::players::Player;
use roborally::{GameRng, Location};

fn setup() -> (CardDeck, Player) {
    let deck = CardDeck::new();
    let player = Player::programmed(PlayerId::new(0), Location::new(0, 0));
    (deck, player)
}

/// An unpopulated deck is empty; populating gives the 84-card deck.
#[test]
fn test_populate_deck() {
    let (mut deck, _) = setup();
    assert_eq!(deck.size(), 0);

    for entry in GameConfig::standard_deck() {
        deck.populate(entry.value, entry.count);
    }
    assert_eq!(deck.size(), 84);
}

/// Dealing moves the top card from the deck to the hand.
#[test]
fn test_deal_card() {
    let mut deck = CardDeck::program_deck(&GameConfig::default());
    let (_, mut player) = setup();

    deck.deal_card(&mut player);

    assert_eq!(deck.size(), 83);
    assert_eq!(player.hand_size(), 1);
    assert_eq!(player.card(0).map(|c| c.value), Some(CardValue::F1));
}

/// The dealt card keeps its identity.
#[test]
fn test_dealt_card_is_same_card() {
    let mut deck = CardDeck::program_deck(&GameConfig::default());
    let (_, mut player) = setup();
    let top = *deck.card(0).unwrap();

    let id = deck.deal_card(&mut player);

    assert_eq!(id, Some(top.id));
    assert_eq!(player.card(0), Some(&top));
}

/// Putting a hand card back places it on top of the deck.
#[test]
fn test_put_card_back_in_deck() {
    let mut deck = CardDeck::program_deck(&GameConfig::default());
    let (_, mut player) = setup();
    deck.deal_cards(&mut player, 9);
    assert_eq!(deck.size(), 75);

    let card = player.put_in_deck(0, &mut deck).unwrap();

    assert_eq!(deck.size(), 76);
    assert_eq!(player.hand_size(), 8);
    assert_eq!(deck.card(0), Some(&card));
}

/// Dealing from a short deck deals what is left.
#[test]
fn test_deal_from_short_deck() {
    let mut deck = CardDeck::new();
    deck.populate(CardValue::UT, 3);
    let (_, mut player) = setup();

    assert_eq!(deck.deal_cards(&mut player, 9), 3);
    assert!(deck.is_empty());
    assert_eq!(deck.deal_card(&mut player), None);
}

#[test]
fn test_card_text() {
    assert_eq!(CardValue::F1.extended_text(), "Move forward 1 tile");
    assert_eq!(CardValue::F2.extended_text(), "Move forward 2 tiles");
    assert_eq!(CardValue::B1.extended_text(), "Move backward 1 tile");
    assert_eq!(CardValue::UT.extended_text(), "U-turn");

    let mut deck = CardDeck::new();
    deck.populate(CardValue::RR, 1);
    deck.populate(CardValue::F3, 1);
    assert_eq!(deck.to_string(), "RR F3");
}

/// Shuffling with the same seed gives the same order.
#[test]
fn test_shuffle_is_seeded() {
    let config = GameConfig::default();
    let mut a = CardDeck::program_deck(&config);
    let mut b = CardDeck::program_deck(&config);

    a.shuffle(&mut GameRng::new(7));
    b.shuffle(&mut GameRng::new(7));

    let order = |deck: &CardDeck| deck.iter().map(|c| c.id).collect::<Vec<_>>();
    assert_eq!(order(&a), order(&b));
    assert_eq!(a.size(), 84);
}
