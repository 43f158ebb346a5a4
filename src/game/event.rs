//! Things that happen during a game.
//!
//! The game loop emits a `RallyEvent` for every state change worth showing:
//! the terminal front end prints them to its log panel and every event is
//! also written to the tracing log as it happens.

use serde::{Deserialize, Serialize};

use super::flag::Flag;
use crate::board::{Direction, Location};
use crate::cards::{Card, CardValue};
use crate::core::PlayerId;

/// A game event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RallyEvent {
    /// A new round began for `player`.
    RoundStarted { player: PlayerId, round: u32 },

    /// The active player changed.
    ActivePlayerChanged { from: PlayerId, to: PlayerId },

    /// Cards were dealt from the deck.
    CardsDealt { player: PlayerId, count: usize },

    /// A register was programmed.
    ProgramSet { player: PlayerId, cards: Vec<Card> },

    /// A register card was executed.
    CardExecuted {
        player: PlayerId,
        card: Card,
        location: Location,
        direction: Direction,
    },

    /// A robot was moved or turned by hand.
    RobotMoved {
        player: PlayerId,
        location: Location,
        direction: Direction,
    },

    /// A robot fell into a hole and respawned at `respawn`.
    RobotDestroyed {
        player: PlayerId,
        location: Location,
        respawn: Location,
    },

    /// A robot reached its next flag.
    FlagVisited { player: PlayerId, flag: Flag },

    /// A player visited every flag.
    GameWon { player: PlayerId },
}

impl RallyEvent {
    /// The player the event is about.
    #[must_use]
    pub fn player(&self) -> PlayerId {
        match self {
            RallyEvent::RoundStarted { player, .. }
            | RallyEvent::CardsDealt { player, .. }
            | RallyEvent::ProgramSet { player, .. }
            | RallyEvent::CardExecuted { player, .. }
            | RallyEvent::RobotMoved { player, .. }
            | RallyEvent::RobotDestroyed { player, .. }
            | RallyEvent::FlagVisited { player, .. }
            | RallyEvent::GameWon { player } => *player,
            RallyEvent::ActivePlayerChanged { to, .. } => *to,
        }
    }

    /// Write the event to the tracing log.
    pub(crate) fn trace(&self) {
        match self {
            RallyEvent::RoundStarted { .. } | RallyEvent::FlagVisited { .. } | RallyEvent::GameWon { .. } => {
                tracing::info!("{self}");
            }
            RallyEvent::RobotDestroyed { .. } => tracing::warn!("{self}"),
            _ => tracing::debug!("{self}"),
        }
    }
}

fn codes(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| card.value.code())
        .collect::<Vec<_>>()
        .join(" ")
}

impl std::fmt::Display for RallyEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RallyEvent::RoundStarted { player, round } => write!(f, "- Round {round}: {player}'s turn -"),
            RallyEvent::ActivePlayerChanged { from, to } => write!(f, "{from} hands over to {to}"),
            RallyEvent::CardsDealt { player, count } => write!(f, "{player} is dealt {count} cards"),
            RallyEvent::ProgramSet { player, cards } => write!(f, "{player} picked: {}", codes(cards)),
            RallyEvent::CardExecuted {
                player,
                card,
                location,
                direction,
            } => {
                let text = CardValue::extended_text(card.value);
                write!(f, "{player}: {text} -> {location} facing {direction:?}")
            }
            RallyEvent::RobotMoved {
                player,
                location,
                direction,
            } => write!(f, "{player} moved to {location} facing {direction:?}"),
            RallyEvent::RobotDestroyed {
                player,
                location,
                respawn,
            } => write!(f, "{player} fell into the hole at {location}, respawning at {respawn}"),
            RallyEvent::FlagVisited { player, flag } => write!(f, "{player} reached {flag}"),
            RallyEvent::GameWon { player } => write!(f, "{player} won!"),
        }
    }
}
