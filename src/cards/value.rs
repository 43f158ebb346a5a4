//! Program card values.

use serde::{Deserialize, Serialize};

use crate::board::Rotation;

/// The instruction printed on a program card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardValue {
    /// Move forward 1.
    F1,
    /// Move forward 2.
    F2,
    /// Move forward 3.
    F3,
    /// Move backward 1.
    B1,
    /// Rotate right.
    RR,
    /// Rotate left.
    RL,
    /// U-turn.
    UT,
}

/// What executing a card does to a robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardAction {
    /// Move this many tiles along the facing; negative moves backward.
    Move(i32),
    /// Turn in place.
    Rotate(Rotation),
}

impl CardValue {
    pub const ALL: [CardValue; 7] = [
        CardValue::F1,
        CardValue::F2,
        CardValue::F3,
        CardValue::B1,
        CardValue::RR,
        CardValue::RL,
        CardValue::UT,
    ];

    /// Short code printed in deck listings.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            CardValue::F1 => "F1",
            CardValue::F2 => "F2",
            CardValue::F3 => "F3",
            CardValue::B1 => "B1",
            CardValue::RR => "RR",
            CardValue::RL => "RL",
            CardValue::UT => "UT",
        }
    }

    /// Human-readable instruction.
    ///
    /// ```
    /// use roborally::cards::CardValue;
    ///
    /// assert_eq!(CardValue::F1.extended_text(), "Move forward 1 tile");
    /// assert_eq!(CardValue::B1.extended_text(), "Move backward 1 tile");
    /// ```
    #[must_use]
    pub const fn extended_text(self) -> &'static str {
        match self {
            CardValue::F1 => "Move forward 1 tile",
            CardValue::F2 => "Move forward 2 tiles",
            CardValue::F3 => "Move forward 3 tiles",
            CardValue::B1 => "Move backward 1 tile",
            CardValue::RR => "Rotate right",
            CardValue::RL => "Rotate left",
            CardValue::UT => "U-turn",
        }
    }

    #[must_use]
    pub const fn action(self) -> CardAction {
        match self {
            CardValue::F1 => CardAction::Move(1),
            CardValue::F2 => CardAction::Move(2),
            CardValue::F3 => CardAction::Move(3),
            CardValue::B1 => CardAction::Move(-1),
            CardValue::RR => CardAction::Rotate(Rotation::Right),
            CardValue::RL => CardAction::Rotate(Rotation::Left),
            CardValue::UT => CardAction::Rotate(Rotation::UTurn),
        }
    }
}

impl std::fmt::Display for CardValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_text_is_distinct() {
        let mut texts: Vec<_> = CardValue::ALL.iter().map(|v| v.extended_text()).collect();
        texts.sort_unstable();
        texts.dedup();
        assert_eq!(texts.len(), CardValue::ALL.len());
    }

    #[test]
    fn test_actions() {
        assert_eq!(CardValue::F3.action(), CardAction::Move(3));
        assert_eq!(CardValue::B1.action(), CardAction::Move(-1));
        assert_eq!(CardValue::UT.action(), CardAction::Rotate(Rotation::UTurn));
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(CardValue::RL.to_string(), "RL");
    }
}
