//! Seats at the table.
//!
//! Seats are numbered from 0 in code and from 1 on screen, so `PlayerId(0)`
//! shows up as "Player 1" in the UI and the logs.

use serde::{Deserialize, Serialize};

/// A player's seat number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    /// Seat number as an index into per-seat tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Seats of a table with `player_count` players, in seating order.
    ///
    /// ```
    /// use roborally::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(3).map(|id| id.to_string()).collect();
    /// assert_eq!(seats, ["Player 1", "Player 2", "Player 3"]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..=u8::MAX).take(player_count).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", u16::from(self.0) + 1)
    }
}
