//! Checkpoint flags.

use serde::{Deserialize, Serialize};

use crate::board::Location;

/// A flag tile. Flags are visited in ascending `number` order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flag {
    pub number: u8,
    pub location: Location,
}

impl Flag {
    #[must_use]
    pub const fn new(number: u8, location: Location) -> Self {
        Self { number, location }
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Flag {} at {}", self.number, self.location)
    }
}
