//! Game flow: rounds, flags, events and keyboard input.

pub mod event;
pub mod flag;
pub mod rules;

pub use event::RallyEvent;
pub use flag::Flag;
pub use rules::{Game, GameBuilder, Key, PlayerStats};
