//! Players, their robots, and register programming.

pub mod player;
pub mod programmer;
pub mod robot;

pub use player::{Player, PlayerKind};
pub use programmer::{programmer_for, FlagSeeker, InHandOrder, ProgramContext, Programmer, RandomProgrammer};
pub use robot::{Register, Robot};
