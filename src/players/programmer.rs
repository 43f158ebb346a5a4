//! Register programming strategies.
//!
//! A `Programmer` looks at a dealt hand and decides which cards, in which
//! order, become the robot's register. Implementations:
//!
//! - `InHandOrder`: the first cards, as dealt
//! - `RandomProgrammer`: a seeded random selection
//! - `FlagSeeker`: greedy walk toward the next flag, steering around holes

use crate::board::{resolve, Board, Direction, Location};
use crate::cards::Card;
use crate::core::{GameRng, ProgrammerKind};

/// What a programmer can see when choosing a register.
#[derive(Clone, Copy, Debug)]
pub struct ProgramContext<'a> {
    pub hand: &'a [Card],
    pub location: Location,
    pub direction: Direction,
    pub board: &'a Board,
    /// Next flag the robot needs, if any.
    pub target: Option<Location>,
}

/// Chooses register cards from a hand.
pub trait Programmer {
    /// Indices into `ctx.hand`, in execution order.
    ///
    /// Should return `count` distinct indices when the hand is large enough.
    /// Out-of-range and repeated indices are ignored by the caller.
    fn choose(&mut self, ctx: &ProgramContext<'_>, count: usize) -> Vec<usize>;
}

/// Build the programmer selected in the config.
#[must_use]
pub fn programmer_for(kind: ProgrammerKind, rng: GameRng) -> Box<dyn Programmer> {
    match kind {
        ProgrammerKind::InOrder => Box::new(InHandOrder),
        ProgrammerKind::Random => Box::new(RandomProgrammer::new(rng)),
        ProgrammerKind::FlagSeeker => Box::new(FlagSeeker),
    }
}

/// Takes the first `count` cards of the hand.
#[derive(Clone, Copy, Debug, Default)]
pub struct InHandOrder;

impl Programmer for InHandOrder {
    fn choose(&mut self, ctx: &ProgramContext<'_>, count: usize) -> Vec<usize> {
        (0..count.min(ctx.hand.len())).collect()
    }
}

/// Picks cards uniformly at random.
#[derive(Clone, Debug)]
pub struct RandomProgrammer {
    rng: GameRng,
}

impl RandomProgrammer {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Programmer for RandomProgrammer {
    fn choose(&mut self, ctx: &ProgramContext<'_>, count: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..ctx.hand.len()).collect();
        self.rng.shuffle(&mut indices);
        indices.truncate(count);
        indices
    }
}

/// Greedy one-card lookahead toward the target flag.
///
/// For each register slot, simulates every remaining card on the board and
/// keeps the one that does not fall and ends closest to the target, breaking
/// ties in favour of facing the target and then of hand order. With no target
/// it behaves like `InHandOrder` but still avoids holes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlagSeeker;

impl FlagSeeker {
    fn facing_toward(location: Location, direction: Direction, target: Location) -> bool {
        let (dx, dy) = direction.offset();
        dx * (target.x - location.x) + dy * (target.y - location.y) > 0
    }
}

impl Programmer for FlagSeeker {
    fn choose(&mut self, ctx: &ProgramContext<'_>, count: usize) -> Vec<usize> {
        let mut remaining: Vec<usize> = (0..ctx.hand.len()).collect();
        let mut picked = Vec::with_capacity(count);
        let mut location = ctx.location;
        let mut direction = ctx.direction;

        while picked.len() < count && !remaining.is_empty() {
            let best = remaining
                .iter()
                .enumerate()
                .min_by_key(|&(_, &index)| {
                    let motion = resolve(ctx.board, location, direction, ctx.hand[index].value.action());
                    let (distance, facing) = match ctx.target {
                        Some(target) => (
                            motion.location.distance(target),
                            Self::facing_toward(motion.location, motion.direction, target),
                        ),
                        None => (0, true),
                    };
                    (motion.fell, distance, !facing, index)
                })
                .map(|(slot, _)| slot);

            let Some(slot) = best else { break };
            let index = remaining.remove(slot);
            let motion = resolve(ctx.board, location, direction, ctx.hand[index].value.action());
            location = motion.location;
            direction = motion.direction;
            picked.push(index);
        }

        picked
    }
}
