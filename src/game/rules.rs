//! The RoboRally game loop.
//!
//! `Game` owns the board, the shared deck and the player queue. The player at
//! the front of the queue is active; `switch_active_player` rotates the queue.
//!
//! ## Round flow
//!
//! The host calls [`Game::tick`] once per frame:
//!
//! 1. When the active player's turn is over, a new round starts: the queue
//!    rotates, the new active player is dealt a hand and programs a register.
//! 2. Every `ticks_per_step` ticks one register card executes. The executing
//!    card goes back on top of the deck and the deck is reshuffled.
//! 3. After every tick the active robot is checked against the next flag,
//!    and the game is won once a player has visited every flag.
//!
//! Manual players never get dealt cards by the loop; their robot is moved by
//! [`Game::handle_key`].

use im::Vector;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::event::RallyEvent;
use super::flag::Flag;
use crate::board::{resolve, Board, Location, Motion, Rotation};
use crate::cards::{CardAction, CardDeck};
use crate::core::{GameConfig, GameRng, PlayerId, RngStream};
use crate::error::{RallyError, Result};
use crate::players::{programmer_for, Player, PlayerKind, Programmer};

/// Arrow keys for driving a manual robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Forward one tile.
    Up,
    /// Backward one tile.
    Down,
    /// Rotate left.
    Left,
    /// Rotate right.
    Right,
}

impl Key {
    #[must_use]
    pub const fn action(self) -> CardAction {
        match self {
            Key::Up => CardAction::Move(1),
            Key::Down => CardAction::Move(-1),
            Key::Left => CardAction::Rotate(Rotation::Left),
            Key::Right => CardAction::Rotate(Rotation::Right),
        }
    }
}

/// Running totals per player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub cards_executed: u32,
    pub tiles_moved: u32,
    pub deaths: u32,
    pub flags: u32,
}

/// Builder for creating a `Game`.
pub struct GameBuilder {
    config: GameConfig,
    board: Option<Board>,
    programmer: Option<Box<dyn Programmer>>,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            board: None,
            programmer: None,
        }
    }

    /// Play on this board instead of the standard one.
    #[must_use]
    pub fn board(mut self, board: Board) -> Self {
        self.board = Some(board);
        self
    }

    /// Program registers with this programmer instead of the configured one.
    #[must_use]
    pub fn programmer(mut self, programmer: Box<dyn Programmer>) -> Self {
        self.programmer = Some(programmer);
        self
    }

    /// Validate the config and set up the table.
    pub fn build(self) -> Result<Game> {
        let config = self.config;
        config.validate()?;

        let board = self
            .board
            .unwrap_or_else(|| Board::standard(config.board_width, config.board_height));

        let mut players = VecDeque::with_capacity(config.player_count);
        for (index, id) in PlayerId::all(config.player_count).enumerate() {
            let start = config.start_location(index);
            board.check_bounds(start)?;
            let kind = if config.manual && index == 0 {
                PlayerKind::Manual
            } else {
                PlayerKind::Programmed
            };
            players.push_back(Player::new(id, kind, start));
        }

        let seed = GameRng::new(config.seed);
        let mut rng = seed.stream(RngStream::Deck);
        let mut deck = CardDeck::program_deck(&config);
        deck.shuffle(&mut rng);

        let programmer = self
            .programmer
            .unwrap_or_else(|| programmer_for(config.programmer, seed.stream(RngStream::Programmer)));

        let flags = board.flags();
        let round_start = config.start_location(0);
        let stats = vec![PlayerStats::default(); config.player_count];

        tracing::info!(
            players = config.player_count,
            width = board.width(),
            height = board.height(),
            flags = flags.len(),
            seed = config.seed,
            "new game"
        );

        Ok(Game {
            config,
            board,
            flags,
            players,
            deck,
            rng,
            programmer,
            stats,
            time: 1,
            round: 0,
            turn_is_over: true,
            has_started_moving: false,
            round_start,
            winner: None,
            history: Vector::new(),
            pending: Vec::new(),
        })
    }
}

/// A game in progress.
pub struct Game {
    config: GameConfig,
    board: Board,
    /// Flags in visiting order.
    flags: Vec<Flag>,
    /// Front is the active player.
    players: VecDeque<Player>,
    deck: CardDeck,
    /// Deck shuffling stream.
    rng: GameRng,
    programmer: Box<dyn Programmer>,
    /// Indexed by seat.
    stats: Vec<PlayerStats>,
    /// Host-loop tick counter, starts at 1.
    time: u64,
    round: u32,
    turn_is_over: bool,
    has_started_moving: bool,
    /// Where the active robot stood when its round started.
    round_start: Location,
    winner: Option<PlayerId>,
    history: Vector<RallyEvent>,
    /// Events not yet handed to the host.
    pending: Vec<RallyEvent>,
}

impl Game {
    /// Create a game on the standard board.
    pub fn new(config: GameConfig) -> Result<Self> {
        GameBuilder::new(config).build()
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Board size as (width, height).
    #[must_use]
    pub fn map_size(&self) -> (i32, i32) {
        (self.board.width(), self.board.height())
    }

    #[must_use]
    pub fn flags(&self) -> &[Flag] {
        &self.flags
    }

    #[must_use]
    pub fn deck(&self) -> &CardDeck {
        &self.deck
    }

    #[must_use]
    pub fn time(&self) -> u64 {
        self.time
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn turn_is_over(&self) -> bool {
        self.turn_is_over
    }

    #[must_use]
    pub fn has_started_moving(&self) -> bool {
        self.has_started_moving
    }

    /// Where the active robot stood when its current round started.
    #[must_use]
    pub fn round_start(&self) -> Location {
        self.round_start
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Every event since the game started.
    #[must_use]
    pub fn history(&self) -> &Vector<RallyEvent> {
        &self.history
    }

    /// # Panics
    ///
    /// Panics if `player` is not seated in this game.
    #[must_use]
    pub fn stats(&self, player: PlayerId) -> &PlayerStats {
        &self.stats[player.index()]
    }

    /// Players in queue order, active first.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|player| player.id() == id)
    }

    /// The next flag `player` needs, if any remain.
    #[must_use]
    pub fn next_flag(&self, player: &Player) -> Option<&Flag> {
        self.flags.get(player.visited_flags().len())
    }

    // === Active player ===

    pub fn active_player(&self) -> Result<&Player> {
        self.players.front().ok_or(RallyError::NoActivePlayer)
    }

    pub fn active_player_mut(&mut self) -> Result<&mut Player> {
        self.players.front_mut().ok_or(RallyError::NoActivePlayer)
    }

    /// Make `id` the active player, keeping the queue's cyclic order.
    pub fn set_active_player(&mut self, id: PlayerId) -> Result<()> {
        let position = self
            .players
            .iter()
            .position(|player| player.id() == id)
            .ok_or(RallyError::UnknownPlayer(id))?;
        if position > 0 {
            let from = self.active_player()?.id();
            self.players.rotate_left(position);
            self.emit(RallyEvent::ActivePlayerChanged { from, to: id });
        }
        Ok(())
    }

    /// Move the active player to the back of the queue.
    pub fn switch_active_player(&mut self) -> Result<()> {
        let previous = self.players.pop_front().ok_or(RallyError::NoActivePlayer)?;
        let from = previous.id();
        self.players.push_back(previous);

        let to = self.active_player()?.id();
        if from != to {
            self.emit(RallyEvent::ActivePlayerChanged { from, to });
        }
        Ok(())
    }

    /// Teleport the active robot.
    pub fn set_active_robot_location(&mut self, location: Location) -> Result<()> {
        self.board.check_bounds(location)?;
        self.active_player_mut()?.robot_mut().set_location(location);
        Ok(())
    }

    // === Rounds ===

    /// Start the next round: rotate to the next player, deal and program.
    ///
    /// The first round is played by the player at the front of the queue.
    pub fn start_new_round(&mut self) -> Result<()> {
        if self.round > 0 {
            self.switch_active_player()?;
        }
        self.round += 1;
        let target = self.next_flag(self.active_player()?).map(|flag| flag.location);

        let player = self.players.front_mut().ok_or(RallyError::NoActivePlayer)?;
        let id = player.id();
        self.round_start = player.robot().location();

        player.discard_hand(&mut self.deck);
        for card in player.robot_mut().clear_register() {
            self.deck.add_to_bottom(card);
        }

        let dealt = self.deck.deal_cards(player, self.config.hand_size);
        let program = player.pick_cards(
            self.config.register_size,
            self.programmer.as_mut(),
            &self.board,
            target,
        );
        player.robot_mut().update_register(program.clone());

        self.emit(RallyEvent::RoundStarted {
            player: id,
            round: self.round,
        });
        self.emit(RallyEvent::CardsDealt { player: id, count: dealt });
        self.emit(RallyEvent::ProgramSet {
            player: id,
            cards: program,
        });
        Ok(())
    }

    /// A programmed player's turn is over once its register is spent.
    /// Manual players' turns never end on their own.
    pub fn active_player_has_moved(&self) -> Result<bool> {
        let player = self.active_player()?;
        Ok(!player.is_manual() && player.robot().register().is_empty())
    }

    /// Advance the game by one host-loop frame.
    ///
    /// Returns the events produced since the previous call (including those
    /// from key presses in between).
    pub fn tick(&mut self) -> Result<Vec<RallyEvent>> {
        if self.winner.is_some() {
            return Ok(self.take_events());
        }

        if !self.active_player()?.is_manual() {
            if self.turn_is_over {
                self.start_new_round()?;
            }
            if self.time % self.config.ticks_per_step == 0 {
                self.execute_next_card()?;
            }
        }

        if self.active_player()?.robot().register().is_empty() {
            self.has_started_moving = false;
        }
        self.time += 1;
        self.turn_is_over = self.active_player_has_moved()?;

        self.check_if_active_player_on_flag()?;
        if self.check_if_won()? {
            let id = self.active_player()?.id();
            self.winner = Some(id);
            self.emit(RallyEvent::GameWon { player: id });
        }

        Ok(self.take_events())
    }

    /// Tick until someone wins or `max_ticks` frames have passed.
    pub fn run(&mut self, max_ticks: u64) -> Result<Option<PlayerId>> {
        for _ in 0..max_ticks {
            if self.winner.is_some() {
                break;
            }
            self.tick()?;
        }
        Ok(self.winner)
    }

    /// Execute the active robot's next register card with board rules.
    fn execute_next_card(&mut self) -> Result<()> {
        let player = self.players.front_mut().ok_or(RallyError::NoActivePlayer)?;
        let Some(card) = player.robot_mut().take_next() else {
            return Ok(());
        };
        self.deck.add_to_top(card);

        let motion = self.apply_action(card.value.action())?;
        let id = self.active_player()?.id();
        self.stats[id.index()].cards_executed += 1;

        self.deck.shuffle(&mut self.rng);
        self.has_started_moving = true;

        self.emit(RallyEvent::CardExecuted {
            player: id,
            card,
            location: motion.location,
            direction: motion.direction,
        });
        if motion.fell {
            self.destroy_active_robot(motion.location)?;
        }
        Ok(())
    }

    /// Move or turn the active robot, stopping at edges.
    fn apply_action(&mut self, action: CardAction) -> Result<Motion> {
        let player = self.players.front_mut().ok_or(RallyError::NoActivePlayer)?;
        let robot = player.robot();
        let motion = resolve(&self.board, robot.location(), robot.direction(), action);

        player.mark_active();
        player.robot_mut().set_location(motion.location);
        player.robot_mut().set_direction(motion.direction);

        let id = player.id();
        self.stats[id.index()].tiles_moved += motion.travelled;
        Ok(motion)
    }

    fn destroy_active_robot(&mut self, location: Location) -> Result<()> {
        let player = self.players.front_mut().ok_or(RallyError::NoActivePlayer)?;
        let id = player.id();
        for card in player.destroy_robot() {
            self.deck.add_to_bottom(card);
        }
        let respawn = player.archive();
        self.stats[id.index()].deaths += 1;

        self.emit(RallyEvent::RobotDestroyed {
            player: id,
            location,
            respawn,
        });
        Ok(())
    }

    // === Manual input ===

    /// Drive a manual active robot with an arrow key.
    ///
    /// Returns `false` without doing anything when the active player is
    /// programmed or the game is over.
    pub fn handle_key(&mut self, key: Key) -> Result<bool> {
        if self.winner.is_some() || !self.active_player()?.is_manual() {
            return Ok(false);
        }

        let motion = self.apply_action(key.action())?;
        let id = self.active_player()?.id();
        self.emit(RallyEvent::RobotMoved {
            player: id,
            location: motion.location,
            direction: motion.direction,
        });
        if motion.fell {
            self.destroy_active_robot(motion.location)?;
        }
        Ok(true)
    }

    // === Flags ===

    /// Only the next flag in order can be visited.
    pub fn can_visit_flag(&self, flag: &Flag) -> Result<bool> {
        let visited = self.active_player()?.visited_flags().len();
        Ok(self.flags.get(visited) == Some(flag))
    }

    /// Record a visit if the active robot stands on its next flag.
    pub fn check_if_active_player_on_flag(&mut self) -> Result<Option<Flag>> {
        let location = self.active_player()?.robot().location();
        let Some(flag) = self
            .flags
            .iter()
            .copied()
            .find(|flag| flag.location == location)
        else {
            return Ok(None);
        };
        if !self.can_visit_flag(&flag)? {
            return Ok(None);
        }

        let player = self.active_player_mut()?;
        let id = player.id();
        player.add_visited_flag(flag);
        self.stats[id.index()].flags += 1;
        self.emit(RallyEvent::FlagVisited { player: id, flag });
        Ok(Some(flag))
    }

    /// The active player has visited every flag.
    pub fn check_if_won(&self) -> Result<bool> {
        let visited = self.active_player()?.visited_flags().len();
        Ok(!self.flags.is_empty() && visited == self.flags.len())
    }

    // === Events ===

    /// Hand pending events to the host.
    pub fn take_events(&mut self) -> Vec<RallyEvent> {
        std::mem::take(&mut self.pending)
    }

    fn emit(&mut self, event: RallyEvent) {
        event.trace();
        self.history.push_back(event.clone());
        self.pending.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Direction;
    use crate::cards::CardValue;
    use crate::core::DeckEntry;
    use crate::players::InHandOrder;

    fn config() -> GameConfig {
        GameConfig::default().with_ticks_per_step(1)
    }

    fn single_value_config(value: CardValue) -> GameConfig {
        GameConfig {
            deck: vec![DeckEntry::new(value, 20)],
            ..config()
        }
    }

    #[test]
    fn test_first_tick_starts_round() {
        let mut game = GameBuilder::new(config())
            .programmer(Box::new(InHandOrder))
            .build()
            .unwrap();
        assert!(game.turn_is_over());

        let events = game.tick().unwrap();

        assert_eq!(game.round(), 1);
        assert!(matches!(events[0], RallyEvent::RoundStarted { round: 1, .. }));
        assert!(events.iter().any(|e| matches!(e, RallyEvent::CardsDealt { count: 9, .. })));
        assert!(events.iter().any(|e| matches!(e, RallyEvent::CardExecuted { .. })));

        let active = game.active_player().unwrap();
        assert_eq!(active.hand_size(), 4);
        assert_eq!(active.robot().register_size(), 4);
        assert!(game.has_started_moving());
    }

    #[test]
    fn test_cards_execute_every_ticks_per_step() {
        let mut game = GameBuilder::new(single_value_config(CardValue::RR).with_ticks_per_step(3))
            .build()
            .unwrap();

        // time 1 and 2: round starts, nothing executes yet.
        game.tick().unwrap();
        game.tick().unwrap();
        assert_eq!(game.active_player().unwrap().robot().register_size(), 5);

        // time 3: first card.
        game.tick().unwrap();
        let robot = game.active_player().unwrap().robot();
        assert_eq!(robot.register_size(), 4);
        assert_eq!(robot.direction(), Direction::Right);
    }

    #[test]
    fn test_deck_size_is_conserved() {
        let mut game = Game::new(config()).unwrap();
        let total = game.deck().size();

        for _ in 0..40 {
            game.tick().unwrap();
            let player = game.active_player().unwrap();
            let held = player.hand_size() + player.robot().register_size();
            assert_eq!(game.deck().size() + held, total);
        }
    }

    #[test]
    fn test_turn_ends_when_register_empty() {
        let mut game = Game::new(single_value_config(CardValue::RL)).unwrap();

        for _ in 0..5 {
            game.tick().unwrap();
        }
        assert!(game.turn_is_over());
        assert!(!game.has_started_moving());

        game.tick().unwrap();
        assert_eq!(game.round(), 2);
    }

    #[test]
    fn test_rounds_rotate_players() {
        let mut game = Game::new(single_value_config(CardValue::UT).with_players(2)).unwrap();

        game.tick().unwrap();
        assert_eq!(game.active_player().unwrap().id(), PlayerId::new(0));

        for _ in 0..5 {
            game.tick().unwrap();
        }
        assert_eq!(game.round(), 2);
        assert_eq!(game.active_player().unwrap().id(), PlayerId::new(1));
        assert_eq!(game.round_start(), Location::new(1, 0));
    }

    #[test]
    fn test_round_start_follows_robot() {
        let mut game = Game::new(single_value_config(CardValue::F1)).unwrap();

        for _ in 0..6 {
            game.tick().unwrap();
        }

        assert_eq!(game.round(), 2);
        assert_eq!(game.round_start(), Location::new(0, 5));
        assert_eq!(game.active_player().unwrap().robot().location(), Location::new(0, 6));
    }

    #[test]
    fn test_next_flag_steers_program() {
        let board = Board::new(3, 3).with_flag(1, Location::new(2, 0));
        let config = GameConfig {
            // Any 9-card hand holds at least one RR and seven F1.
            deck: vec![DeckEntry::new(CardValue::F1, 8), DeckEntry::new(CardValue::RR, 2)],
            ..config()
        };
        let mut game = GameBuilder::new(config).board(board).build().unwrap();

        let player = game.active_player().unwrap();
        assert_eq!(game.next_flag(player).map(|f| f.number), Some(1));

        game.tick().unwrap();
        // Turning right first is the only way toward the flag.
        assert_eq!(game.active_player().unwrap().robot().direction(), Direction::Right);

        game.run(10).unwrap();
        assert_eq!(game.winner(), Some(PlayerId::new(0)));
        assert_eq!(game.next_flag(game.active_player().unwrap()), None);
    }

    #[test]
    fn test_edges_stop_robot() {
        let mut game = Game::new(single_value_config(CardValue::B1)).unwrap();

        for _ in 0..5 {
            game.tick().unwrap();
        }

        let robot = game.active_player().unwrap().robot();
        assert_eq!(robot.location(), Location::new(0, 0));
        assert_eq!(game.stats(PlayerId::new(0)).tiles_moved, 0);
        assert_eq!(game.stats(PlayerId::new(0)).cards_executed, 5);
    }

    #[test]
    fn test_hole_destroys_and_respawns() {
        let board = Board::new(4, 4).with_hole(Location::new(0, 2));
        let mut game = GameBuilder::new(single_value_config(CardValue::F1))
            .board(board)
            .build()
            .unwrap();

        game.tick().unwrap();
        let events = game.tick().unwrap();

        assert!(events.iter().any(|e| matches!(
            e,
            RallyEvent::RobotDestroyed { location, respawn, .. }
                if *location == Location::new(0, 2) && *respawn == Location::new(0, 0)
        )));
        let player = game.active_player().unwrap();
        assert!(player.is_destroyed());
        assert_eq!(player.robot().location(), Location::new(0, 0));
        assert!(player.robot().register().is_empty());
        assert_eq!(game.stats(PlayerId::new(0)).deaths, 1);
        assert!(game.turn_is_over());
    }

    #[test]
    fn test_flags_in_order_and_win() {
        let board = Board::new(1, 6)
            .with_flag(1, Location::new(0, 2))
            .with_flag(2, Location::new(0, 4));
        let mut game = GameBuilder::new(single_value_config(CardValue::F1))
            .board(board)
            .build()
            .unwrap();

        let winner = game.run(20).unwrap();

        assert_eq!(winner, Some(PlayerId::new(0)));
        let visited: Vec<u8> = game
            .active_player()
            .unwrap()
            .visited_flags()
            .iter()
            .map(|flag| flag.number)
            .collect();
        assert_eq!(visited, vec![1, 2]);
        assert!(matches!(game.history().last(), Some(RallyEvent::GameWon { .. })));
    }

    #[test]
    fn test_out_of_order_flag_is_ignored() {
        let board = Board::new(3, 3)
            .with_flag(1, Location::new(2, 2))
            .with_flag(2, Location::new(1, 1));
        let mut game = GameBuilder::new(config().with_manual(true)).board(board).build().unwrap();

        game.set_active_robot_location(Location::new(1, 1)).unwrap();
        assert_eq!(game.check_if_active_player_on_flag().unwrap(), None);

        let first = game.flags()[0];
        assert!(game.can_visit_flag(&first).unwrap());
        assert!(!game.can_visit_flag(&game.flags()[1]).unwrap());
    }

    #[test]
    fn test_no_flags_never_wins() {
        let mut game = GameBuilder::new(config()).board(Board::new(3, 3)).build().unwrap();

        assert_eq!(game.run(30).unwrap(), None);
        assert!(!game.check_if_won().unwrap());
    }

    #[test]
    fn test_manual_keys() {
        let mut game = Game::new(config().with_manual(true)).unwrap();

        assert!(game.handle_key(Key::Up).unwrap());
        assert!(game.handle_key(Key::Right).unwrap());
        assert!(game.handle_key(Key::Up).unwrap());
        assert!(game.handle_key(Key::Down).unwrap());

        let robot = game.active_player().unwrap().robot();
        assert_eq!(robot.location(), Location::new(0, 1));
        assert_eq!(robot.direction(), Direction::Right);

        // Manual players are never dealt cards.
        game.tick().unwrap();
        assert_eq!(game.round(), 0);
        assert_eq!(game.active_player().unwrap().hand_size(), 0);
    }

    #[test]
    fn test_keys_ignored_for_programmed_player() {
        let mut game = Game::new(config()).unwrap();

        assert!(!game.handle_key(Key::Up).unwrap());
        assert_eq!(game.active_player().unwrap().robot().location(), Location::new(0, 0));
    }

    #[test]
    fn test_set_active_player() {
        let mut game = Game::new(config().with_players(3)).unwrap();

        game.set_active_player(PlayerId::new(2)).unwrap();
        let order: Vec<_> = game.players().map(|p| p.id().0).collect();
        assert_eq!(order, vec![2, 0, 1]);

        assert!(matches!(
            game.set_active_player(PlayerId::new(7)),
            Err(RallyError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn test_set_robot_location_bounds() {
        let mut game = Game::new(config()).unwrap();

        assert!(game.set_active_robot_location(Location::new(11, 11)).is_ok());
        assert!(matches!(
            game.set_active_robot_location(Location::new(12, 0)),
            Err(RallyError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_start_outside_board_rejected() {
        let config = GameConfig {
            start_locations: Some(vec![Location::new(20, 20)]),
            ..config()
        };

        assert!(matches!(Game::new(config), Err(RallyError::OutOfBounds { .. })));
    }
}
