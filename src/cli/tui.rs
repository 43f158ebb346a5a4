//! Play command implementation - interactive terminal UI.
//!
//! The game ticks once per frame. Arrow keys drive a manual robot, space
//! pauses, `q` or Esc quits.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

use roborally::view::{tile_glyph, Cell};
use roborally::{BoardView, Game, Key, Player, PlayerId, RallyEvent};

use super::GameArgs;

const LOG_LINES: usize = 200;

/// Execute the play command.
pub(crate) fn execute(args: &GameArgs, frame_ms: u64) -> anyhow::Result<()> {
    let game = args.build_game()?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_tui(&mut terminal, App::new(game, frame_ms));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result
}

/// App state for the TUI.
struct App {
    game: Game,
    log: VecDeque<String>,
    paused: bool,
    frame: Duration,
    last_tick: Instant,
}

impl App {
    fn new(game: Game, frame_ms: u64) -> Self {
        Self {
            game,
            log: VecDeque::with_capacity(LOG_LINES),
            paused: false,
            frame: Duration::from_millis(frame_ms.max(1)),
            last_tick: Instant::now(),
        }
    }

    fn record(&mut self, events: Vec<RallyEvent>) {
        for event in events {
            if self.log.len() == LOG_LINES {
                self.log.pop_front();
            }
            self.log.push_back(event.to_string());
        }
    }

    fn tick(&mut self) -> anyhow::Result<()> {
        let events = self.game.tick()?;
        self.record(events);
        self.last_tick = Instant::now();
        Ok(())
    }

    fn until_next_tick(&self) -> Duration {
        self.frame.saturating_sub(self.last_tick.elapsed())
    }
}

fn run_tui(terminal: &mut Terminal<CrosstermBackend<Stdout>>, mut app: App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(app.until_next_tick())? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char(' ') => app.paused = !app.paused,
                        KeyCode::Up => {
                            app.game.handle_key(Key::Up)?;
                        }
                        KeyCode::Down => {
                            app.game.handle_key(Key::Down)?;
                        }
                        KeyCode::Left => {
                            app.game.handle_key(Key::Left)?;
                        }
                        KeyCode::Right => {
                            app.game.handle_key(Key::Right)?;
                        }
                        _ => {}
                    }
                }
            }
        }

        if !app.paused && app.last_tick.elapsed() >= app.frame {
            app.tick()?;
        }
    }
    Ok(())
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Board and players
            Constraint::Length(8), // Event log
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_board(f, main_chunks[0], app);
    render_players(f, main_chunks[1], app);
    render_log(f, chunks[2], app);
    render_footer(f, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let status = match app.game.winner() {
        Some(winner) => format!("{winner} WON"),
        None if app.paused => "PAUSED".to_string(),
        None => "RUNNING".to_string(),
    };
    let title = format!(
        " RoboRally | Round {} | Tick {} | {} ",
        app.game.round(),
        app.game.time(),
        status
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, area: Rect, app: &App) {
    let view = BoardView::from_game(&app.game);
    let lines: Vec<Line> = view
        .rows()
        .iter()
        .map(|row| Line::from(row.iter().map(cell_span).collect::<Vec<_>>()))
        .collect();

    let board = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Board "));
    f.render_widget(board, area);
}

fn cell_span(cell: &Cell) -> Span<'static> {
    match cell.robot {
        Some((player, sprite)) => Span::styled(
            format!("{} ", sprite.glyph()),
            Style::default().fg(player_color(player)).add_modifier(Modifier::BOLD),
        ),
        None => {
            let glyph = tile_glyph(cell.tile);
            let color = match cell.tile {
                roborally::Tile::Floor => Color::DarkGray,
                roborally::Tile::Hole => Color::Red,
                roborally::Tile::Flag(_) => Color::Yellow,
            };
            Span::styled(format!("{glyph} "), Style::default().fg(color))
        }
    }
}

fn render_players(f: &mut Frame, area: Rect, app: &App) {
    let flag_count = app.game.flags().len();
    let mut lines = vec![Line::from("")];

    let active = app.game.active_player().ok().map(|player| player.id());
    let mut players: Vec<_> = app.game.players().collect();
    players.sort_by_key(|player| player.id());

    for player in players {
        let marker = if Some(player.id()) == active { "> " } else { "  " };
        let robot = player.robot();
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(
                format!("{} ", player.name()),
                Style::default()
                    .fg(player_color(player.id()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "{} {:?}  flags {}/{}",
                robot.location(),
                robot.direction(),
                player.visited_flags().len(),
                flag_count
            )),
        ]));
        lines.push(Line::from(format!("    hand:     {}", hand_codes(player))));
        lines.push(Line::from(format!("    register: {}", robot.register())));
        if let Some(flag) = app.game.next_flag(player) {
            lines.push(Line::from(format!("    next:     {flag}")));
        }
    }

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Players "));
    f.render_widget(widget, area);
}

fn hand_codes(player: &Player) -> String {
    player
        .hand()
        .iter()
        .map(|card| card.value.code())
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_log(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = app
        .log
        .iter()
        .skip(app.log.len().saturating_sub(visible))
        .map(|entry| Line::from(entry.as_str()))
        .collect();

    let widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Events "));
    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect) {
    let help = " [Arrows] Drive robot  [Space] Pause  [Q] Quit ";
    let footer = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}

fn player_color(player: PlayerId) -> Color {
    match player.index() {
        0 => Color::Red,
        1 => Color::Blue,
        2 => Color::Green,
        3 => Color::Yellow,
        4 => Color::Magenta,
        5 => Color::Cyan,
        6 => Color::LightRed,
        _ => Color::LightBlue,
    }
}
