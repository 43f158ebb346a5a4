//! Run command implementation - play a game to the end without a UI.

use roborally::{BoardView, Game, PlayerId, RallyEvent};

use super::{GameArgs, OutputFormat};

/// Execute the run command.
pub(crate) fn execute(args: &GameArgs, max_ticks: u64, format: OutputFormat, quiet: bool) -> anyhow::Result<()> {
    let mut game = args.build_game()?;
    if game.active_player()?.is_manual() {
        anyhow::bail!("manual play needs the terminal UI; use `roborally play --manual`");
    }

    for _ in 0..max_ticks {
        let events = game.tick()?;
        if !quiet {
            print_events(&events, format)?;
        }
        if game.is_over() {
            break;
        }
    }

    match format {
        OutputFormat::Text => print_summary(&game),
        OutputFormat::Json => {
            let summary = serde_json::json!({
                "winner": game.winner().map(|id| id.index() + 1),
                "rounds": game.round(),
                "ticks": game.time() - 1,
                "stats": PlayerId::all(game.config().player_count)
                    .map(|id| game.stats(id))
                    .collect::<Vec<_>>(),
            });
            println!("{summary}");
        }
    }
    Ok(())
}

fn print_events(events: &[RallyEvent], format: OutputFormat) -> anyhow::Result<()> {
    for event in events {
        match format {
            OutputFormat::Text => println!("{event}"),
            OutputFormat::Json => println!("{}", serde_json::to_string(event)?),
        }
    }
    Ok(())
}

fn print_summary(game: &Game) {
    println!();
    print!("{}", BoardView::from_game(game));
    println!();
    match game.winner() {
        Some(winner) => println!("{winner} won after {} rounds.", game.round()),
        None => println!("Nobody won after {} rounds.", game.round()),
    }
    for id in PlayerId::all(game.config().player_count) {
        let stats = game.stats(id);
        println!(
            "  {id}: {} flags, {} cards, {} tiles moved, {} deaths",
            stats.flags, stats.cards_executed, stats.tiles_moved, stats.deaths
        );
    }
}
