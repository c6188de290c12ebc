//! Terminal match-3 runner (default binary).
//!
//! Renders the grid with crossterm through the framebuffer renderer, moves a
//! cursor with the keyboard and drives the settle timer at a fixed timestep.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{info, warn};

use tui_match3::config::GameConfig;
use tui_match3::core::{GridEvent, SwapCoordinator};
use tui_match3::input::{handle_key_event, should_quit, Cursor};
use tui_match3::logging;
use tui_match3::term::game_view::Highlight;
use tui_match3::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_match3::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    logging::init_from_env()?;

    let config = GameConfig::from_env().context("loading configuration")?;
    let game = config.build(true).context("generating grid")?;
    info!(
        width = config.width,
        height = config.height,
        palette = ?config.palette,
        "game started"
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut game: SwapCoordinator, config: &GameConfig) -> Result<()> {
    let view = GameView::new(config.layout());
    let mut cursor = Cursor::new(config.width, config.height);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = game.snapshot();

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        let highlight = Highlight {
            cursor: Some(cursor.pos()),
            selected: cursor.selected(),
        };
        view.render_into(&snap, highlight, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(&mut game, &mut cursor, action)?;
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            if let Some(result) = game.tick(TICK_MS)? {
                info!(?result, "settle action fired");
            }
            for event in game.take_events() {
                if let GridEvent::TileDestroyed { id, coord } = event {
                    tracing::debug!(%id, %coord, "tile destroyed");
                }
            }
        }
    }
}

fn apply_action(game: &mut SwapCoordinator, cursor: &mut Cursor, action: GameAction) -> Result<()> {
    match action {
        GameAction::Pause => {
            let active = game.activity_mut();
            *active = !*active;
            info!(active = *game.activity(), "game-active signal toggled");
        }
        GameAction::Restart => {
            cursor.clear_selection();
            if let Some(reason) = game.regenerate()? {
                warn!(?reason, "restart ignored");
            }
        }
        _ => {
            let grid = game.grid();
            let pair = cursor.apply(action, |c| grid.color_at(c).is_some());
            if let Some((a, b)) = pair {
                let outcome = game.request_swap(a, b)?;
                info!(%a, %b, ?outcome, "swap requested");
            }
        }
    }
    Ok(())
}
