//! Terminal match-3 runner (default binary).
//!
//! This is the primary gameplay entrypoint. It uses crossterm for input and a
//! custom framebuffer-based renderer, and drives the turn controller from a
//! fixed-timestep loop.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use tui_match3::cli::{dump_settled, parse_args, Mode};
use tui_match3::engine::{Click, EngineConfig, TurnController};
use tui_match3::input::{map_event, Cursor, HostAction};
use tui_match3::logging;
use tui_match3::term::{
    frame_fingerprint, BoardScene, BoardView, Burst, FrameBuffer, RenderThrottle, Sprite,
    TerminalRenderer, TileAnimator, Viewport,
};
use tui_match3::types::TICK_MS;

/// A resting board is redrawn at least this often.
const STATIC_REFRESH_MS: u64 = 1000;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    logging::init_from_env()?;
    let config = cli.load_config()?;

    match cli.mode {
        Mode::Dump => {
            let snap = dump_settled(config)?;
            println!("{}", serde_json::to_string_pretty(&snap)?);
            Ok(())
        }
        Mode::Play => play(config),
    }
}

fn play(config: EngineConfig) -> Result<()> {
    // Build before touching the terminal so config errors print normally.
    let controller = TurnController::new(config)?;
    tracing::info!(seed = controller.seed(), "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, controller);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, mut controller: TurnController) -> Result<()> {
    let view = BoardView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut animator = TileAnimator::new();
    let mut throttle = RenderThrottle::new(STATIC_REFRESH_MS);
    let mut cursor = Cursor::new(controller.grid().width(), controller.grid().height());
    let mut sprites: Vec<Sprite> = Vec::new();
    let mut bursts: Vec<Burst> = Vec::new();
    let mut pending_click: Option<Click> = None;

    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;
    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        // Render.
        let now = now_ms();
        animator.prune(now);
        let snap = controller.snapshot();
        let fingerprint = frame_fingerprint(&snap, Some(cursor.pos()));
        if throttle.should_render(now, fingerprint, animator.is_animating(now)) {
            sprites.clear();
            sprites.extend(animator.sprites(now));
            bursts.clear();
            bursts.extend(animator.bursts(now).copied());
            let scene = BoardScene {
                snap: &snap,
                layout: controller.grid().layout(),
                sprites: Some(sprites.as_slice()),
                bursts: &bursts,
                cursor: Some(cursor.pos()),
            };
            view.render_into(&scene, viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                term.invalidate();
                throttle.invalidate();
            }
            match map_event(&ev) {
                Some(HostAction::Quit) => return Ok(()),
                Some(HostAction::Click { column, row }) => {
                    let grid = controller.grid();
                    // Off-board clicks never reach the controller.
                    if let Some(pos) = view.cell_at(grid.width(), grid.height(), viewport, column, row) {
                        cursor.set(pos);
                        pending_click = Some(Click::Cell(pos));
                    }
                }
                Some(HostAction::MoveCursor(dir)) => cursor.move_by(dir),
                Some(HostAction::SelectAtCursor) => pending_click = Some(Click::Cell(cursor.pos())),
                Some(HostAction::Restart) => {
                    let seed = controller.seed().wrapping_add(1);
                    controller.restart(seed)?;
                    animator.clear();
                    throttle.invalidate();
                    pending_click = None;
                }
                None => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let now = now_ms();

            // No input queue: a click that lands while the board is busy is dropped.
            controller.advance(now, pending_click.take());
            animator.apply_all(controller.drain_grid_events(), now);
            for turn_event in controller.drain_events() {
                tracing::trace!(event = ?turn_event, "turn event");
            }
        }
    }
}
