//! Terminal Flappy runner (default binary).
//!
//! Runs the fixed-timestep frame loop: poll crossterm input until the next
//! tick, step the session controller, and redraw through the framebuffer
//! renderer.

use std::fs::OpenOptions;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use tui_flappy::config::RunConfig;
use tui_flappy::core::{GameController, GameSnapshot, LevelLayout, SessionObserver};
use tui_flappy::engine::ArcadeWorld;
use tui_flappy::input::{should_quit, HeldKeys};
use tui_flappy::term::{
    FrameBuffer, GameView, MessageBanner, RenderThrottle, TerminalRenderer, Viewport,
};
use tui_flappy::types::GameAction;

fn main() -> Result<()> {
    let config = RunConfig::from_env()?;
    init_logging(&config)?;
    log::info!("starting with {:?}", config);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("exiting with error: {err:#}");
    }
    result
}

/// Logging goes to a file only; stderr would tear the alternate screen.
fn init_logging(config: &RunConfig) -> Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<()> {
    let mut world = ArcadeWorld::new();
    let mut banner = MessageBanner::new();
    let mut controller = GameController::new(LevelLayout::standard());
    controller.initialize(&mut world, &mut banner);

    let view = GameView::default();
    let mut keys = HeldKeys::new().with_key_release_timeout_ms(config.key_release_timeout_ms);
    let mut throttle = RenderThrottle::new(config.static_render_ms);
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let clock = Instant::now();
    let tick_duration = Duration::from_millis(config.tick_ms as u64);
    let mut last_tick = Instant::now();

    loop {
        // Render.
        let now_ms = clock.elapsed().as_millis() as u64;
        controller.snapshot_into(&world, &mut snap);
        let fingerprint = snap.fingerprint() ^ banner.revision();
        if throttle.should_render(now_ms, fingerprint, snap.mode.is_static()) {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            view.render_into(&snap, &banner, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press && should_quit(key) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                    let now_ms = clock.elapsed().as_millis() as u64;
                    if keys.handle_key(key, now_ms) == Some(GameAction::Restart) {
                        controller.on_restart_requested();
                        keys.reset();
                    }
                }
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            let input = keys.frame(clock.elapsed().as_millis() as u64);
            controller.frame(&mut world, &input, &mut banner, config.tick_ms);
        }
    }
}
