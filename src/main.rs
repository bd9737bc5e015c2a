//! Blockfall terminal runner (default binary).
//!
//! Reads configuration, loads key bindings, then runs a fixed-timestep loop:
//! poll input until the next tick, advance the session by the real elapsed
//! time, deliver events to the bell/banner and redraw.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::config::Config;
use blockfall::core::{GameSession, GameSnapshot, SessionState};
use blockfall::feedback::TerminalFeedback;
use blockfall::input::{handle_key_event, should_quit, KeyBindings};
use blockfall::term::{Canvas, GameView, TerminalRenderer, Viewport};
use blockfall::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let config = Config::from_env();
    for warning in &config.warnings {
        eprintln!("[Blockfall] {warning}");
    }
    let bindings = load_bindings(config.keys_path.as_deref());
    println!(
        "[Blockfall] mode {} seed {}",
        config.mode.as_str(),
        config.seed
    );

    let mut term = TerminalRenderer::new();
    let result = term
        .enter()
        .and_then(|_| run(&mut term, &config, &bindings));

    // Always try to restore terminal state.
    let _ = term.exit();

    let last = result?;
    print_summary(&last);
    Ok(())
}

/// Bindings from `path`, falling back to the defaults. A missing file is
/// created with the defaults so players have something to edit.
fn load_bindings(path: Option<&Path>) -> KeyBindings {
    let Some(path) = path else {
        return KeyBindings::default();
    };

    if !path.exists() {
        let defaults = KeyBindings::default();
        match defaults.save(path) {
            Ok(()) => println!("[Keys] wrote default bindings to {}", path.display()),
            Err(e) => eprintln!("[Keys] {e:#}"),
        }
        return defaults;
    }

    match KeyBindings::load(path) {
        Ok(bindings) => {
            println!("[Keys] loaded {}", path.display());
            bindings
        }
        Err(e) => {
            eprintln!("[Keys] {e:#}; using default bindings");
            KeyBindings::default()
        }
    }
}

fn run(
    term: &mut TerminalRenderer,
    config: &Config,
    bindings: &KeyBindings,
) -> Result<GameSnapshot> {
    let mut session = GameSession::new(config.mode, config.seed);
    let mut feedback = TerminalFeedback::new(config.bell);

    let view = GameView::default();
    let mut canvas = Canvas::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        session.flush_events(&mut feedback);
        if feedback.take_ring() {
            term.bell()?;
        }

        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let banner = feedback.banner(Instant::now());
        view.render_into(&snap, banner, Viewport::new(w, h), &mut canvas);
        term.present(&mut canvas)?;

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(session.snapshot());
                    }
                    if let Some(action) = handle_key_event(bindings, key) {
                        if action == GameAction::Restart {
                            feedback.clear();
                        }
                        session.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick {
            last_tick = Instant::now();
            session.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }
    }
}

fn print_summary(snap: &GameSnapshot) {
    let result = match snap.state {
        SessionState::Over(reason) if reason.completed() => "completed",
        SessionState::Over(_) => "topped out",
        _ => "quit",
    };
    println!(
        "[Blockfall] {} {}: score {} lines {} level {} time {:.1}s",
        snap.mode.label,
        result,
        snap.stats.score,
        snap.stats.lines,
        snap.stats.level,
        snap.stats.elapsed_ms as f64 / 1000.0
    );
}
