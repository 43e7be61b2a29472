//! Terminal Sound Match runner (default binary).
//!
//! Reads configuration from the environment, acquires the tone and speech
//! collaborators, then runs a single-threaded loop: render, wait for input
//! until the next frame, apply it, advance the game clock.

use std::fs::OpenOptions;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use log::info;

use sound_match::audio::{Media, Narrator, ToneRenderer};
use sound_match::core::{GameSnapshot, GameState};
use sound_match::engine::{GameConfig, Session, Transcript};
use sound_match::input::{handle_key_event, handle_mouse_event, should_quit};
use sound_match::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use sound_match::types::TICK_MS;

fn main() -> Result<()> {
    let config = GameConfig::from_env()?;
    init_logging(config.log_path.as_deref())?;
    info!("starting: seed={} muted={}", config.seed, config.media.muted);

    let transcript = match config.transcript_path.as_deref() {
        Some(path) => Some(
            Transcript::open(path)
                .with_context(|| format!("opening cue transcript {}", path.display()))?,
        ),
        None => None,
    };

    let mut media = Media::acquire(&config.media);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let mut session = Session::new(
        GameState::new(config.seed),
        &mut media.tones,
        &mut media.speech,
    );
    if let Some(transcript) = transcript {
        session = session.with_transcript(transcript);
    }

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    drop(session);
    media.release();
    info!("stopped");
    result
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    // The terminal is in raw alternate-screen mode; log lines go to a file or nowhere.
    let Some(path) = path else {
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

type TerminalSession<'a> = Session<&'a mut Box<dyn ToneRenderer>, &'a mut Narrator>;

fn run(term: &mut TerminalRenderer, session: &mut TerminalSession<'_>) -> Result<()> {
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        session.snapshot_into(&mut snap);
        view.render_into(&snap, session.speech().caption(), viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.apply(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(action) =
                        handle_mouse_event(mouse, |x, y| view.target_at(&snap, viewport, x, y))
                    {
                        session.apply(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Advance by whole milliseconds; the remainder carries into the next frame.
        let elapsed_ms = last_tick.elapsed().as_millis().min(u32::MAX as u128) as u32;
        if elapsed_ms >= TICK_MS {
            last_tick += Duration::from_millis(elapsed_ms as u64);
            session.tick(elapsed_ms);
        }
    }
}
