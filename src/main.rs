use std::fs::{self, File};
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::filter::EnvFilter;

use tty_invaders::audio::BellAudio;
use tty_invaders::config::Config;
use tty_invaders::context::GameContext;
use tty_invaders::display;
use tty_invaders::game::Game;
use tty_invaders::highscores::HighScoreStore;
use tty_invaders::input::{hold_frames_for_fps, InputDecoder};
use tty_invaders::render::Canvas;
use tty_invaders::settings::SettingsStore;
use tty_invaders::timer::FrameTimer;

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs go to a file.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let path = config.log_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = File::create(&path).with_context(|| format!("opening log {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One frame per iteration: drain input without blocking, step the
/// simulation, draw, then sleep off the rest of the frame.
fn run<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>, config: &Config) -> anyhow::Result<()> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut ctx = GameContext::new(rng)
        .with_audio(Box::new(BellAudio::new(stdout(), true)))
        .with_persistence(
            SettingsStore::new(config.settings_path()),
            HighScoreStore::new(config.high_score_path()),
        );
    if config.mute {
        ctx.audio.toggle_mute();
    }
    let mut game = Game::new(ctx)?;

    let mut timer = FrameTimer::new(config.fps);
    let mut input = InputDecoder::new(hold_frames_for_fps(config.fps));
    let mut canvas = Canvas::default();
    let mut size = terminal::size()?;
    let mut frame: u64 = 0;

    display::clear(out)?;
    while game.is_running() {
        let dt = timer.tick();
        frame += 1;

        let mut fresh = Vec::new();
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(key) => fresh.extend(input.feed(&key, frame)),
                Event::Resize(w, h) => {
                    size = (w, h);
                    display::clear(out)?;
                }
                _ => {}
            }
        }
        let keys = input.frame_keys(fresh, frame, game.wants_continuous_input());

        game.step(&keys, dt)?;
        if !game.is_running() {
            break;
        }

        game.render(&mut canvas);
        display::present(out, &canvas, display::origin(size.0, size.1))?;
        timer.sleep_remaining();
    }
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    if let Err(e) = init_logging(&config) {
        eprintln!("logging disabled: {e:#}");
    }

    let (width, height) = terminal::size()?;
    display::check_size(width, height)?;
    tracing::info!(width, height, fps = config.fps, seed = ?config.seed, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the loop never waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let result = run(&mut out, &rx, &config);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    match &result {
        Ok(()) => tracing::info!("exited cleanly"),
        Err(e) => tracing::error!(error = %e, "exited with error"),
    }
    result
}
