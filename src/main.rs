mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use space_shooter::audio::{dispatch_effects, AudioSink, Muted};
use space_shooter::compute::{init_state, update};
use space_shooter::config::GameConfig;
use space_shooter::input::{Action, KeyTracker};
use space_shooter::render::render;

use display::{TerminalBell, TerminalCanvas};

#[derive(Debug, Parser)]
#[command(name = "space_shooter", about = "Arcade space shooter in the terminal")]
struct Args {
    /// RON file overriding window and rule settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for enemy placement; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Disable the terminal bell for every sound.
    #[arg(long)]
    mute: bool,
    /// Ring the bell for explosions only, not for every shot.
    #[arg(long)]
    quiet_shots: bool,
    /// Where tracing output goes (the terminal itself is busy drawing).
    #[arg(long, default_value = "space_shooter.log")]
    log_file: PathBuf,
}

fn init_tracing(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> GameConfig {
    let config = match path {
        Some(path) => {
            let (config, err) = GameConfig::load_or_default(path);
            if let Some(err) = err {
                warn!(%err, "falling back to default config");
            }
            config
        }
        None => GameConfig::default(),
    };
    for warning in config.validate() {
        warn!(%warning, "config");
    }
    config
}

/// Map a terminal key to a game action.
fn bind(code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Action::Quit),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Right),
        KeyCode::Char(' ') => Some(Action::Fire),
        KeyCode::Enter => Some(Action::Confirm),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Action::Restart),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Each frame: drain input, simulate with the
/// real elapsed time, hand sounds to the audio sink, draw.
fn game_loop<W: Write>(
    out: &mut W,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
    audio: &mut dyn AudioSink,
) -> Result<()> {
    let frame_budget = Duration::from_secs_f64(1.0 / config.window.target_fps.max(1) as f64);
    let mut canvas = TerminalCanvas::new(out, terminal::size()?, &config.rules);
    let mut keys = KeyTracker::default();
    let mut world = init_state(config.rules);
    let mut frame: u64 = 0;
    let mut last_tick = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => {
                    let Some(action) = bind(code, modifiers) else {
                        continue;
                    };
                    match kind {
                        KeyEventKind::Press => keys.press(action, frame),
                        KeyEventKind::Repeat => keys.repeat(action, frame),
                        KeyEventKind::Release => keys.release(action),
                    }
                }
                Event::Resize(cols, rows) => canvas.resize(cols, rows),
                _ => {}
            }
        }

        // Checked before the snapshot consumes pending edges
        if keys.quit_requested() {
            info!(frame, score = world.score, "quit requested");
            return Ok(());
        }

        let input = keys.snapshot(frame);
        let dt = last_tick.elapsed().as_secs_f32();
        last_tick = Instant::now();

        let (next, effects) = update(&world, dt, &input, rng);
        dispatch_effects(&effects, &mut *audio);
        world = next;

        render(&world, &mut canvas)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_budget {
            thread::sleep(frame_budget - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_file)?;

    let config = load_config(args.config.as_deref());
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut audio: Box<dyn AudioSink> = if args.mute {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell::new(args.quiet_shots))
    };
    info!(seed = ?args.seed, fps = config.window.target_fps, "starting");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(terminal::SetTitle(&config.window.title))?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, &config, &rx, &mut rng, audio.as_mut());

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(%err, "game loop failed");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ctrl_c_quits_but_plain_c_is_unbound() {
        assert_eq!(
            bind(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
        assert_eq!(bind(KeyCode::Char('c'), KeyModifiers::NONE), None);
    }

    #[test]
    fn arrows_and_letters_share_actions() {
        assert_eq!(bind(KeyCode::Left, KeyModifiers::NONE), Some(Action::Left));
        assert_eq!(bind(KeyCode::Char('A'), KeyModifiers::SHIFT), Some(Action::Left));
        assert_eq!(bind(KeyCode::Char('d'), KeyModifiers::NONE), Some(Action::Right));
        assert_eq!(bind(KeyCode::Char(' '), KeyModifiers::NONE), Some(Action::Fire));
        assert_eq!(bind(KeyCode::Enter, KeyModifiers::NONE), Some(Action::Confirm));
    }
}
