mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, KeyboardEnhancementFlags, MouseEvent, MouseEventKind,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;

use galaxia::compute::{init_state, tick, TickInput};
use galaxia::config::{Config, GameConfig, ParticleConfig};
use galaxia::entities::{GameStatus, Session};
use galaxia::flow::{advance, FlowEvent, MenuChoice, Screen, SelectPurpose, ShipSelection, Stat};
use galaxia::logging;
use galaxia::motion::Steer;
use galaxia::particles::ParticleField;
use galaxia::GalaxiaError;

use display::Viewport;

/// Terminal arcade shooter with a particle-field demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file overriding the default tuning
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Log destination (defaults to galaxia.log in the temp directory)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seed the random generator for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Play the shooter (default)
    Play,
    /// Run the mouse-reactive particle field
    Particles,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// Min ticks between shots while Space is held (6 shots/sec at 60 Hz).
const SHOOT_COOLDOWN: u32 = 10;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many ticks.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 ticks at 60 Hz (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// How long the game-over screen stays up without a key press.
const GAME_OVER_HOLD: Duration = Duration::from_secs(3);

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn is_quit(code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Blocks until the next key press.  A closed channel reads as `Esc`.
fn next_key(rx: &mpsc::Receiver<Event>) -> (KeyCode, KeyModifiers) {
    loop {
        match rx.recv() {
            Ok(Event::Key(KeyEvent {
                code,
                modifiers,
                kind: KeyEventKind::Press,
                ..
            })) => return (code, modifiers),
            Ok(_) => {}
            Err(_) => return (KeyCode::Esc, KeyModifiers::NONE),
        }
    }
}

fn tick_length(config: &GameConfig) -> Duration {
    Duration::from_secs_f64(config.tick_ms() / 1000.0)
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn show_menu<W: Write>(out: &mut W, rx: &mpsc::Receiver<Event>) -> std::io::Result<FlowEvent> {
    display::screens::draw_menu(out)?;

    // Block until the user makes a choice
    loop {
        let (code, modifiers) = next_key(rx);
        match code {
            KeyCode::Char('1') | KeyCode::Enter => return Ok(FlowEvent::Menu(MenuChoice::Start)),
            KeyCode::Char('2') => return Ok(FlowEvent::Menu(MenuChoice::Hangar)),
            KeyCode::Char('3') => return Ok(FlowEvent::Menu(MenuChoice::Quit)),
            code if is_quit(code, modifiers) => return Ok(FlowEvent::Abort),
            _ => {}
        }
    }
}

// ── Hangar ────────────────────────────────────────────────────────────────────

fn ship_select<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    selection: &mut ShipSelection,
    purpose: SelectPurpose,
) -> std::io::Result<FlowEvent> {
    loop {
        display::screens::draw_ship_select(out, selection, purpose)?;
        let (code, modifiers) = next_key(rx);
        match code {
            KeyCode::Up | KeyCode::Left => selection.previous(),
            KeyCode::Down | KeyCode::Right => selection.next(),
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                selection.spend(Stat::Speed);
            }
            KeyCode::Char('w') | KeyCode::Char('W') => {
                selection.spend(Stat::Shield);
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                selection.spend(Stat::FirePower);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => selection.reset_points(),
            KeyCode::Char(' ') | KeyCode::Enter => return Ok(FlowEvent::Confirm),
            code if is_quit(code, modifiers) => return Ok(FlowEvent::Abort),
            _ => {}
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Plays one session until the shield runs out (`Defeated`) or the player
/// quits (`Abort`).
///
/// Input model: a `key_frame` map records the tick of the last press/repeat
/// event for every key.  Each tick we check which keys are still "fresh"
/// (within `HOLD_WINDOW` ticks) and apply all their effects together, so
/// Space and the arrows can be held at the same time.  Terminals with
/// keyboard enhancement also send `Release`, which drops the key at once.
fn game_loop<W: Write>(
    out: &mut W,
    state: &mut Session,
    rx: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> std::io::Result<FlowEvent> {
    let tick_len = tick_length(&state.config);
    let (world_w, world_h) = (state.config.width, state.config.height);
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, world_w, world_h);

    // Maps each held key → the tick it was last seen (press or repeat).
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut shoot_cooldown: u32 = 0;
    let mut frame: u64 = 0;
    let started = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut shield = false;
        let mut blast = false;
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind,
                    modifiers,
                    ..
                }) => match kind {
                    KeyEventKind::Press => {
                        if is_quit(code, modifiers) {
                            return Ok(FlowEvent::Abort);
                        }
                        match code {
                            KeyCode::Char('b') | KeyCode::Char('B') => shield = true,
                            KeyCode::Char('n') | KeyCode::Char('N') => blast = true,
                            _ => {}
                        }
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Repeat => {
                        key_frame.insert(code, frame);
                    }
                    KeyEventKind::Release => {
                        key_frame.remove(&code);
                    }
                },
                Event::Resize(cols, rows) => view = Viewport::new(cols, rows, world_w, world_h),
                _ => {}
            }
        }

        // ── Held keys → this tick's input ─────────────────────────────────────
        let held = |keys: &[KeyCode]| keys.iter().any(|k| is_held(&key_frame, k, frame));
        let steer = Steer {
            left: held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
            up: held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')]),
            down: held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')]),
        };
        let fire = shoot_cooldown == 0 && held(&[KeyCode::Char(' ')]);
        if fire {
            shoot_cooldown = SHOOT_COOLDOWN;
        }
        shoot_cooldown = shoot_cooldown.saturating_sub(1);

        let input = TickInput {
            steer,
            fire,
            shield,
            blast,
            now_ms: started.elapsed().as_millis() as u64,
        };
        *state = tick(state, &input, rng);
        display::render(out, state, &view)?;

        if state.status == GameStatus::GameOver {
            return Ok(FlowEvent::Defeated);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < tick_len {
            thread::sleep(tick_len - elapsed);
        }
    }
}

// ── Game over ─────────────────────────────────────────────────────────────────

/// Shows the final frame until a key is pressed or `GAME_OVER_HOLD` passes.
fn game_over<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    session: Option<&Session>,
) -> std::io::Result<FlowEvent> {
    if let Some(session) = session {
        let mut last = session.clone();
        last.status = GameStatus::GameOver;
        let (cols, rows) = terminal::size()?;
        let view = Viewport::new(cols, rows, last.config.width, last.config.height);
        display::render(out, &last, &view)?;
    }

    // Keys still held from the game would dismiss the screen at once
    while rx.try_recv().is_ok() {}

    let deadline = Instant::now() + GAME_OVER_HOLD;
    loop {
        let left = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(left) {
            Ok(Event::Key(KeyEvent {
                kind: KeyEventKind::Press,
                ..
            })) => return Ok(FlowEvent::Dismissed),
            Ok(_) => {}
            Err(_) => return Ok(FlowEvent::Dismissed),
        }
    }
}

// ── Screen flow ───────────────────────────────────────────────────────────────

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &GameConfig,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut screen = Screen::Menu;
    let mut selection = ShipSelection::new();
    let mut session: Option<Session> = None;

    loop {
        let event = match screen {
            Screen::Menu => {
                session = None;
                show_menu(out, rx)?
            }
            Screen::ShipSelect(purpose) => ship_select(out, rx, &mut selection, purpose)?,
            Screen::Playing => {
                let mut state = init_state(config, selection.loadout(), rng);
                let event = game_loop(out, &mut state, rx, rng)?;
                session = Some(state);
                event
            }
            Screen::GameOver => game_over(out, rx, session.as_ref())?,
            Screen::Exit => break,
        };
        let next = advance(screen, event);
        debug!("{screen:?} --{event:?}--> {next:?}");
        screen = next;
    }
    Ok(())
}

// ── Particle mode ─────────────────────────────────────────────────────────────

fn particle_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: &ParticleConfig,
    tick_len: Duration,
    rng: &mut StdRng,
) -> std::io::Result<()> {
    let mut field = ParticleField::new(config.clone(), rng);
    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, config.width, config.height);
    let mut cursor_at = None;
    info!("particle field with {} particles", field.particles().len());

    loop {
        let frame_start = Instant::now();

        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    modifiers,
                    kind: KeyEventKind::Press,
                    ..
                }) if is_quit(code, modifiers) => return Ok(()),
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
                    column,
                    row,
                    ..
                }) => cursor_at = Some(view.to_world(column, row)),
                Event::Resize(cols, rows) => {
                    view = Viewport::new(cols, rows, config.width, config.height);
                }
                _ => {}
            }
        }

        field.step(cursor_at, rng);
        display::particles::render(out, &field, &view, cursor_at)?;

        let elapsed = frame_start.elapsed();
        if elapsed < tick_len {
            thread::sleep(tick_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GalaxiaError> {
    let args = Args::parse();
    let log_path = args.log_file.clone().unwrap_or_else(logging::default_log_path);
    logging::init(args.verbose, &log_path)?;

    let config = Config::load(args.config.as_deref())?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mode = args.mode.unwrap_or(Mode::Play);
    info!("starting {mode:?} mode, seed {:?}", args.seed);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    if mode == Mode::Particles {
        out.execute(EnableMouseCapture)?;
    }

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

    let result = match mode {
        Mode::Play => run(&mut out, &rx, &config.game, &mut rng),
        Mode::Particles => {
            let tick_len = tick_length(&config.game);
            particle_loop(&mut out, &rx, &config.particles, tick_len, &mut rng)
        }
    };

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    if mode == Mode::Particles {
        let _ = out.execute(DisableMouseCapture);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        error!("terminal session failed: {e}");
    }
    info!("exiting");
    result.map_err(GalaxiaError::from)
}
