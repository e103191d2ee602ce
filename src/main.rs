pub mod alert;
pub mod app_dirs;
pub mod cache;
pub mod exercises;
pub mod runtime;
pub mod session;
pub mod store;
pub mod ui;
pub mod util;

use crate::{
    alert::AlertPulse,
    runtime::{
        BlokEvent, BlokEventSource, Clock, CrosstermEventSource, FixedTicker, Runner, SystemClock,
        Ticker,
    },
    session::{Phase, Session, TickOutcome, SESSION_MS},
    store::{FileListStore, ListStore},
};
use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::{Duration, Instant},
};

const TICK_RATE_MS: u64 = 250;

/// terminal workout block randomizer
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Shuffles your exercise list into a random block and runs a five minute countdown; hit next whenever you are ready for another exercise."
)]
pub struct Cli {
    /// alternate file to use as the exercise list slot
    #[clap(short = 'l', long)]
    list: Option<PathBuf>,

    /// preset used to seed the list when no saved list exists
    #[clap(short = 'p', long, value_enum, default_value_t = SupportedPreset::Bodyweight)]
    preset: SupportedPreset,
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
pub enum SupportedPreset {
    Bodyweight,
    Core,
}

impl SupportedPreset {
    fn as_preset(&self) -> exercises::Preset {
        exercises::Preset::new(self.to_string().to_lowercase())
    }
}

impl Cli {
    /// Build the list store for this invocation
    fn to_store(&self) -> FileListStore {
        let store = match &self.list {
            Some(path) => FileListStore::with_path(path),
            None => FileListStore::new(),
        };
        store.with_seed(self.as_seed_text())
    }

    fn as_seed_text(&self) -> String {
        self.preset.as_preset().as_text()
    }
}

/// Top-level state: the session controller plus the collaborators it talks
/// to (list store, alert pulse) and the raw editor buffer.
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub input: String,
    pub alert: AlertPulse,
    pub notice: Option<String>,
    pub remaining_ms: u64,
    pub flash: bool,
    store: Box<dyn ListStore>,
}

impl App {
    pub fn new(store: Box<dyn ListStore>) -> Self {
        let input = store.load();
        Self {
            session: Session::new(),
            input,
            alert: AlertPulse::new(),
            notice: None,
            remaining_ms: 0,
            flash: false,
            store,
        }
    }

    /// Starts a block from the editor buffer. On success the raw pre-dedup
    /// text is persisted (best effort) so the user's formatting survives a
    /// reload; a validation failure surfaces as a blocking notice and leaves
    /// all state untouched.
    pub fn start_session(&mut self, now: Instant) {
        match self.session.start(&self.input, now) {
            Ok(_) => {
                let _ = self.store.save(&self.input);
                self.notice = None;
                self.remaining_ms = SESSION_MS;
            }
            Err(err) => self.notice = Some(err.to_string()),
        }
    }

    /// Advance control; the surface only enables it while advancing is valid
    pub fn next_exercise(&mut self) {
        if self.session.can_advance() {
            self.session.advance();
        }
    }

    pub fn reset_session(&mut self) {
        self.session.reset();
        self.remaining_ms = 0;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// One periodic probe: recompute the countdown from the wall clock and
    /// drive the alert pulse. Expiry starts the pulse; the bell is attempted
    /// only when stdout is a terminal and failures are ignored.
    pub fn on_tick(&mut self, now: Instant) {
        match self.session.tick(now) {
            TickOutcome::Remaining(ms) => self.remaining_ms = ms,
            TickOutcome::Expired => {
                self.remaining_ms = 0;
                self.alert.start(now);
            }
            TickOutcome::Idle => {}
        }

        self.alert.update(now);
        self.flash = self.alert.is_on(now);
        if self.alert.is_active() && io::stdout().is_tty() {
            let _ = self.alert.ring(now, &mut io::stdout());
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // Offline shell warmup is strictly best effort
    let _ = cache::warm_shell_cache();

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(Box::new(cli.to_store()));
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let res = run_tui(&mut terminal, &mut app, &runner, &SystemClock);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_tui<B: Backend, E: BlokEventSource, T: Ticker, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
    clock: &C,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            BlokEvent::Tick => {
                let was_running = app.session.phase() == Phase::Running;
                app.on_tick(clock.now());

                // Redraw only while something on screen can change
                if was_running || app.alert.is_active() || app.flash {
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            BlokEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            BlokEvent::Key(key) => {
                if handle_key(app, key, clock.now()) {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

/// Dispatches one key to the controller. Returns true when the app should quit.
fn handle_key(app: &mut App, key: KeyEvent, now: Instant) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => true,
            KeyCode::Char('s') => {
                // Starting replaces any running block unconditionally
                app.start_session(now);
                false
            }
            KeyCode::Char('k') => {
                app.clear_input();
                false
            }
            _ => false,
        };
    }

    match app.session.phase() {
        Phase::Idle => match key.code {
            KeyCode::Esc => true,
            KeyCode::Backspace => {
                app.input.pop();
                false
            }
            KeyCode::Enter => {
                app.input.push('\n');
                false
            }
            KeyCode::Char(c) => {
                app.input.push(c);
                false
            }
            _ => false,
        },
        Phase::Running => match key.code {
            KeyCode::Esc => true,
            KeyCode::Char('n') | KeyCode::Char(' ') => {
                app.next_exercise();
                false
            }
            KeyCode::Char('r') => {
                app.reset_session();
                false
            }
            _ => false,
        },
    }
}

fn ui(app: &mut App, f: &mut Frame) {
    ui::screen::current_screen(&app.session.phase()).render(app, f);
}
