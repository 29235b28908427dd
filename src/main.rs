//! Headless host for the quicklaunch core.
//!
//! The binary wires the library to real collaborators and drives it from
//! stdin, one command per line. It is the reference for how a windowed
//! front end plugs in:
//!
//! ```text
//! stdin reader thread ──► input channel ──► control thread
//!                                              │ parse line
//!                                              ▼
//!                                   SignalHub::publish(event)
//!                                              │ subscription
//!                                              ▼
//!                          event queue ──► Session::handle_event
//!                                              │ actions
//!                                              ▼
//!                      Runtime (ProcessLauncher, ConsoleWindow, timers)
//! ```
//!
//! # Commands
//!
//! - `summon`, `blur`, `focus`, `drag`: window and hotkey signals
//! - `hotkey <label>`, `hotkey-failed <reason>`: hotkey registration results
//! - `type <text>`, `clear`: replace the query
//! - `down`, `up`, `tab`, `backtab`, `enter`, `esc`: keyboard intents
//! - `click <row>`: select and launch a row
//! - `pin [row]`: toggle the pin of a row (default: highlighted row)
//! - `unpin <n>`, `rename <n> <alias>`, `move <from> <to>`: edit pins by position
//! - `settings`, `set <key> <value>`, `dismiss`, `refresh`, `quit`

#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use quicklaunch::app::{Intent, ListMode, PaletteViewModel};
use quicklaunch::session::{
    DirectoryProvider, LaunchService, Runtime, SignalHub, WindowService,
};
use quicklaunch::storage::{JsonFileStore, MemoryStore, Preferences};
use quicklaunch::{AppEntry, Config, Event, LaunchError, QuickLaunchError, Session};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "quicklaunch",
    version,
    about = "Headless quick-launch palette driven by stdin commands"
)]
struct CliArgs {
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = "QUICKLAUNCH_CONFIG",
        help = "TOML configuration file (default: built-in defaults)"
    )]
    config: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "JSON roster of applications: [{\"name\", \"path\", \"category\"}] (default: empty)"
    )]
    apps: Option<PathBuf>,

    #[arg(long, help = "Validate launch targets without starting them")]
    dry_run: bool,

    #[arg(
        value_name = "KEY=VALUE",
        value_parser = parse_override,
        help = "Config overrides, e.g. fuzzy.threshold=0.3"
    )]
    overrides: Vec<(String, String)>,
}

fn parse_override(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

/// Reads the roster from a JSON file.
struct JsonRosterProvider {
    path: Option<PathBuf>,
}

impl DirectoryProvider for JsonRosterProvider {
    fn list_applications(&mut self) -> quicklaunch::Result<Vec<AppEntry>> {
        let Some(path) = &self.path else {
            return Ok(Vec::new());
        };
        let text = std::fs::read_to_string(path)
            .map_err(|e| QuickLaunchError::Directory(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| QuickLaunchError::Directory(format!("{}: {e}", path.display())))
    }
}

/// Starts targets with the platform opener.
struct ProcessLauncher {
    dry_run: bool,
}

impl ProcessLauncher {
    fn opener(path: &str) -> std::process::Command {
        let mut command = if cfg!(target_os = "windows") {
            let mut command = std::process::Command::new("cmd");
            command.args(["/C", "start", ""]);
            command
        } else if cfg!(target_os = "macos") {
            std::process::Command::new("open")
        } else {
            std::process::Command::new("xdg-open")
        };
        command.arg(path);
        command
    }
}

impl LaunchService for ProcessLauncher {
    fn launch(&mut self, path: &str) -> Result<(), LaunchError> {
        if path.trim().is_empty() {
            return Err(LaunchError::EmptyPath);
        }
        if !Path::new(path).exists() {
            return Err(LaunchError::MissingTarget(path.to_string()));
        }
        if self.dry_run {
            println!("(dry run) would launch {path}");
            return Ok(());
        }

        Self::opener(path)
            .spawn()
            .map(drop)
            .map_err(|e| LaunchError::Spawn {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }

    fn hide(&mut self) {
        println!("(palette hidden)");
    }
}

/// Stand-in window that only reports what a real one would do.
#[derive(Default)]
struct ConsoleWindow {
    visible: bool,
    saved_position: bool,
}

impl WindowService for ConsoleWindow {
    fn show(&mut self) {
        self.visible = true;
        println!("(palette shown)");
    }

    fn set_focus(&mut self) {
        tracing::debug!(visible = self.visible, "focus requested");
    }

    fn start_dragging(&mut self) {
        println!("(dragging)");
    }

    fn save_position(&mut self) {
        self.saved_position = true;
        tracing::debug!("window position saved");
    }

    fn restore_position(&mut self) {
        if self.saved_position {
            println!("(restored saved position)");
        } else {
            println!("(centered)");
        }
    }
}

enum Input {
    Line(String),
    Closed,
}

enum HostCommand {
    Signal(Event),
    Quit,
}

fn main() -> quicklaunch::Result<()> {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let overrides: BTreeMap<String, String> = args.overrides.iter().cloned().collect();
    config.apply_overrides(&overrides);
    config.validate()?;

    quicklaunch::observability::init_tracing(&config);
    let _span = tracing::info_span!("quicklaunch_host").entered();

    let mut provider = JsonRosterProvider { path: args.apps.clone() };
    let roster = provider.list_applications()?;

    let mut session = match JsonFileStore::open(config.data_dir()) {
        Ok(store) => quicklaunch::initialize(&config, roster, &store),
        Err(e) => {
            tracing::warn!(error = %e, "data directory unusable, pins will not persist");
            eprintln!("warning: {e}; pins and preferences will not persist");
            quicklaunch::initialize(&config, roster, &MemoryStore::new())
        }
    };

    let mut hub = SignalHub::new();
    let (event_tx, event_rx) = mpsc::channel();
    session.attach(&mut hub, &event_tx);
    drop(event_tx);

    let mut runtime = Runtime::new(ProcessLauncher { dry_run: args.dry_run }, ConsoleWindow::default());
    let input = spawn_stdin_reader();

    print_view(&session.view());
    loop {
        let received = match runtime.timers().next_wait(Instant::now()) {
            Some(wait) => input.recv_timeout(wait),
            None => input.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(Input::Line(line)) => match parse_command(&line, &session, &mut provider) {
                Ok(Some(HostCommand::Signal(event))) => {
                    hub.publish(&event);
                }
                Ok(Some(HostCommand::Quit)) => break,
                Ok(None) => {}
                Err(message) => eprintln!("error: {message}"),
            },
            Ok(Input::Closed) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        for elapsed in runtime.due_timers(Instant::now()) {
            hub.publish(&elapsed);
        }
        drain(&mut session, &mut runtime, &mut hub, &event_rx);
    }

    let actions = session.teardown(&mut hub);
    runtime.execute(actions, Instant::now());
    tracing::info!("host shut down");
    Ok(())
}

fn spawn_stdin_reader() -> Receiver<Input> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || read_lines(&tx));
    rx
}

fn read_lines(tx: &Sender<Input>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if tx.send(Input::Line(line)).is_err() {
            return;
        }
    }
    let _ = tx.send(Input::Closed);
}

/// Feeds queued events to the session until the queue is empty.
///
/// Launch results produced while executing actions are published back
/// through the hub, so they are handled in the same pass.
fn drain<L: LaunchService, W: WindowService>(
    session: &mut Session,
    runtime: &mut Runtime<L, W>,
    hub: &mut SignalHub,
    events: &Receiver<Event>,
) {
    let mut render = false;
    while let Ok(event) = events.try_recv() {
        let (changed, actions) = session.handle_event(&event);
        render |= changed;
        for feedback in runtime.execute(actions, Instant::now()) {
            hub.publish(&feedback);
        }
    }
    if render {
        print_view(&session.view());
    }
}

fn parse_command(
    line: &str,
    session: &Session,
    provider: &mut JsonRosterProvider,
) -> Result<Option<HostCommand>, String> {
    let line = line.trim();
    let (verb, rest) = line.split_once(' ').unwrap_or((line, ""));
    let rest = rest.trim();

    let event = match verb {
        "" => return Ok(None),
        "quit" | "exit" => return Ok(Some(HostCommand::Quit)),
        "summon" => Event::Summon,
        "blur" => Event::FocusChanged { focused: false },
        "focus" => Event::FocusChanged { focused: true },
        "drag" => Event::DragRequested,
        "hotkey" => Event::HotkeyRegistered { label: rest.to_string() },
        "hotkey-failed" => Event::HotkeyFailed { reason: rest.to_string() },
        "type" => Event::QueryChanged(rest.to_string()),
        "clear" => Event::QueryChanged(String::new()),
        "down" => Event::Key(Intent::MoveDown),
        "up" => Event::Key(Intent::MoveUp),
        "tab" => Event::Key(Intent::Tab),
        "backtab" => Event::Key(Intent::BackTab),
        "enter" => Event::Key(Intent::Confirm),
        "esc" => Event::Key(Intent::Cancel),
        "click" => Event::Activate { index: parse_index(rest)? },
        "pin" => {
            let view = session.view();
            let row = if rest.is_empty() {
                view.selected_row()
            } else {
                view.rows.get(parse_index(rest)?)
            };
            let path = row.map(|row| row.path.clone()).ok_or("no such row")?;
            Event::TogglePin { path }
        }
        "unpin" => Event::Unpin { id: pin_at(session, rest)? },
        "rename" => {
            let (position, alias) = rest.split_once(' ').ok_or("usage: rename <n> <alias>")?;
            Event::RenamePin {
                id: pin_at(session, position)?,
                alias: alias.to_string(),
            }
        }
        "move" => {
            let (from, to) = rest.split_once(' ').ok_or("usage: move <from> <to>")?;
            Event::ReorderPins {
                from: pin_at(session, from)?,
                to: pin_at(session, to)?,
            }
        }
        "settings" => Event::OpenSettings,
        "set" => Event::UpdatePreferences(edit_preferences(session.preferences(), rest)?),
        "dismiss" => Event::DismissNotice,
        "refresh" => {
            let roster = provider.list_applications().map_err(|e| e.to_string())?;
            Event::DirectoryRefreshed(roster)
        }
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(Some(HostCommand::Signal(event)))
}

fn parse_index(raw: &str) -> Result<usize, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("expected a row number, got '{raw}'"))
}

fn pin_at(session: &Session, raw: &str) -> Result<quicklaunch::PinId, String> {
    let index = parse_index(raw)?;
    session
        .pin_id_at(index)
        .ok_or_else(|| format!("no pin at position {index}"))
}

fn edit_preferences(current: &Preferences, rest: &str) -> Result<Preferences, String> {
    let (key, value) = rest.split_once(' ').ok_or("usage: set <key> <value>")?;
    let value = value.trim();
    let flag = || match value {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("expected on/off, got '{value}'")),
    };

    let mut next = current.clone();
    match key {
        "language" => next.language = value.to_string(),
        "auto_hide" | "auto_hide_on_blur" => next.auto_hide_on_blur = flag()?,
        "remember_position" => next.remember_position = flag()?,
        other => return Err(format!("unknown preference '{other}'")),
    }
    Ok(next)
}

fn print_view(view: &PaletteViewModel) {
    let mode = match view.mode {
        ListMode::Pins => "pins",
        ListMode::Search => "search",
    };
    println!("[{mode}] query: {:?}", view.query);
    if let Some(notice) = &view.notice {
        println!("  ! {}", notice.message());
    }
    if view.overlay.is_some() {
        println!("  (settings open)");
    }
    if view.rows.is_empty() {
        println!("  (no results)");
    }
    for (index, row) in view.rows.iter().enumerate() {
        let cursor = if row.is_selected { '>' } else { ' ' };
        let pin = if row.is_pinned { '*' } else { ' ' };
        println!("{cursor}{pin}{index:>2} {:<32} {}", row.label, row.detail);
    }
    if let Some(label) = &view.hotkey_label {
        println!("  hotkey: {label}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        let roster = vec![
            AppEntry::new("Google Chrome", "/apps/chrome", "Programs"),
            AppEntry::new("Visual Studio Code", "/apps/code", "Programs"),
        ];
        quicklaunch::initialize(&Config::default(), roster, &MemoryStore::new())
    }

    fn parse(line: &str, session: &Session) -> Result<Option<HostCommand>, String> {
        parse_command(line, session, &mut JsonRosterProvider { path: None })
    }

    #[test]
    fn overrides_need_an_equals_sign() {
        assert_eq!(
            parse_override("fuzzy.threshold=0.3"),
            Ok(("fuzzy.threshold".to_string(), "0.3".to_string()))
        );
        assert!(parse_override("fuzzy.threshold").is_err());
    }

    #[test]
    fn pin_targets_highlighted_row() {
        let mut session = session();
        session.handle_event(&Event::QueryChanged("code".into()));

        match parse("pin", &session) {
            Ok(Some(HostCommand::Signal(Event::TogglePin { path }))) => assert_eq!(path, "/apps/code"),
            _ => panic!("expected a pin toggle"),
        }
    }

    #[test]
    fn pin_edits_need_existing_positions() {
        let session = session();
        assert!(parse("unpin 0", &session).is_err());
        assert!(parse("rename 0", &session).is_err());
        assert!(parse("bogus", &session).is_err());
        assert!(matches!(parse("quit", &session), Ok(Some(HostCommand::Quit))));
    }

    #[test]
    fn preference_edits() {
        let prefs = Preferences::default();
        let next = edit_preferences(&prefs, "auto_hide off").unwrap();
        assert!(!next.auto_hide_on_blur);
        assert!(edit_preferences(&prefs, "auto_hide maybe").is_err());
        assert!(edit_preferences(&prefs, "volume 11").is_err());
    }
}
