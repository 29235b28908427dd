use quicklaunch::app::{Intent, ListMode};
use quicklaunch::session::{LaunchService, Runtime, SignalHub, WindowService};
use quicklaunch::storage::MemoryStore;
use quicklaunch::{Action, AppEntry, Config, Event, LaunchError, Session};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

#[derive(Default)]
struct Launcher {
    launched: Vec<String>,
    hidden: usize,
}

impl LaunchService for Launcher {
    fn launch(&mut self, path: &str) -> Result<(), LaunchError> {
        if path.ends_with("broken") {
            return Err(LaunchError::MissingTarget(path.to_string()));
        }
        self.launched.push(path.to_string());
        Ok(())
    }

    fn hide(&mut self) {
        self.hidden += 1;
    }
}

#[derive(Default)]
struct Window {
    shown: usize,
}

impl WindowService for Window {
    fn show(&mut self) {
        self.shown += 1;
    }
    fn set_focus(&mut self) {}
    fn start_dragging(&mut self) {}
    fn save_position(&mut self) {}
    fn restore_position(&mut self) {}
}

/// A control thread in miniature: hub, queue, session and runtime.
struct Harness {
    session: Session,
    hub: SignalHub,
    queue: Receiver<Event>,
    runtime: Runtime<Launcher, Window>,
    now: Instant,
}

impl Harness {
    fn new() -> Self {
        let roster = vec![
            AppEntry::new("Google Chrome", "/apps/chrome", "Programs"),
            AppEntry::new("Visual Studio Code", "/apps/code", "Programs"),
            AppEntry::new("Broken Tool", "/apps/broken", "Utilities"),
        ];
        let mut session = quicklaunch::initialize(&Config::default(), roster, &MemoryStore::new());
        let mut hub = SignalHub::new();
        let (tx, queue) = mpsc::channel();
        session.attach(&mut hub, &tx);

        Self {
            session,
            hub,
            queue,
            runtime: Runtime::new(Launcher::default(), Window::default()),
            now: Instant::now(),
        }
    }

    fn signal(&mut self, event: Event) {
        self.hub.publish(&event);
        self.drain();
    }

    fn advance(&mut self, by: Duration) {
        self.now += by;
        for event in self.runtime.due_timers(self.now) {
            self.hub.publish(&event);
        }
        self.drain();
    }

    fn drain(&mut self) {
        while let Ok(event) = self.queue.try_recv() {
            let (_, actions) = self.session.handle_event(&event);
            for feedback in self.runtime.execute(actions, self.now) {
                self.hub.publish(&feedback);
            }
        }
    }
}

#[test]
fn focus_regained_within_debounce_never_hides() {
    let mut harness = Harness::new();
    harness.signal(Event::Summon);

    harness.signal(Event::FocusChanged { focused: false });
    harness.advance(Duration::from_millis(149));
    harness.signal(Event::FocusChanged { focused: true });
    harness.advance(Duration::from_millis(500));

    assert_eq!(harness.runtime.launcher().hidden, 0);
    assert!(harness.runtime.timers().is_empty());
}

#[test]
fn focus_loss_hides_after_the_delay() {
    let mut harness = Harness::new();
    harness.signal(Event::FocusChanged { focused: false });

    harness.advance(Duration::from_millis(100));
    assert_eq!(harness.runtime.launcher().hidden, 0);

    harness.advance(Duration::from_millis(50));
    assert_eq!(harness.runtime.launcher().hidden, 1);
}

#[test]
fn summon_racing_a_blur_cancels_the_hide() {
    let mut harness = Harness::new();
    harness.signal(Event::QueryChanged("chr".into()));
    harness.signal(Event::FocusChanged { focused: false });
    harness.signal(Event::Summon);
    harness.advance(Duration::from_secs(1));

    assert_eq!(harness.runtime.launcher().hidden, 0);
    assert_eq!(harness.runtime.window().shown, 1);
    assert_eq!(harness.session.selection().query(), "");
}

#[test]
fn successful_launch_clears_and_hides() {
    let mut harness = Harness::new();
    harness.signal(Event::QueryChanged("vsc".into()));
    harness.signal(Event::Key(Intent::Confirm));

    assert_eq!(harness.runtime.launcher().launched, ["/apps/code"]);
    assert_eq!(harness.runtime.launcher().hidden, 1);
    assert_eq!(harness.session.selection().query(), "");
    assert_eq!(harness.session.selection().mode(), ListMode::Pins);
}

#[test]
fn failed_launch_stays_open_with_notice() {
    let mut harness = Harness::new();
    harness.signal(Event::QueryChanged("broken".into()));
    harness.signal(Event::Key(Intent::Confirm));

    assert_eq!(harness.runtime.launcher().hidden, 0);
    assert_eq!(harness.session.selection().query(), "broken");
    let view = harness.session.view();
    assert!(view.notice.unwrap().message().contains("/apps/broken"));
}

#[test]
fn pinned_entry_is_offered_on_empty_query() {
    let mut harness = Harness::new();
    harness.signal(Event::TogglePin { path: "/apps/code".into() });
    harness.signal(Event::Summon);

    let view = harness.session.view();
    assert_eq!(view.mode, ListMode::Pins);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.selected_row().map(|row| row.path.as_str()), Some("/apps/code"));

    harness.signal(Event::Key(Intent::Confirm));
    assert_eq!(harness.runtime.launcher().launched, ["/apps/code"]);
}

#[test]
fn teardown_stops_delivery() {
    let mut harness = Harness::new();
    harness.signal(Event::FocusChanged { focused: false });

    let actions = harness.session.teardown(&mut harness.hub);
    assert!(matches!(actions.as_slice(), [Action::CancelTimer { .. }]));
    harness.runtime.execute(actions, harness.now);

    harness.signal(Event::Summon);
    harness.advance(Duration::from_secs(1));
    assert_eq!(harness.runtime.window().shown, 0);
    assert_eq!(harness.runtime.launcher().hidden, 0);
}
