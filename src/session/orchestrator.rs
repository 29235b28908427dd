//! The session: one palette's worth of state and the event handler that drives it.
//!
//! [`Session::handle_event`] is the only entry point for change. It consumes a
//! single [`Event`], updates the catalog, pins, preferences and selection, and
//! returns `(needs_render, actions)` for the host to execute. Because every
//! signal is funneled through this one method on one thread, no two handlers
//! can interleave their mutations.
//!
//! # Launch outcome
//!
//! With [`LaunchFailurePolicy::StayOpen`] a confirm only requests the launch;
//! the query is cleared and the window hidden once `LaunchSucceeded` arrives.
//! A `LaunchFailed` leaves the palette untouched and raises a notice. With
//! [`LaunchFailurePolicy::HideAnyway`] the palette clears and hides right
//! away and a later failure is only reported as a notice.

use super::actions::Action;
use super::events::{Event, Topic};
use super::signals::{SignalHub, Subscription};
use super::timer::HideTimer;
use crate::app::{transition, Command, Intent, ListMode, Notice, Overlay, PaletteViewModel, SelectionEvent, SelectionState};
use crate::domain::{AppEntry, PinId};
use crate::ranking::Catalog;
use crate::storage::{PinStore, PreferenceStore, Preferences};
use crate::{Config, LaunchFailurePolicy};
use std::sync::mpsc::Sender;
use std::time::Duration;

const ALL_TOPICS: [Topic; 6] = [
    Topic::Hotkey,
    Topic::Window,
    Topic::Input,
    Topic::Directory,
    Topic::Launch,
    Topic::Timer,
];

pub struct Session {
    catalog: Catalog,
    pins: PinStore,
    preferences: PreferenceStore,
    selection: SelectionState,
    results: Vec<AppEntry>,
    hide_timer: HideTimer,
    hide_delay: Duration,
    launch_failure: LaunchFailurePolicy,
    pending_launch: Option<String>,
    notice: Option<Notice>,
    subscriptions: Vec<Subscription>,
}

impl Session {
    /// Creates a session over `roster`, indexing it once.
    #[must_use]
    pub fn new(config: &Config, roster: Vec<AppEntry>, pins: PinStore, preferences: PreferenceStore) -> Self {
        let catalog = Catalog::new(roster, config.fuzzy, config.max_results);
        let results = catalog.rank("");
        let selection = SelectionState::new(pins.len(), results.len());

        tracing::info!(
            apps = catalog.entries().len(),
            pins = pins.len(),
            policy = ?config.launch_failure,
            "session created"
        );

        Self {
            catalog,
            pins,
            preferences,
            selection,
            results,
            hide_timer: HideTimer::new(),
            hide_delay: config.hide_delay(),
            launch_failure: config.launch_failure,
            pending_launch: None,
            notice: None,
            subscriptions: Vec::new(),
        }
    }

    /// Subscribes to every topic on `hub`, forwarding events into `queue`.
    ///
    /// The receiving end belongs to the control thread, which feeds each
    /// event back into [`Session::handle_event`].
    pub fn attach(&mut self, hub: &mut SignalHub, queue: &Sender<Event>) {
        for topic in ALL_TOPICS {
            let queue = queue.clone();
            let subscription = hub.subscribe(topic, move |event| {
                if queue.send(event.clone()).is_err() {
                    tracing::debug!(?topic, "control thread gone, signal dropped");
                }
            });
            self.subscriptions.push(subscription);
        }
        tracing::debug!(count = self.subscriptions.len(), "session attached");
    }

    /// Releases every subscription and returns the actions that stop
    /// outstanding work (the pending hide timer).
    pub fn teardown(&mut self, hub: &mut SignalHub) -> Vec<Action> {
        for subscription in self.subscriptions.drain(..) {
            hub.unsubscribe(subscription);
        }
        self.pending_launch = None;
        self.cancel_hide_timer().into_iter().collect()
    }

    /// Handles one event.
    ///
    /// Returns whether the view changed and the actions to execute, in order.
    pub fn handle_event(&mut self, event: &Event) -> (bool, Vec<Action>) {
        let _span = tracing::debug_span!("handle_event", topic = ?event.topic()).entered();

        match event {
            Event::Summon => (true, self.summon()),
            Event::HotkeyRegistered { label } => {
                tracing::info!(label = %label, "global hotkey registered");
                self.preferences.set_hotkey_label(label);
                if matches!(self.notice, Some(Notice::HotkeyFailed(_))) {
                    self.notice = None;
                }
                (true, vec![])
            }
            Event::HotkeyFailed { reason } => {
                tracing::warn!(reason = %reason, "global hotkey unavailable");
                self.notice = Some(Notice::HotkeyFailed(reason.clone()));
                (true, vec![])
            }
            Event::FocusChanged { focused } => (false, self.focus_changed(*focused)),
            Event::DragRequested => (false, vec![Action::StartDragging]),
            Event::QueryChanged(query) => {
                self.results = self.catalog.rank(query);
                let edited = SelectionEvent::QueryEdited {
                    query: query.clone(),
                    result_count: self.results.len(),
                };
                self.apply(&edited);
                (true, vec![])
            }
            Event::Key(intent) => (true, self.key(*intent)),
            Event::Activate { index } => {
                if *index >= self.selection.active_len() {
                    tracing::debug!(index = *index, "click outside the active list ignored");
                    return (false, vec![]);
                }
                self.apply(&SelectionEvent::Select(*index));
                (true, self.key(Intent::Confirm))
            }
            Event::TogglePin { path } => (self.toggle_pin(path), vec![]),
            Event::Unpin { id } => {
                let changed = self.pins.remove_pin(*id);
                (self.pins_changed(changed), vec![])
            }
            Event::RenamePin { id, alias } => {
                let changed = self.pins.rename_pin(*id, alias);
                (self.pins_changed(changed), vec![])
            }
            Event::ReorderPins { from, to } => {
                let changed = self.pins.reorder_pins(*from, *to);
                (self.pins_changed(changed), vec![])
            }
            Event::OpenSettings => {
                self.apply(&SelectionEvent::OverlayOpened(Overlay::Settings));
                (true, vec![])
            }
            Event::UpdatePreferences(preferences) => (true, self.update_preferences(preferences.clone())),
            Event::DismissNotice => (self.notice.take().is_some(), vec![]),
            Event::DirectoryRefreshed(entries) => {
                self.catalog.refresh(entries.clone());
                self.rerank();
                (true, vec![])
            }
            Event::LaunchSucceeded { path } => {
                if self.pending_launch.as_deref() == Some(path.as_str()) {
                    self.pending_launch = None;
                    (true, self.clear_and_hide())
                } else {
                    (false, vec![])
                }
            }
            Event::LaunchFailed { path, error } => {
                if self.pending_launch.as_deref() == Some(path.as_str()) {
                    self.pending_launch = None;
                }
                self.notice = Some(Notice::LaunchFailed(error.clone()));
                (true, vec![])
            }
            Event::TimerElapsed { id } => {
                if !self.hide_timer.elapse(*id) {
                    tracing::trace!(%id, "stale timer ignored");
                    return (false, vec![]);
                }
                tracing::debug!("focus lost, hiding");
                (false, self.hide_actions())
            }
        }
    }

    /// Builds the view model for the current state.
    #[must_use]
    pub fn view(&self) -> PaletteViewModel {
        PaletteViewModel::build(
            &self.selection,
            &self.results,
            self.pins.items(),
            self.preferences.get().hotkey_label.as_deref(),
            self.notice.as_ref(),
        )
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Ranked results for the current query.
    #[must_use]
    pub fn results(&self) -> &[AppEntry] {
        &self.results
    }

    #[must_use]
    pub const fn pins(&self) -> &PinStore {
        &self.pins
    }

    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        self.preferences.get()
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn pending_launch(&self) -> Option<&str> {
        self.pending_launch.as_deref()
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Path of the highlighted row in the active list.
    #[must_use]
    pub fn selected_path(&self) -> Option<&str> {
        self.path_at(self.selection.mode(), self.selection.selected_index())
    }

    /// Id of the pin at `index` in display order.
    #[must_use]
    pub fn pin_id_at(&self, index: usize) -> Option<PinId> {
        self.pins.items().get(index).map(|pin| pin.id)
    }

    fn apply(&mut self, event: &SelectionEvent) -> Option<Command> {
        let (next, command) = transition(&self.selection, event);
        self.selection = next;
        command
    }

    fn summon(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.cancel_hide_timer().into_iter().collect();

        self.pending_launch = None;
        self.apply(&SelectionEvent::Reset);
        self.rerank();

        if self.preferences.get().remember_position {
            actions.push(Action::RestorePosition);
        }
        actions.push(Action::ShowWindow);
        actions
    }

    fn focus_changed(&mut self, focused: bool) -> Vec<Action> {
        if focused {
            return self.cancel_hide_timer().into_iter().collect();
        }
        if !self.preferences.get().auto_hide_on_blur {
            return vec![];
        }

        let (replaced, id) = self.hide_timer.start();
        let mut actions: Vec<Action> = replaced.map(|id| Action::CancelTimer { id }).into_iter().collect();
        actions.push(Action::ScheduleTimer {
            id,
            delay: self.hide_delay,
        });
        actions
    }

    fn key(&mut self, intent: Intent) -> Vec<Action> {
        match self.apply(&SelectionEvent::Key(intent)) {
            Some(Command::Launch { mode, index }) => self.launch(mode, index),
            Some(Command::HideWindow) => self.hide_actions(),
            None => {
                if intent == Intent::Cancel && self.selection.query().is_empty() {
                    self.rerank();
                }
                vec![]
            }
        }
    }

    fn launch(&mut self, mode: ListMode, index: usize) -> Vec<Action> {
        let Some(path) = self.path_at(mode, index).map(str::to_string) else {
            tracing::debug!(?mode, index, "nothing to launch");
            return vec![];
        };
        tracing::info!(path = %path, ?mode, "launch requested");

        let mut actions = vec![Action::Launch { path: path.clone() }];
        match self.launch_failure {
            LaunchFailurePolicy::StayOpen => self.pending_launch = Some(path),
            LaunchFailurePolicy::HideAnyway => actions.extend(self.clear_and_hide()),
        }
        actions
    }

    fn path_at(&self, mode: ListMode, index: usize) -> Option<&str> {
        match mode {
            ListMode::Pins => self.pins.items().get(index).map(|pin| pin.path.as_str()),
            ListMode::Search => self.results.get(index).map(|entry| entry.path.as_str()),
        }
    }

    fn toggle_pin(&mut self, path: &str) -> bool {
        let changed = if let Some(id) = self.pins.find_by_path(path).map(|pin| pin.id) {
            self.pins.remove_pin(id)
        } else if let Some(entry) = self.catalog.find(path) {
            self.pins.add_pin(entry)
        } else {
            tracing::debug!(path, "cannot pin unknown application");
            false
        };
        self.pins_changed(changed)
    }

    fn pins_changed(&mut self, changed: bool) -> bool {
        if changed {
            self.apply(&SelectionEvent::PinsChanged {
                pin_count: self.pins.len(),
            });
        }
        changed
    }

    fn update_preferences(&mut self, preferences: Preferences) -> Vec<Action> {
        let auto_hide = preferences.auto_hide_on_blur;
        if !self.preferences.update(preferences) {
            return vec![];
        }
        tracing::info!(preferences = ?self.preferences.get(), "preferences updated");

        if auto_hide {
            vec![]
        } else {
            self.cancel_hide_timer().into_iter().collect()
        }
    }

    fn clear_and_hide(&mut self) -> Vec<Action> {
        self.apply(&SelectionEvent::Reset);
        self.rerank();
        self.hide_actions()
    }

    fn hide_actions(&mut self) -> Vec<Action> {
        let mut actions: Vec<Action> = self.cancel_hide_timer().into_iter().collect();
        if self.preferences.get().remember_position {
            actions.push(Action::SavePosition);
        }
        actions.push(Action::HideWindow);
        actions
    }

    fn cancel_hide_timer(&mut self) -> Option<Action> {
        self.hide_timer.cancel().map(|id| Action::CancelTimer { id })
    }

    fn rerank(&mut self) {
        self.results = self.catalog.rank(self.selection.query());
        self.apply(&SelectionEvent::ResultsChanged {
            result_count: self.results.len(),
        });
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("selection", &self.selection)
            .field("results", &self.results.len())
            .field("pins", &self.pins.len())
            .field("pending_launch", &self.pending_launch)
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}
