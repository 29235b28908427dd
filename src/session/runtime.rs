//! Executes session actions against the collaborators.

use super::actions::Action;
use super::events::Event;
use super::services::{LaunchService, WindowService};
use super::timer::TimerQueue;
use std::time::Instant;

/// Host-side action executor.
///
/// Launch outcomes and elapsed timers come back as [`Event`]s, which the host
/// feeds into the session on the same control thread.
#[derive(Debug)]
pub struct Runtime<L, W> {
    launcher: L,
    window: W,
    timers: TimerQueue,
}

impl<L: LaunchService, W: WindowService> Runtime<L, W> {
    pub fn new(launcher: L, window: W) -> Self {
        Self {
            launcher,
            window,
            timers: TimerQueue::new(),
        }
    }

    /// Runs `actions` in order and returns the events they produced.
    ///
    /// `ShowWindow` also focuses the window, and `HideWindow` goes through
    /// the launcher's `hide`. Timer actions only touch the internal queue;
    /// `now` anchors any deadline scheduled here.
    ///
    /// # Returns
    ///
    /// One `LaunchSucceeded` or `LaunchFailed` per `Launch` action, in
    /// action order. The host publishes them back to the session.
    ///
    /// # Example
    ///
    /// ```
    /// use quicklaunch::session::{LaunchService, Runtime, WindowService};
    /// use quicklaunch::{Action, Event, LaunchError};
    /// use std::time::Instant;
    ///
    /// struct Noop;
    /// impl LaunchService for Noop {
    ///     fn launch(&mut self, _path: &str) -> Result<(), LaunchError> { Ok(()) }
    ///     fn hide(&mut self) {}
    /// }
    /// impl WindowService for Noop {
    ///     fn show(&mut self) {}
    ///     fn set_focus(&mut self) {}
    ///     fn start_dragging(&mut self) {}
    ///     fn save_position(&mut self) {}
    ///     fn restore_position(&mut self) {}
    /// }
    ///
    /// let mut runtime = Runtime::new(Noop, Noop);
    /// let feedback = runtime.execute(vec![Action::Launch { path: "/apps/code".into() }], Instant::now());
    /// assert_eq!(feedback, vec![Event::LaunchSucceeded { path: "/apps/code".into() }]);
    /// ```
    pub fn execute(&mut self, actions: Vec<Action>, now: Instant) -> Vec<Event> {
        let mut feedback = Vec::new();

        for action in actions {
            let _span = tracing::debug_span!("execute_action", action = ?action).entered();

            match action {
                Action::Launch { path } => match self.launcher.launch(&path) {
                    Ok(()) => {
                        tracing::info!(path = %path, "application launched");
                        feedback.push(Event::LaunchSucceeded { path });
                    }
                    Err(error) => {
                        tracing::warn!(path = %path, error = %error, "launch failed");
                        feedback.push(Event::LaunchFailed { path, error });
                    }
                },
                Action::ShowWindow => {
                    self.window.show();
                    self.window.set_focus();
                }
                Action::HideWindow => self.launcher.hide(),
                Action::SavePosition => self.window.save_position(),
                Action::RestorePosition => self.window.restore_position(),
                Action::StartDragging => self.window.start_dragging(),
                Action::ScheduleTimer { id, delay } => self.timers.schedule(id, delay, now),
                Action::CancelTimer { id } => self.timers.cancel(id),
            }
        }

        feedback
    }

    /// Elapsed timers as events, earliest first.
    pub fn due_timers(&mut self, now: Instant) -> Vec<Event> {
        self.timers
            .take_due(now)
            .into_iter()
            .map(|id| Event::TimerElapsed { id })
            .collect()
    }

    #[must_use]
    pub const fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn window(&self) -> &W {
        &self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LaunchError;
    use crate::session::TimerId;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeLauncher {
        launched: Vec<String>,
        hidden: usize,
    }

    impl LaunchService for FakeLauncher {
        fn launch(&mut self, path: &str) -> Result<(), LaunchError> {
            if path.is_empty() {
                return Err(LaunchError::EmptyPath);
            }
            self.launched.push(path.to_string());
            Ok(())
        }

        fn hide(&mut self) {
            self.hidden += 1;
        }
    }

    #[derive(Default)]
    struct FakeWindow {
        calls: Vec<&'static str>,
    }

    impl WindowService for FakeWindow {
        fn show(&mut self) {
            self.calls.push("show");
        }
        fn set_focus(&mut self) {
            self.calls.push("focus");
        }
        fn start_dragging(&mut self) {
            self.calls.push("drag");
        }
        fn save_position(&mut self) {
            self.calls.push("save");
        }
        fn restore_position(&mut self) {
            self.calls.push("restore");
        }
    }

    fn runtime() -> Runtime<FakeLauncher, FakeWindow> {
        Runtime::new(FakeLauncher::default(), FakeWindow::default())
    }

    #[test]
    fn launch_outcomes_come_back_as_events() {
        let mut runtime = runtime();
        let actions = vec![
            Action::Launch { path: "/apps/code".into() },
            Action::Launch { path: String::new() },
        ];

        let feedback = runtime.execute(actions, Instant::now());
        assert_eq!(
            feedback,
            vec![
                Event::LaunchSucceeded { path: "/apps/code".into() },
                Event::LaunchFailed {
                    path: String::new(),
                    error: LaunchError::EmptyPath,
                },
            ]
        );
        assert_eq!(runtime.launcher().launched, ["/apps/code"]);
    }

    #[test]
    fn window_actions_run_in_order() {
        let mut runtime = runtime();
        let actions = vec![
            Action::RestorePosition,
            Action::ShowWindow,
            Action::StartDragging,
            Action::SavePosition,
            Action::HideWindow,
        ];

        assert!(runtime.execute(actions, Instant::now()).is_empty());
        assert_eq!(runtime.window().calls, ["restore", "show", "focus", "drag", "save"]);
        assert_eq!(runtime.launcher().hidden, 1);
    }

    #[test]
    fn scheduled_timers_elapse_unless_cancelled() {
        let mut runtime = runtime();
        let start = Instant::now();
        let delay = Duration::from_millis(150);
        let actions = vec![
            Action::ScheduleTimer { id: TimerId(1), delay },
            Action::ScheduleTimer { id: TimerId(2), delay },
            Action::CancelTimer { id: TimerId(1) },
        ];
        runtime.execute(actions, start);

        assert!(runtime.due_timers(start).is_empty());
        assert_eq!(
            runtime.due_timers(start + delay),
            vec![Event::TimerElapsed { id: TimerId(2) }]
        );
        assert!(runtime.timers().is_empty());
    }
}
