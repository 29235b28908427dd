//! Side effects requested by the session.
//!
//! The session never calls a collaborator directly. [`super::Session::handle_event`]
//! returns a `Vec<Action>` that the host executes in order, which keeps the
//! session testable without windows, processes or clocks.

use super::timer::TimerId;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Start the application at `path`.
    ///
    /// The host reports back with `LaunchSucceeded` or `LaunchFailed`.
    Launch { path: String },

    /// Bring the window up and give it focus.
    ShowWindow,

    /// Best-effort hide.
    HideWindow,

    SavePosition,
    RestorePosition,
    StartDragging,

    /// Deliver `TimerElapsed { id }` after `delay`.
    ScheduleTimer { id: TimerId, delay: Duration },

    /// Drop the pending timer `id`; it must never fire.
    CancelTimer { id: TimerId },
}
