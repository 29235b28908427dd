//! Cancellable timers.
//!
//! [`HideTimer`] is the session's handle on the focus-loss debounce. Each
//! start mints a fresh [`TimerId`]; an elapsed event only counts if its id is
//! still the pending one, so a timer that was cancelled or replaced can never
//! hide the window even if the host delivers it late.
//!
//! [`TimerQueue`] is the host side: a list of deadlines polled by the event
//! loop.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer-{}", self.0)
    }
}

/// At most one pending debounce timer.
#[derive(Debug, Default)]
pub struct HideTimer {
    next_id: u64,
    pending: Option<TimerId>,
}

impl HideTimer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new timer, replacing any pending one.
    ///
    /// Returns the replaced id (which the host must cancel) and the new id.
    pub fn start(&mut self) -> (Option<TimerId>, TimerId) {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        (self.pending.replace(id), id)
    }

    /// Clears the pending timer, returning its id if there was one.
    pub fn cancel(&mut self) -> Option<TimerId> {
        self.pending.take()
    }

    /// Consumes an elapsed notification.
    ///
    /// `true` only if `id` is the pending timer; stale ids are ignored.
    pub fn elapse(&mut self, id: TimerId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub const fn pending(&self) -> Option<TimerId> {
        self.pending
    }
}

/// Deadlines waiting to be delivered as `TimerElapsed` events.
#[derive(Debug, Default)]
pub struct TimerQueue {
    deadlines: Vec<(Instant, TimerId)>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, id: TimerId, delay: Duration, now: Instant) {
        self.cancel(id);
        self.deadlines.push((now + delay, id));
    }

    pub fn cancel(&mut self, id: TimerId) {
        self.deadlines.retain(|(_, pending)| *pending != id);
    }

    /// Time left until the earliest deadline, `None` when idle.
    #[must_use]
    pub fn next_wait(&self, now: Instant) -> Option<Duration> {
        self.deadlines
            .iter()
            .map(|(deadline, _)| deadline.saturating_duration_since(now))
            .min()
    }

    /// Removes and returns every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<TimerId> {
        let mut due: Vec<(Instant, TimerId)> = Vec::new();
        self.deadlines.retain(|&(deadline, id)| {
            if deadline <= now {
                due.push((deadline, id));
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}
