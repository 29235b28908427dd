//! Signals consumed by the session.
//!
//! Every external callback (hotkey service, window focus, launch results,
//! timers, user input) is converted into an [`Event`] and queued onto the
//! control thread. The session handles them strictly one at a time.

use super::timer::TimerId;
use crate::app::Intent;
use crate::domain::{AppEntry, LaunchError, PinId};
use crate::storage::Preferences;

/// Signal families, used to route events through the [`super::SignalHub`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Hotkey,
    Window,
    Input,
    Directory,
    Launch,
    Timer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The hotkey asked the palette to become visible.
    Summon,

    /// The global hotkey was registered under `label`.
    HotkeyRegistered { label: String },

    /// Registering the global hotkey failed.
    HotkeyFailed { reason: String },

    FocusChanged { focused: bool },

    /// The user grabbed the window chrome.
    DragRequested,

    /// New query text from the search box.
    QueryChanged(String),

    Key(Intent),

    /// Pointer click on a row: select it, then confirm.
    Activate { index: usize },

    /// Pin the entry at `path`, or unpin it if already pinned.
    TogglePin { path: String },

    Unpin { id: PinId },
    RenamePin { id: PinId, alias: String },

    /// Move pin `from` immediately before pin `to`.
    ReorderPins { from: PinId, to: PinId },

    OpenSettings,
    UpdatePreferences(Preferences),
    DismissNotice,

    /// The directory provider produced a fresh roster.
    DirectoryRefreshed(Vec<AppEntry>),

    LaunchSucceeded { path: String },
    LaunchFailed { path: String, error: LaunchError },

    TimerElapsed { id: TimerId },
}

impl Event {
    #[must_use]
    pub const fn topic(&self) -> Topic {
        match self {
            Self::Summon | Self::HotkeyRegistered { .. } | Self::HotkeyFailed { .. } => Topic::Hotkey,
            Self::FocusChanged { .. } | Self::DragRequested => Topic::Window,
            Self::DirectoryRefreshed(_) => Topic::Directory,
            Self::LaunchSucceeded { .. } | Self::LaunchFailed { .. } => Topic::Launch,
            Self::TimerElapsed { .. } => Topic::Timer,
            Self::QueryChanged(_)
            | Self::Key(_)
            | Self::Activate { .. }
            | Self::TogglePin { .. }
            | Self::Unpin { .. }
            | Self::RenamePin { .. }
            | Self::ReorderPins { .. }
            | Self::OpenSettings
            | Self::UpdatePreferences(_)
            | Self::DismissNotice => Topic::Input,
        }
    }
}
