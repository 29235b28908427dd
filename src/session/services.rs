//! Collaborator contracts.
//!
//! The core never scans the OS, spawns processes or moves windows itself. It
//! talks to these traits through the [`super::Runtime`], and hosts plug in
//! their platform implementations.

use crate::domain::{AppEntry, LaunchError, Result};

/// Supplies the roster of launchable applications.
pub trait DirectoryProvider {
    /// # Errors
    ///
    /// Returns [`crate::QuickLaunchError::Directory`] if the roster cannot be produced.
    fn list_applications(&mut self) -> Result<Vec<AppEntry>>;
}

pub trait LaunchService {
    /// Starts the application at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError`] if the target cannot be started.
    fn launch(&mut self, path: &str) -> std::result::Result<(), LaunchError>;

    /// Hides the palette. Best-effort and idempotent.
    fn hide(&mut self);
}

/// Window chrome operations. All best-effort.
pub trait WindowService {
    fn show(&mut self);
    fn set_focus(&mut self);
    fn start_dragging(&mut self);
    fn save_position(&mut self);

    /// Restores the last saved position, or centers if none was saved.
    fn restore_position(&mut self);
}
