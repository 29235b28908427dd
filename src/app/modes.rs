//! Mode and intent types for the palette.
//!
//! The palette shows exactly one list at a time. Which one is never stored:
//! [`ListMode`] is recomputed from the query on every read, so the mode can't
//! disagree with the query.
//!
//! # Example
//!
//! ```rust
//! use quicklaunch::app::ListMode;
//!
//! assert_eq!(ListMode::for_query("   "), ListMode::Pins);
//! assert_eq!(ListMode::for_query("code"), ListMode::Search);
//! ```

/// Which list is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListMode {
    /// Pinned shortcuts, shown while the query is blank.
    Pins,

    /// Ranked search results for a non-blank query.
    Search,
}

impl ListMode {
    /// `Search` iff the trimmed query is non-empty.
    #[must_use]
    pub fn for_query(query: &str) -> Self {
        if query.trim().is_empty() {
            Self::Pins
        } else {
            Self::Search
        }
    }
}

/// Views layered over the list.
///
/// While an overlay is open, navigation and confirm are swallowed and
/// cancel closes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlay {
    Settings,
}

/// Keyboard intents, already decoupled from physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveDown,
    MoveUp,
    /// Alias for [`Intent::MoveDown`].
    Tab,
    /// Alias for [`Intent::MoveUp`].
    BackTab,
    /// Launch the highlighted row.
    Confirm,
    /// Close overlay, else clear query, else hide.
    Cancel,
}
