//! Pinned shortcut model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a pin, unique within one pin list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PinId(pub u64);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user-chosen shortcut to an application.
///
/// `order` always equals the item's position in the owning list; the pin
/// store renumbers after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinItem {
    pub id: PinId,

    /// Path of the pinned [`crate::AppEntry`].
    pub path: String,

    /// Label shown in the pin list. Defaults to the application name.
    pub alias: String,

    pub order: usize,

    /// Unix timestamp of when the pin was created.
    #[serde(default)]
    pub created_at: i64,
}

impl PinItem {
    /// Creates a pin for `path` labelled `alias` at position `order`.
    #[must_use]
    pub fn new(id: PinId, path: impl Into<String>, alias: impl Into<String>, order: usize) -> Self {
        Self {
            id,
            path: path.into(),
            alias: alias.into(),
            order,
            created_at: chrono::Utc::now().timestamp(),
        }
    }
}
