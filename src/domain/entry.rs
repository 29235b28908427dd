//! Application roster entries.

use serde::{Deserialize, Serialize};

/// A launchable application as reported by the directory provider.
///
/// Entries are immutable for the lifetime of a roster snapshot. `path` is the
/// identity key: two entries with the same path are the same application.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AppEntry {
    /// Display name, e.g. `Visual Studio Code`.
    pub name: String,

    /// Launch target (shortcut or executable path).
    pub path: String,

    /// Grouping label such as the folder the shortcut was found in.
    #[serde(default)]
    pub category: String,

    /// Opaque handle to a cached icon, owned by the icon collaborator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl AppEntry {
    /// Creates an entry without an icon.
    ///
    /// ```
    /// use quicklaunch::AppEntry;
    ///
    /// let entry = AppEntry::new("WeChat", "/apps/wechat.lnk", "Programs");
    /// assert_eq!(entry.name, "WeChat");
    /// assert!(entry.icon.is_none());
    /// ```
    pub fn new(
        name: impl Into<String>,
        path: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            category: category.into(),
            icon: None,
        }
    }
}
