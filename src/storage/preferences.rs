//! Persisted user preferences.
//!
//! Preferences are edited from the settings overlay and live under
//! [`PREFERENCES_KEY`]. Like pins they load fail-soft: anything unreadable
//! becomes [`Preferences::default`].

use crate::domain::QuickLaunchError;
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};

/// Storage key of the serialized preferences.
pub const PREFERENCES_KEY: &str = "quicklaunch.preferences";

/// User-facing settings.
///
/// Unknown fields are ignored and missing fields take their defaults, so
/// older or newer documents still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// UI language tag, e.g. `en` or `zh-CN`. Only stored here.
    pub language: String,

    /// Hide the palette shortly after it loses focus.
    pub auto_hide_on_blur: bool,

    /// Restore the last window position on summon instead of re-centering.
    pub remember_position: bool,

    /// Label of the registered global hotkey. Display only.
    pub hotkey_label: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            auto_hide_on_blur: true,
            remember_position: false,
            hotkey_label: None,
        }
    }
}

/// Preferences plus the store they persist to.
pub struct PreferenceStore {
    store: Box<dyn KeyValueStore>,
    current: Preferences,
}

impl PreferenceStore {
    /// Loads preferences, falling back to defaults on any failure.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let current = match store.get(PREFERENCES_KEY) {
            Ok(Some(blob)) => serde_json::from_str(&blob).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "preferences are malformed, using defaults");
                Preferences::default()
            }),
            Ok(None) => Preferences::default(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read preferences, using defaults");
                Preferences::default()
            }
        };

        tracing::debug!(preferences = ?current, "preferences loaded");
        Self { store, current }
    }

    #[must_use]
    pub const fn get(&self) -> &Preferences {
        &self.current
    }

    /// Replaces the preferences and writes them out.
    ///
    /// Returns `false` if nothing changed.
    pub fn update(&mut self, preferences: Preferences) -> bool {
        if self.current == preferences {
            return false;
        }
        self.current = preferences;
        self.persist();
        true
    }

    /// Records the hotkey label shown in the palette footer.
    pub fn set_hotkey_label(&mut self, label: &str) -> bool {
        if self.current.hotkey_label.as_deref() == Some(label) {
            return false;
        }
        self.current.hotkey_label = Some(label.to_string());
        self.persist();
        true
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.current)
            .map_err(QuickLaunchError::from)
            .and_then(|blob| self.store.set(PREFERENCES_KEY, &blob));
        if let Err(e) = result {
            tracing::error!(error = %e, "failed to persist preferences");
        }
    }
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}
