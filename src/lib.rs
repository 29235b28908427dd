//! Quicklaunch: the core of a quick-launch palette.
//!
//! Given a roster of installed applications, the palette lets a user summon a
//! floating panel, type a fragment of a name and launch the best match, or
//! pick one of a few pinned shortcuts. This crate holds everything with real
//! invariants:
//! - Tiered ranking (exact, prefix, substring, initials) with a fuzzy fallback
//! - A persisted, reorderable pin list
//! - A pure selection state machine
//! - A session that serializes hotkey, focus, launch and timer signals
//!
//! Scanning the OS for applications, drawing windows and registering global
//! hotkeys are left to collaborators behind traits in [`session::services`].

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host (main.rs)                                     │  ← stdin-driven shell
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Session Layer (session/)                           │  ← signal hub, timers
//! │  - Event handling                                   │  ← launch policy
//! │  - Action dispatching                               │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ App Layer     │   │ Storage Layer │   │ Ranking       │
//! │ (app/)        │   │ (storage/)    │   │ (ranking/)    │
//! │ - Selection   │   │ - Pin store   │   │ - Tiers       │
//! │ - View model  │   │ - Preferences │   │ - Fuzzy index │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Data directory (infrastructure/)                 │
//! │  - AppEntry, PinItem, errors (domain/)              │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing, OTLP/JSON file export     │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! max_results = 8
//! hide_delay_ms = 150
//! launch_failure = "stay-open"   # or "hide-anyway"
//! data_dir = "~/.local/share/quicklaunch"
//! trace_level = "info"
//!
//! [fuzzy]
//! threshold = 0.4
//! name_weight = 1.0
//! category_weight = 0.5
//! ```
//!
//! # Example
//!
//! ```rust
//! use quicklaunch::app::Intent;
//! use quicklaunch::session::{Action, Event};
//! use quicklaunch::storage::MemoryStore;
//! use quicklaunch::{initialize, AppEntry, Config};
//!
//! let roster = vec![
//!     AppEntry::new("Google Chrome", "/apps/chrome", "Programs"),
//!     AppEntry::new("Visual Studio Code", "/apps/code", "Programs"),
//! ];
//! let mut session = initialize(&Config::default(), roster, &MemoryStore::new());
//!
//! session.handle_event(&Event::QueryChanged("vsc".into()));
//! let (_, actions) = session.handle_event(&Event::Key(Intent::Confirm));
//! assert_eq!(actions, [Action::Launch { path: "/apps/code".into() }]);
//! ```

pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod ranking;
pub mod session;
pub mod storage;

pub use domain::{AppEntry, LaunchError, PinId, PinItem, QuickLaunchError, Result};
pub use ranking::{Catalog, FuzzyConfig};
pub use session::{Action, Event, Session};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use storage::{KeyValueStore, PinStore, PreferenceStore};

/// What a confirmed launch does to the palette when the launch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaunchFailurePolicy {
    /// Clear and hide only after the launch succeeded; on failure keep the
    /// palette open with an error notice.
    #[default]
    StayOpen,

    /// Clear and hide immediately, whatever the outcome.
    HideAnyway,
}

impl FromStr for LaunchFailurePolicy {
    type Err = QuickLaunchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "stay-open" => Ok(Self::StayOpen),
            "hide-anyway" => Ok(Self::HideAnyway),
            other => Err(QuickLaunchError::Config(format!("unknown launch_failure policy '{other}'"))),
        }
    }
}

/// Launcher configuration.
///
/// Loaded from TOML with [`Config::from_file`]; individual keys can then be
/// overridden from `key=value` pairs with [`Config::apply_overrides`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum rows returned by the ranking engine. Default: 8
    pub max_results: usize,

    /// Fuzzy fallback threshold and field weights.
    pub fuzzy: FuzzyConfig,

    /// Focus-loss debounce in milliseconds. Default: 150
    pub hide_delay_ms: u64,

    /// Launch failure handling. Default: `stay-open`
    pub launch_failure: LaunchFailurePolicy,

    /// Where pins, preferences and traces are stored. `~` is expanded.
    /// Default: the platform data directory.
    pub data_dir: Option<String>,

    /// Tracing filter directive such as `info` or `quicklaunch=debug`.
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_results: ranking::DEFAULT_MAX_RESULTS,
            fuzzy: FuzzyConfig::default(),
            hide_delay_ms: 150,
            launch_failure: LaunchFailurePolicy::default(),
            data_dir: None,
            trace_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Reads and validates a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`QuickLaunchError::Io`] if the file cannot be read and
    /// [`QuickLaunchError::Config`] if it does not parse or fails validation.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| QuickLaunchError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a config from `key=value` pairs over the defaults.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use quicklaunch::{Config, LaunchFailurePolicy};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("fuzzy.threshold".to_string(), "0.25".to_string());
    /// map.insert("launch_failure".to_string(), "hide-anyway".to_string());
    /// map.insert("max_results".to_string(), "lots".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.fuzzy.threshold, 0.25);
    /// assert_eq!(config.launch_failure, LaunchFailurePolicy::HideAnyway);
    /// assert_eq!(config.max_results, 8);
    /// ```
    #[must_use]
    pub fn from_map(overrides: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        config.apply_overrides(overrides);
        config
    }

    /// Applies `key=value` overrides in place.
    ///
    /// Values that fail to parse, and unknown keys, are logged and skipped so
    /// the current value stays in effect.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, String>) {
        for (key, value) in overrides {
            let value = value.trim();
            let applied = match key.as_str() {
                "max_results" => parse_into(value, &mut self.max_results),
                "fuzzy.threshold" => parse_into(value, &mut self.fuzzy.threshold),
                "fuzzy.name_weight" => parse_into(value, &mut self.fuzzy.name_weight),
                "fuzzy.category_weight" => parse_into(value, &mut self.fuzzy.category_weight),
                "hide_delay_ms" => parse_into(value, &mut self.hide_delay_ms),
                "launch_failure" => parse_into(value, &mut self.launch_failure),
                "data_dir" => {
                    self.data_dir = Some(value.to_string()).filter(|dir| !dir.is_empty());
                    true
                }
                "trace_level" => {
                    self.trace_level = value.to_string();
                    true
                }
                _ => {
                    tracing::warn!(key = %key, "unknown config key ignored");
                    continue;
                }
            };
            if !applied {
                tracing::warn!(key = %key, value, "invalid config value ignored");
            }
        }
    }

    /// Checks that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns [`QuickLaunchError::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if self.max_results == 0 {
            return Err(QuickLaunchError::Config("max_results must be at least 1".into()));
        }
        let threshold = self.fuzzy.threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return Err(QuickLaunchError::Config(format!(
                "fuzzy.threshold must be in (0, 1], got {threshold}"
            )));
        }
        for (key, weight) in [
            ("fuzzy.name_weight", self.fuzzy.name_weight),
            ("fuzzy.category_weight", self.fuzzy.category_weight),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(QuickLaunchError::Config(format!(
                    "{key} must be a non-negative number, got {weight}"
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// The configured data directory with `~` expanded, or the platform default.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.as_deref().map_or_else(
            infrastructure::default_data_dir,
            infrastructure::expand_tilde,
        )
    }
}

fn parse_into<T: FromStr>(value: &str, slot: &mut T) -> bool {
    value.parse().map(|parsed| *slot = parsed).is_ok()
}

/// Builds a session over `roster`, loading pins and preferences from `store`.
///
/// Both stores load fail-soft, so this never fails: unreadable data simply
/// starts empty or at defaults.
pub fn initialize<S>(config: &Config, roster: Vec<AppEntry>, store: &S) -> Session
where
    S: KeyValueStore + Clone + 'static,
{
    tracing::debug!(apps = roster.len(), "initializing quicklaunch session");

    let pins = PinStore::load(Box::new(store.clone()));
    let preferences = PreferenceStore::load(Box::new(store.clone()));
    Session::new(config, roster, pins, preferences)
}
