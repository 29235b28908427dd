//! Persistence for pins and preferences.
//!
//! Both stores sit on top of the [`KeyValueStore`] capability and rewrite
//! their whole document on every change. Pin counts are small, and a single
//! overwrite can never leave a half-updated list.
//!
//! # Modules
//!
//! - `backend`: the key-value capability
//! - `json`: one-file-per-key backend with atomic writes
//! - `memory`: volatile backend for tests and fallback
//! - `pins`: the pin store
//! - `preferences`: user preferences

pub mod backend;
pub mod json;
pub mod memory;
pub mod pins;
pub mod preferences;

pub use backend::KeyValueStore;
pub use json::JsonFileStore;
pub use memory::MemoryStore;
pub use pins::{PinStore, PINS_KEY};
pub use preferences::{PreferenceStore, Preferences, PREFERENCES_KEY};
