//! Selection state machine and view model.
//!
//! This layer knows nothing about windows, timers or storage. It turns
//! keyboard intents and list changes into a new [`SelectionState`] plus an
//! optional [`Command`], and renders state into a [`PaletteViewModel`].
//!
//! ```text
//! Intent / list change → transition(state, event) → (state', Command?)
//!                                                        ↓
//!                                                  session layer
//! ```
//!
//! # Modules
//!
//! - [`modes`]: list mode, overlays and keyboard intents
//! - [`state`]: selection state and the pure transition function
//! - [`viewmodel`]: display-ready snapshot

pub mod modes;
pub mod state;
pub mod viewmodel;

pub use modes::{Intent, ListMode, Overlay};
pub use state::{transition, Command, SelectionEvent, SelectionState};
pub use viewmodel::{Notice, PaletteViewModel, Row};
