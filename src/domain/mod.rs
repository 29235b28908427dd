//! Domain layer: the data the launcher reasons about.
//!
//! - [`entry`]: applications supplied by the directory provider
//! - [`pin`]: user-curated shortcuts owned by the pin store
//! - [`error`]: error types and result alias

pub mod entry;
pub mod error;
pub mod pin;

pub use entry::AppEntry;
pub use error::{LaunchError, QuickLaunchError, Result};
pub use pin::{PinId, PinItem};
