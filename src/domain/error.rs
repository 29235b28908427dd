//! Error types for the launcher core.
//!
//! [`QuickLaunchError`] covers storage, configuration, and roster failures.
//! [`LaunchError`] is reported by the launch collaborator and never aborts a
//! session; it is surfaced to the user as a notice instead.

use thiserror::Error;

/// The main error type for launcher operations.
///
/// Most callers never see these: the pin store and preference store degrade to
/// defaults on read failures and log write failures, so errors only escape from
/// explicit construction paths such as [`crate::Config::from_file`].
#[derive(Debug, Error)]
pub enum QuickLaunchError {
    /// A key-value store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted blob could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration is invalid or could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The application directory provider failed to produce a roster.
    #[error("Directory error: {0}")]
    Directory(String),
}

/// Failure reported by a launch collaborator for a single target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaunchError {
    /// The entry carried an empty path.
    #[error("empty launch target")]
    EmptyPath,

    /// The target no longer exists on disk.
    #[error("launch target does not exist: {0}")]
    MissingTarget(String),

    /// The platform opener could not be started.
    #[error("failed to start {path}: {reason}")]
    Spawn {
        /// Path that was being launched.
        path: String,
        /// Underlying OS error text.
        reason: String,
    },
}

/// A specialized `Result` type for launcher operations.
pub type Result<T> = std::result::Result<T, QuickLaunchError>;
