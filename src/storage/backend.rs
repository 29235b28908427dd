//! Key-value storage abstraction.
//!
//! The pin store and the preference store depend only on [`KeyValueStore`],
//! so the backing medium (files, an embedded database, platform storage) can
//! change without touching either of them.

use crate::domain::error::Result;

/// Minimal blob storage keyed by string.
///
/// Values are whole documents: a `set` replaces the previous value in a single
/// write, never a partial update.
///
/// # Implementations
///
/// - [`JsonFileStore`](crate::storage::JsonFileStore): one file per key, atomic rename
/// - [`MemoryStore`](crate::storage::MemoryStore): shared in-memory map
///
/// ```
/// use quicklaunch::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("greeting", "hello")?;
/// assert_eq!(store.get("greeting")?.as_deref(), Some("hello"));
/// assert_eq!(store.get("missing")?, None);
/// # Ok::<(), quicklaunch::QuickLaunchError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written. The previous value
    /// must remain intact in that case.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
