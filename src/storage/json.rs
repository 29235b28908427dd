//! File-backed key-value store.
//!
//! Each key is stored as its own JSON document `<dir>/<key>.json`. Writes go
//! to a temporary sibling first and are then renamed over the target, so a
//! crash never leaves a half-written document behind.

use crate::domain::error::{QuickLaunchError, Result};
use crate::storage::backend::KeyValueStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory of JSON documents, one per key.
///
/// Two stores pointing at the same directory are safe as long as they write
/// different keys, which is how the pin store and preference store share one
/// data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Opens (and creates, if needed) the store directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    ///
    /// ```no_run
    /// use quicklaunch::storage::JsonFileStore;
    ///
    /// let store = JsonFileStore::open("/tmp/quicklaunch")?;
    /// # Ok::<(), quicklaunch::QuickLaunchError>(())
    /// ```
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tracing::debug!(dir = ?dir, "opening JSON file store");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File that holds `key`.
    ///
    /// Characters outside `[A-Za-z0-9._-]` are replaced so a key can never
    /// escape the store directory.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        let file_name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{file_name}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::trace!(key, bytes = contents.len(), "read document");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(QuickLaunchError::Storage(format!(
                "failed to read {}: {e}",
                path.display()
            ))),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("json_store_set", key, bytes = value.len()).entered();

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, value)?;
        if let Err(e) = std::fs::rename(&tmp_path, &path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        tracing::debug!(path = ?path, "document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_sanitized() {
        let store = JsonFileStore {
            dir: PathBuf::from("/data"),
        };
        assert_eq!(
            store.path_for("quicklaunch.pins"),
            PathBuf::from("/data/quicklaunch.pins.json")
        );
        assert_eq!(store.path_for("../etc/passwd"), PathBuf::from("/data/.._etc_passwd.json"));
    }

    #[test]
    fn missing_key_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nested")).unwrap();
        assert!(store.dir().is_dir());
        assert_eq!(store.get("quicklaunch.pins").unwrap(), None);
    }

    #[test]
    fn writes_replace_the_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();

        store.set("quicklaunch.pins", "[1, 2, 3]").unwrap();
        store.set("quicklaunch.pins", "[]").unwrap();

        assert_eq!(store.get("quicklaunch.pins").unwrap().as_deref(), Some("[]"));
        assert!(!store.path_for("quicklaunch.pins").with_extension("json.tmp").exists());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonFileStore::open(dir.path()).unwrap();
        let target = store.path_for("quicklaunch.pins");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("occupied"), "x").unwrap();

        assert!(store.set("quicklaunch.pins", "[]").is_err());
        assert!(!target.with_extension("json.tmp").exists());
    }

    #[test]
    fn pins_survive_reopening() {
        use crate::domain::AppEntry;
        use crate::storage::PinStore;

        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        let mut pins = PinStore::load(Box::new(store.clone()));
        pins.add_pin(&AppEntry::new("Chrome", "/apps/chrome", "Programs"));
        pins.add_pin(&AppEntry::new("Calculator", "/apps/calc", "Utilities"));
        drop(pins);

        let reopened = PinStore::load(Box::new(JsonFileStore::open(dir.path()).unwrap()));
        let paths: Vec<&str> = reopened.items().iter().map(|pin| pin.path.as_str()).collect();
        assert_eq!(paths, ["/apps/chrome", "/apps/calc"]);
    }
}
