//! Persisted, reorderable pin list.
//!
//! The pin store owns every [`PinItem`]. After each mutation it renumbers
//! `order` to match list position and rewrites the whole list under
//! [`PINS_KEY`]. Write failures are logged and the in-memory list stays
//! authoritative until the next successful write.

use crate::domain::{AppEntry, PinId, PinItem};
use crate::storage::backend::KeyValueStore;
use std::collections::HashSet;

/// Storage key of the serialized pin list.
pub const PINS_KEY: &str = "quicklaunch.pins";

/// Ordered collection of pins, at most one per application path.
pub struct PinStore {
    store: Box<dyn KeyValueStore>,
    items: Vec<PinItem>,
    next_id: u64,
}

impl PinStore {
    /// Loads the pin list from `store`.
    ///
    /// A missing or malformed document yields an empty list; the error is
    /// logged, never returned. Loaded items are sorted by `order`, duplicate
    /// paths are dropped and `order` is renumbered densely.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let _span = tracing::debug_span!("pin_store_load").entered();

        let items = match store.get(PINS_KEY) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<PinItem>>(&blob) {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(error = %e, "pin list is malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                tracing::debug!("no persisted pins");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read pins, starting empty");
                Vec::new()
            }
        };

        let mut pins = Self {
            store,
            items: Vec::new(),
            next_id: 1,
        };
        pins.adopt(items);

        tracing::debug!(count = pins.items.len(), "pins loaded");
        pins
    }

    fn adopt(&mut self, mut items: Vec<PinItem>) {
        items.sort_by_key(|item| item.order);

        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(item.path.clone()));

        // ids must stay unique; later duplicates get fresh ones
        let mut next_id = items.iter().map(|item| item.id.0).max().unwrap_or(0) + 1;
        let mut ids = HashSet::new();
        for item in &mut items {
            if !ids.insert(item.id) {
                tracing::debug!(id = %item.id, path = %item.path, "duplicate pin id reassigned");
                item.id = PinId(next_id);
                ids.insert(item.id);
                next_id += 1;
            }
        }

        self.next_id = next_id;
        self.items = items;
        self.renumber();
    }

    /// Pins in display order.
    #[must_use]
    pub fn items(&self) -> &[PinItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: PinId) -> Option<&PinItem> {
        self.items.iter().find(|item| item.id == id)
    }

    #[must_use]
    pub fn find_by_path(&self, path: &str) -> Option<&PinItem> {
        self.items.iter().find(|item| item.path == path)
    }

    #[must_use]
    pub fn is_pinned(&self, path: &str) -> bool {
        self.find_by_path(path).is_some()
    }

    /// Appends a pin for `app`, labelled with its name.
    ///
    /// Returns `false` without writing if the path is already pinned.
    pub fn add_pin(&mut self, app: &AppEntry) -> bool {
        let _span = tracing::debug_span!("add_pin", path = %app.path).entered();

        if self.is_pinned(&app.path) {
            tracing::debug!("already pinned");
            return false;
        }

        let id = PinId(self.next_id);
        self.next_id += 1;
        self.items
            .push(PinItem::new(id, app.path.clone(), app.name.clone(), self.items.len()));

        self.persist();
        true
    }

    /// Removes the pin `id` and closes the gap in `order`.
    pub fn remove_pin(&mut self, id: PinId) -> bool {
        let _span = tracing::debug_span!("remove_pin", %id).entered();

        let Some(position) = self.position(id) else {
            tracing::debug!("unknown pin");
            return false;
        };
        self.items.remove(position);
        self.renumber();

        self.persist();
        true
    }

    /// Replaces the alias of pin `id`.
    ///
    /// The alias is trimmed; an unknown id or an empty alias leaves the list unchanged.
    pub fn rename_pin(&mut self, id: PinId, alias: &str) -> bool {
        let _span = tracing::debug_span!("rename_pin", %id).entered();

        let alias = alias.trim();
        if alias.is_empty() {
            return false;
        }
        let Some(item) = self.items.iter_mut().find(|item| item.id == id) else {
            tracing::debug!("unknown pin");
            return false;
        };
        if item.alias == alias {
            return false;
        }
        item.alias = alias.to_string();

        self.persist();
        true
    }

    /// Moves pin `from` to sit immediately before pin `to`.
    ///
    /// The target position is looked up after `from` has been taken out of
    /// the list. Unknown ids and `from == to` are no-ops.
    pub fn reorder_pins(&mut self, from: PinId, to: PinId) -> bool {
        let _span = tracing::debug_span!("reorder_pins", %from, %to).entered();

        if from == to {
            return false;
        }
        let (Some(from_position), Some(to_position)) = (self.position(from), self.position(to))
        else {
            tracing::debug!("unknown pin");
            return false;
        };

        let moved = self.items.remove(from_position);
        // `to` shifted left by one if it sat after `from`
        let insert_at = if to_position > from_position {
            to_position - 1
        } else {
            to_position
        };
        self.items.insert(insert_at, moved);
        self.renumber();

        self.persist();
        true
    }

    fn position(&self, id: PinId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn renumber(&mut self) {
        for (position, item) in self.items.iter_mut().enumerate() {
            item.order = position;
        }
    }

    /// Overwrites the persisted list with the in-memory one.
    fn persist(&mut self) {
        let blob = match serde_json::to_string(&self.items) {
            Ok(blob) => blob,
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize pins");
                return;
            }
        };
        if let Err(e) = self.store.set(PINS_KEY, &blob) {
            tracing::error!(error = %e, count = self.items.len(), "failed to persist pins");
        }
    }
}

impl std::fmt::Debug for PinStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PinStore")
            .field("items", &self.items)
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::{QuickLaunchError, Result};
    use crate::storage::MemoryStore;

    fn app(name: &str) -> AppEntry {
        AppEntry::new(name, format!("/apps/{name}"), "Programs")
    }

    fn aliases(pins: &PinStore) -> Vec<&str> {
        pins.items().iter().map(|p| p.alias.as_str()).collect()
    }

    fn assert_dense(pins: &PinStore) {
        for (position, item) in pins.items().iter().enumerate() {
            assert_eq!(item.order, position);
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(QuickLaunchError::Storage("disk on fire".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(QuickLaunchError::Storage("disk full".into()))
        }
    }

    #[test]
    fn add_is_idempotent() {
        let mut pins = PinStore::load(Box::new(MemoryStore::new()));
        assert!(pins.add_pin(&app("a")));
        assert!(!pins.add_pin(&app("a")));
        assert_eq!(pins.len(), 1);
        assert_eq!(pins.items()[0].alias, "a");
        assert_eq!(pins.items()[0].order, 0);
    }

    #[test]
    fn remove_compacts_order() {
        let mut pins = PinStore::load(Box::new(MemoryStore::new()));
        for name in ["a", "b", "c", "d"] {
            pins.add_pin(&app(name));
        }
        let b = pins.find_by_path("/apps/b").map(|p| p.id).unwrap();

        assert!(pins.remove_pin(b));
        assert!(!pins.remove_pin(b));
        assert_eq!(aliases(&pins), ["a", "c", "d"]);
        assert_dense(&pins);
    }

    #[test]
    fn reorder_moves_before_target() {
        let mut pins = PinStore::load(Box::new(MemoryStore::new()));
        for name in ["a", "b", "c", "d"] {
            pins.add_pin(&app(name));
        }
        let id = |pins: &PinStore, name: &str| pins.find_by_path(&format!("/apps/{name}")).unwrap().id;

        let (a, c) = (id(&pins, "a"), id(&pins, "c"));
        assert!(pins.reorder_pins(a, c));
        assert_eq!(aliases(&pins), ["b", "a", "c", "d"]);
        assert_dense(&pins);

        let (d, b) = (id(&pins, "d"), id(&pins, "b"));
        assert!(pins.reorder_pins(d, b));
        assert_eq!(aliases(&pins), ["d", "b", "a", "c"]);

        assert!(!pins.reorder_pins(d, d));
        assert!(!pins.reorder_pins(d, PinId(999)));
        assert_eq!(aliases(&pins), ["d", "b", "a", "c"]);
    }

    #[test]
    fn rename_ignores_unknown_and_blank() {
        let mut pins = PinStore::load(Box::new(MemoryStore::new()));
        pins.add_pin(&app("code"));
        let id = pins.items()[0].id;

        assert!(pins.rename_pin(id, "  Editor "));
        assert!(!pins.rename_pin(id, "   "));
        assert!(!pins.rename_pin(PinId(42), "Other"));
        assert_eq!(aliases(&pins), ["Editor"]);
    }

    #[test]
    fn load_repairs_order_and_duplicates() {
        let blob = r#"[
            {"id": 7, "path": "/apps/b", "alias": "B", "order": 5},
            {"id": 3, "path": "/apps/a", "alias": "A", "order": 2},
            {"id": 9, "path": "/apps/a", "alias": "A again", "order": 8}
        ]"#;
        let store = MemoryStore::with_values([(PINS_KEY, blob)]);
        let mut pins = PinStore::load(Box::new(store));

        assert_eq!(aliases(&pins), ["A", "B"]);
        assert_dense(&pins);

        pins.add_pin(&app("c"));
        assert_eq!(pins.find_by_path("/apps/c").unwrap().id, PinId(8));
    }

    #[test]
    fn load_reassigns_duplicate_ids() {
        let blob = r#"[
            {"id": 1, "path": "/apps/a", "alias": "A", "order": 0},
            {"id": 1, "path": "/apps/b", "alias": "B", "order": 1}
        ]"#;
        let store = MemoryStore::with_values([(PINS_KEY, blob)]);
        let mut pins = PinStore::load(Box::new(store));

        let ids: Vec<PinId> = pins.items().iter().map(|pin| pin.id).collect();
        assert_eq!(ids, [PinId(1), PinId(2)]);

        assert!(pins.rename_pin(PinId(2), "Renamed"));
        assert_eq!(aliases(&pins), ["A", "Renamed"]);

        pins.add_pin(&app("c"));
        assert_eq!(pins.find_by_path("/apps/c").unwrap().id, PinId(3));
    }

    #[test]
    fn malformed_or_unreadable_storage_starts_empty() {
        let store = MemoryStore::with_values([(PINS_KEY, "{not json")]);
        assert!(PinStore::load(Box::new(store)).is_empty());
        assert!(PinStore::load(Box::new(BrokenStore)).is_empty());
    }

    #[test]
    fn write_failure_keeps_memory_state() {
        let mut pins = PinStore::load(Box::new(BrokenStore));
        assert!(pins.add_pin(&app("a")));
        assert!(pins.is_pinned("/apps/a"));
    }

    #[test]
    fn every_mutation_rewrites_the_whole_list() {
        let handle = MemoryStore::new();
        let mut pins = PinStore::load(Box::new(handle.clone()));
        pins.add_pin(&app("a"));
        pins.add_pin(&app("b"));

        let persisted = |store: &MemoryStore| -> Vec<PinItem> {
            serde_json::from_str(&store.get(PINS_KEY).unwrap().unwrap()).unwrap()
        };
        assert_eq!(persisted(&handle), pins.items());

        let a = pins.items()[0].id;
        pins.remove_pin(a);
        assert_eq!(persisted(&handle), pins.items());
        assert_eq!(persisted(&handle)[0].order, 0);
    }
}
