use quicklaunch::storage::{KeyValueStore, MemoryStore, PinStore, PINS_KEY};
use quicklaunch::{AppEntry, PinItem};

fn app(name: &str) -> AppEntry {
    AppEntry::new(name, format!("/apps/{}", name.to_lowercase()), "Programs")
}

fn persisted(store: &MemoryStore) -> Vec<PinItem> {
    let blob = store.get(PINS_KEY).unwrap().expect("pins were written");
    serde_json::from_str(&blob).unwrap()
}

fn assert_dense(items: &[PinItem]) {
    for (position, item) in items.iter().enumerate() {
        assert_eq!(item.order, position);
    }
}

#[test]
fn duplicate_add_keeps_one_pin() {
    let store = MemoryStore::new();
    let mut pins = PinStore::load(Box::new(store.clone()));

    assert!(pins.add_pin(&app("Chrome")));
    assert!(!pins.add_pin(&app("Chrome")));
    assert_eq!(pins.len(), 1);
    assert_eq!(persisted(&store).len(), 1);
}

#[test]
fn removal_never_leaves_gaps() {
    let store = MemoryStore::new();
    let mut pins = PinStore::load(Box::new(store.clone()));
    for name in ["Chrome", "Code", "Mail", "Notes"] {
        pins.add_pin(&app(name));
    }

    let second = pins.items()[1].id;
    let last = pins.items()[3].id;
    assert!(pins.remove_pin(second));
    assert!(pins.remove_pin(last));
    assert!(!pins.remove_pin(last));

    assert_dense(pins.items());
    assert_dense(&persisted(&store));
    let aliases: Vec<&str> = pins.items().iter().map(|pin| pin.alias.as_str()).collect();
    assert_eq!(aliases, ["Chrome", "Mail"]);
}

#[test]
fn reorder_places_source_before_target_and_reloads_in_order() {
    let store = MemoryStore::new();
    let mut pins = PinStore::load(Box::new(store.clone()));
    for name in ["A", "B", "C", "D"] {
        pins.add_pin(&app(name));
    }
    let id = |pins: &PinStore, alias: &str| {
        pins.items().iter().find(|pin| pin.alias == alias).map(|pin| pin.id).unwrap()
    };

    let (d, b) = (id(&pins, "D"), id(&pins, "B"));
    assert!(pins.reorder_pins(d, b));
    let (a, c) = (id(&pins, "A"), id(&pins, "C"));
    assert!(pins.reorder_pins(a, c));

    let reloaded = PinStore::load(Box::new(store.clone()));
    let aliases: Vec<&str> = reloaded.items().iter().map(|pin| pin.alias.as_str()).collect();
    assert_eq!(aliases, ["D", "B", "A", "C"]);
    assert_dense(reloaded.items());
}

#[test]
fn rename_changes_only_the_alias() {
    let store = MemoryStore::new();
    let mut pins = PinStore::load(Box::new(store.clone()));
    pins.add_pin(&app("Code"));
    let id = pins.items()[0].id;

    assert!(pins.rename_pin(id, "  Editor  "));
    let pin = pins.get(id).unwrap();
    assert_eq!(pin.alias, "Editor");
    assert_eq!(pin.path, "/apps/code");
    assert_eq!(persisted(&store)[0].alias, "Editor");
}

#[test]
fn corrupt_document_loads_empty_and_is_overwritten() {
    let store = MemoryStore::with_values([(PINS_KEY, "{not json")]);
    let mut pins = PinStore::load(Box::new(store.clone()));
    assert!(pins.is_empty());

    pins.add_pin(&app("Mail"));
    assert_eq!(persisted(&store).len(), 1);
}
