//! Integration tests for `JsonFileStore` against a real temp directory.

use std::sync::{Arc, Mutex};

use resfinder_core::Coordinate;
use resfinder_store::{
    load_last_known_location, save_last_known_location, ContactStore, JsonFileStore,
    KeyValueStore, CONTACTS_KEY,
};

#[test]
fn missing_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::open(dir.path().join("resfinder.json"));
    assert!(store.get_raw(CONTACTS_KEY).is_none());
}

#[test]
fn writes_create_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("resfinder.json");

    let mut store = JsonFileStore::open(&path);
    store.put_raw("k", serde_json::json!(1)).unwrap();

    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn contacts_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resfinder.json");

    let added = {
        let mut contacts = ContactStore::open(JsonFileStore::open(&path));
        contacts.add("Jane Roe", "555-1234").unwrap()
    };

    let reopened = ContactStore::open(JsonFileStore::open(&path));
    assert_eq!(reopened.list().last(), Some(&added));
    assert_eq!(reopened.list().len(), 3);
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resfinder.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = JsonFileStore::open(&path);
    assert!(load_last_known_location(&store).is_none());

    let contacts = ContactStore::open(store);
    assert_eq!(contacts.list().len(), 2, "seed contacts expected");
}

#[test]
fn contacts_and_location_share_one_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resfinder.json");
    let shared = Arc::new(Mutex::new(JsonFileStore::open(&path)));

    let mut contacts = ContactStore::open(Arc::clone(&shared));
    contacts.add("Jane Roe", "555-1234").unwrap();

    let here = Coordinate::new(39.0473, -95.6752).unwrap();
    let mut location_handle = Arc::clone(&shared);
    save_last_known_location(&mut location_handle, here).unwrap();

    let on_disk: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(on_disk["contacts"].as_array().map(Vec::len), Some(3));
    assert_eq!(
        on_disk["lastKnownLocation"],
        serde_json::json!({"latitude": 39.0473, "longitude": -95.6752})
    );
}
