//! Collection store public API tests.

use pausepoint::store::{CollectionStore, StoreLayout, WriteMode};
use pausepoint::{FailureKind, PausepointError};
use serde::{Deserialize, Serialize};
use std::fs;
use tempfile::TempDir;

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Bookmark {
    label: String,
    offset_ms: u64,
}

#[test]
fn never_saved_document_is_distinguishable() {
    let temp = TempDir::new().unwrap();
    let store = CollectionStore::open(&StoreLayout::new(temp.path()), "marks", "b.json").unwrap();

    assert!(!store.exists());
    let err = store.read::<Vec<Bookmark>>().unwrap_err();
    assert_eq!(err.kind(), FailureKind::NeverSaved);
}

#[test]
fn save_and_restore_round_trip() {
    let temp = TempDir::new().unwrap();
    let layout = StoreLayout::new(temp.path());
    let marks = vec![
        Bookmark {
            label: "intro".into(),
            offset_ms: 0,
        },
        Bookmark {
            label: "refactor".into(),
            offset_ms: 93_000,
        },
    ];

    CollectionStore::open(&layout, "marks", "b.json")
        .unwrap()
        .write(&marks)
        .unwrap();

    // A fresh handle sees what the first one wrote.
    let restored: Vec<Bookmark> = CollectionStore::open(&layout, "marks", "b.json")
        .unwrap()
        .read()
        .unwrap();
    assert_eq!(restored, marks);
}

#[test]
fn second_write_replaces_first() {
    let temp = TempDir::new().unwrap();
    let store = CollectionStore::open(&StoreLayout::new(temp.path()), "tags", "t.json").unwrap();

    store.write(&vec!["a", "b", "c"]).unwrap();
    store.write(&vec!["z"]).unwrap();

    let tags: Vec<String> = store.read().unwrap();
    assert_eq!(tags, vec!["z"]);
}

#[test]
fn empty_and_corrupt_documents_are_reported() {
    let temp = TempDir::new().unwrap();
    let store = CollectionStore::open(&StoreLayout::new(temp.path()), "tags", "t.json").unwrap();
    fs::create_dir_all(store.path().parent().unwrap()).unwrap();

    fs::write(store.path(), "").unwrap();
    assert!(matches!(
        store.read_value(),
        Err(PausepointError::EmptyDocument { .. })
    ));

    fs::write(store.path(), "{\"tags\": [").unwrap();
    let err = store.read_value().unwrap_err();
    assert_eq!(err.kind(), FailureKind::Corrupt);
}

#[test]
fn in_place_mode_writes_the_same_bytes() {
    let temp = TempDir::new().unwrap();
    let layout = StoreLayout::new(temp.path());
    let atomic = CollectionStore::open(&layout, "a", "doc.json").unwrap();
    let in_place = CollectionStore::open(&layout, "b", "doc.json")
        .unwrap()
        .with_write_mode(WriteMode::InPlace);

    atomic.write(&serde_json::json!({"k": 1})).unwrap();
    in_place.write(&serde_json::json!({"k": 1})).unwrap();

    assert_eq!(
        fs::read(atomic.path()).unwrap(),
        fs::read(in_place.path()).unwrap()
    );
}

#[test]
fn custom_marker_directory_is_used() {
    let temp = TempDir::new().unwrap();
    let layout = StoreLayout::with_marker(temp.path(), ".sessions");
    let store = CollectionStore::open(&layout, "tags", "t.json").unwrap();

    store.write(&1).unwrap();
    assert!(temp.path().join(".sessions/tags/t.json").is_file());
}

#[test]
fn path_traversal_is_rejected() {
    let layout = StoreLayout::new("/tmp/project");
    for (ns, name) in [("..", "x.json"), ("tags", "../x.json"), ("", "x.json")] {
        assert!(matches!(
            CollectionStore::open(&layout, ns, name),
            Err(PausepointError::InvalidAddress { .. })
        ));
    }
}

#[test]
fn storage_failures_are_io_not_missing() {
    let temp = TempDir::new().unwrap();
    let layout = StoreLayout::new(temp.path());
    fs::create_dir_all(layout.marker_dir()).unwrap();
    fs::write(layout.namespace_dir("blocked"), "a file, not a directory").unwrap();

    let blocked = CollectionStore::open(&layout, "blocked", "doc.json").unwrap();
    let err = blocked.write(&serde_json::json!({"k": 1})).unwrap_err();
    assert_eq!(err.kind(), FailureKind::Io);

    let dir_doc = CollectionStore::open(&layout, "ns", "dir.json").unwrap();
    fs::create_dir_all(dir_doc.path()).unwrap();
    let err = dir_doc.read_value().unwrap_err();
    assert!(matches!(err, PausepointError::Io(_)));
}
