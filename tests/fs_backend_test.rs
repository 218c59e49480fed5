use phonebook::error::PhonebookError;
use phonebook::model::SearchField;
use phonebook::store::fs_backend::FsBackend;
use phonebook::store::{ContactStore, ContactUpdate, StorageBackend};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn assert_no_tmp_files(dir: &Path) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_fs_backend_missing_file_reads_none() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new();
    assert_eq!(backend.read(&dir.path().join("nope.json")).unwrap(), None);
}

#[test]
fn test_fs_backend_write_then_read() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new();
    let path = dir.path().join("book.json");

    backend.write(&path, "first").unwrap();
    backend.write(&path, "second").unwrap();

    assert_eq!(backend.read(&path).unwrap().as_deref(), Some("second"));
    assert_no_tmp_files(dir.path());
}

#[test]
fn test_fs_backend_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new();
    let path = dir.path().join("a").join("b").join("book.json");

    backend.write(&path, "{}").unwrap();
    assert!(path.exists());
}

#[test]
fn test_fs_backend_invalid_utf8_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("book.json");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x7b]).unwrap();

    let err = FsBackend::new().read(&path).unwrap_err();
    assert!(matches!(err, PhonebookError::CorruptFile { .. }));
}

#[test]
fn test_fs_backend_failed_write_cleans_up() {
    let dir = TempDir::new().unwrap();
    // Renaming a file over a non-empty directory fails on every platform.
    let target = dir.path().join("taken");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep.txt"), "x").unwrap();

    let err = FsBackend::new().write(&target, "content").unwrap_err();
    assert!(matches!(err, PhonebookError::Io(_)));
    assert!(target.join("keep.txt").exists());
    assert_no_tmp_files(dir.path());
}

#[test]
fn test_store_round_trip_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("book.json");

    let mut store = ContactStore::new(FsBackend::new(), &path);
    let report = store.load(&path).unwrap();
    assert!(!report.file_found);

    store.create("Иван Петров", "+7 900 000-00-00", "коллега").unwrap();
    store.create("Maria", "8 (495) 123-45-67", "").unwrap();
    store.update(2, &ContactUpdate::new().note("ask Ivan")).unwrap();
    store.save().unwrap();
    assert!(!store.has_unsaved_changes());

    let mut reopened = ContactStore::new(FsBackend::new(), &path);
    reopened.load(&path).unwrap();
    assert_eq!(reopened.contacts(), store.contacts());
    assert_eq!(reopened.next_id(), 3);
    assert_eq!(reopened.search("ИВАН", SearchField::Name).unwrap().len(), 1);
    assert_eq!(reopened.search("ivan", SearchField::All).unwrap().len(), 1);
    assert_no_tmp_files(dir.path());
}

#[test]
fn test_store_reads_legacy_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("phonebook.json");
    fs::write(
        &path,
        r#"{
  "contacts": [
    {"id": 1, "name": "Ivan", "phone": "123", "comment": "old style"},
    {"name": "Oleg", "phone": "456", "comment": ""},
    {"id": 2, "name": "Broken"}
  ],
  "last_updated": "2024-01-01T12:00:00"
}"#,
    )
    .unwrap();

    let mut store = ContactStore::new(FsBackend::new(), &path);
    let report = store.load(&path).unwrap();
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.assigned_ids, vec![2]);
    assert_eq!(store.contacts()[0].note(), "old style");
    assert!(store.has_unsaved_changes());

    // Saving rewrites with the current key names and keeps the assigned id.
    store.save().unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"note\": \"old style\""));
    assert!(!text.contains("comment"));
    assert!(!text.contains("Broken"));
}

#[test]
fn test_store_corrupt_file_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("book.json");
    fs::write(&path, "not json at all").unwrap();

    let mut store = ContactStore::new(FsBackend::new(), dir.path().join("other.json"));
    store.create("Ivan", "1", "").unwrap();

    assert!(matches!(
        store.load(&path),
        Err(PhonebookError::CorruptFile { .. })
    ));
    assert_eq!(store.len(), 1);
    assert_eq!(store.path(), dir.path().join("other.json"));
}
