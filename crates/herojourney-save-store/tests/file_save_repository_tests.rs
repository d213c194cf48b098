//! Integration tests for `FileSaveRepository`.

use chrono::{TimeDelta, TimeZone, Utc};
use herojourney_core::repository::{SaveRepository, StoredSave};
use herojourney_save_store::file_save_repository::FileSaveRepository;

/// Helper to build a `StoredSave` with sensible defaults.
fn make_save(slot: u32, name: &str) -> StoredSave {
    StoredSave {
        slot,
        name: name.to_string(),
        saved_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        payload: serde_json::json!({"round": 5, "stats": {"martial": 12}}),
    }
}

// --- store + load round-trip ---

#[test]
fn test_store_and_load_single_save() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path());
    let save = make_save(1, "Before the siege");

    repo.store(&save).unwrap();

    let loaded = repo.load(1).unwrap().unwrap();
    assert_eq!(loaded, save);
}

#[test]
fn test_store_overwrites_existing_slot() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path());
    repo.store(&make_save(2, "first")).unwrap();

    let mut newer = make_save(2, "second");
    newer.saved_at += TimeDelta::hours(1);
    repo.store(&newer).unwrap();

    let loaded = repo.load(2).unwrap().unwrap();
    assert_eq!(loaded.name, "second");
    assert_eq!(loaded.saved_at, newer.saved_at);
    assert_eq!(repo.slots().unwrap(), vec![2]);
}

// --- survives a new repository instance ---

#[test]
fn test_saves_persist_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    FileSaveRepository::new(dir.path())
        .store(&make_save(0, "AutoSave"))
        .unwrap();

    let reopened = FileSaveRepository::new(dir.path());
    assert_eq!(reopened.load(0).unwrap().unwrap().name, "AutoSave");
}

// --- delete ---

#[test]
fn test_delete_removes_only_the_target_slot() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path());
    repo.store(&make_save(1, "one")).unwrap();
    repo.store(&make_save(3, "three")).unwrap();

    assert!(repo.delete(1).unwrap());
    assert!(!repo.delete(1).unwrap());
    assert_eq!(repo.load(1).unwrap(), None);
    assert_eq!(repo.slots().unwrap(), vec![3]);
}
