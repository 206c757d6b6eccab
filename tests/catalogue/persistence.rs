//! JSON file persistence, degraded loads and failed saves.

use std::fs;

use library_catalogue::{
    CatalogueError, Config, InMemoryModelStore, Item, ItemKind, JsonFileStore, LibraryService,
    ModelStore, ModelsExt, StorageError, User,
};

use crate::support::{json_store, library, ADMIN_SECRET};

// ============================================================================
// Loading
// ============================================================================

#[test]
fn empty_array_loads_as_empty_collection() {
    let (_dir, store) = json_store();

    let loaded = store.models::<Item>().load_or_empty();
    assert!(loaded.models.is_empty());
    assert_eq!(
        loaded.issue,
        Some(StorageError::Empty {
            collection: "items".into()
        })
    );

    let (service, issues) = LibraryService::open(store, ADMIN_SECRET);
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().all(StorageError::is_empty));
    assert!(service.catalogue().users().is_empty());
}

#[test]
fn missing_and_malformed_files_are_distinguished() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    fs::write(dir.path().join("items.json"), "[{\"title\": ").unwrap();

    let (service, issues) = LibraryService::open(store, ADMIN_SECRET);
    assert!(service.catalogue().items().is_empty());
    assert!(issues.iter().any(StorageError::is_missing));
    assert!(issues.iter().any(StorageError::is_malformed));
}

#[test]
fn records_written_by_hand_are_read() {
    let (dir, store) = json_store();
    fs::write(
        dir.path().join("items.json"),
        r#"[
            {"title": "Dune", "author": "Herbert", "item_id": "11111111-aaaa", "type": "Book", "reserved_by": null},
            {"title": "Wired", "author": "Conde Nast", "item_id": "22222222-bbbb", "type": "Magazine", "available": false, "reserved_by": "x"}
        ]"#,
    )
    .unwrap();

    let items = store.models::<Item>().load().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items[0].check_availability());
    assert_eq!(items[0].kind(), ItemKind::Book);
    assert!(!items[1].check_availability());
    assert_eq!(items[1].reserved_by(), None);
}

#[test]
fn unknown_item_type_drops_only_that_record() {
    let (dir, store) = json_store();
    fs::write(
        dir.path().join("items.json"),
        r#"[
            {"title": "Dune", "author": "Herbert", "item_id": "11111111-aaaa", "type": "Book", "available": true, "reserved_by": null},
            {"title": "Thriller", "author": "Jackson", "item_id": "33333333-cccc", "type": "Vinyl", "available": true},
            {"title": "Wired", "author": "Conde Nast", "item_id": "22222222-bbbb", "type": "Magazine", "available": true}
        ]"#,
    )
    .unwrap();

    let (mut service, issues) = LibraryService::open(store, ADMIN_SECRET);
    assert!(issues.iter().all(|issue| !issue.is_malformed()));
    let titles: Vec<&str> = service.catalogue().items().iter().map(Item::title).collect();
    assert_eq!(titles, ["Dune", "Wired"]);

    // a later save keeps the readable records
    service.add_item(ItemKind::Dvd, "Alien", "Scott").unwrap();
    let stored = JsonFileStore::new(dir.path()).models::<Item>().load().unwrap();
    assert_eq!(stored.len(), 3);
}

// ============================================================================
// Saving
// ============================================================================

#[test]
fn state_survives_a_reopen() {
    let (dir, store) = json_store();
    let (mut service, _) = LibraryService::open(store, ADMIN_SECRET);
    let ann = service.add_user("Ann", "ann@example.com").unwrap();
    let dune = service.add_item(ItemKind::Book, "Dune", "Herbert").unwrap();
    let alien = service.add_item(ItemKind::Dvd, "Alien", "Scott").unwrap();
    service.borrow(ann.id(), dune.id()).unwrap();
    service.reserve(ann.id(), alien.id()).unwrap();

    let (reopened, issues) = LibraryService::open(JsonFileStore::new(dir.path()), ADMIN_SECRET);
    assert!(issues.is_empty());
    assert_eq!(reopened.catalogue().items(), service.catalogue().items());
    assert_eq!(reopened.catalogue().users(), service.catalogue().users());
}

#[test]
fn files_keep_the_shared_layout() {
    let (dir, store) = json_store();
    let (mut service, _) = LibraryService::open(store, ADMIN_SECRET);
    let alien = service.add_item(ItemKind::Dvd, "Alien", "Scott").unwrap();
    service.add_item(ItemKind::Magazine, "Wired", "Conde Nast").unwrap();

    let text = fs::read_to_string(dir.path().join("items.json")).unwrap();
    assert!(text.starts_with("[\n    {\n        \"title\": \"Alien\""));

    let records: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(records[0]["type"], "DVD");
    assert_eq!(records[0]["item_id"], alien.id());
    assert_eq!(records[0]["available"], true);
    assert!(records[0]["reserved_by"].is_null());
    assert!(records[0].as_object().unwrap().contains_key("reserved_by"));
    assert!(!records[1].as_object().unwrap().contains_key("reserved_by"));

    let text = fs::read_to_string(dir.path().join("users.json")).unwrap();
    assert_eq!(text, "[]");
}

#[test]
fn failed_save_keeps_the_change_in_memory() {
    let mut lib = library();
    lib.service.store().fail_writes(true);

    let err = lib.service.borrow(lib.ann.id(), lib.dune.id()).unwrap_err();
    assert!(err.is_storage());
    assert!(!lib.service.catalogue().item(lib.dune.id()).unwrap().check_availability());

    // the store still holds the state from before the borrow
    let stored = lib.service.store().models::<Item>().load().unwrap();
    let dune = stored.iter().find(|item| item.id() == lib.dune.id()).unwrap();
    assert!(dune.check_availability());
}

#[test]
fn deleted_file_is_not_recreated_on_save() {
    let (dir, store) = json_store();
    let (mut service, _) = LibraryService::open(store, ADMIN_SECRET);
    let ann = service.add_user("Ann", "ann@example.com").unwrap();
    let dune = service.add_item(ItemKind::Book, "Dune", "Herbert").unwrap();

    fs::remove_file(dir.path().join("users.json")).unwrap();
    let err = service.borrow(ann.id(), dune.id()).unwrap_err();

    assert!(matches!(
        err,
        CatalogueError::Storage(StorageError::Missing { .. })
    ));
    assert!(!dir.path().join("users.json").exists());
    assert!(service.catalogue().user(ann.id()).unwrap().borrows(dune.id()));
    // users are written first, so the items file was never touched
    let items = JsonFileStore::new(dir.path()).models::<Item>().load().unwrap();
    assert!(items[0].check_availability());
}

#[test]
fn init_creates_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        data_dir: dir.path().join("data"),
        init: true,
        ..Config::default()
    };

    let (service, issues) = LibraryService::from_config(&config).unwrap();
    assert!(issues.iter().all(StorageError::is_empty));
    assert_eq!(fs::read_to_string(config.data_dir.join("users.json")).unwrap(), "[]");
    assert!(service.authorize_admin("12345").is_ok());

    let without_init = Config {
        data_dir: dir.path().join("elsewhere"),
        ..Config::default()
    };
    let (_, issues) = LibraryService::from_config(&without_init).unwrap();
    assert!(issues.iter().all(StorageError::is_missing));
}

#[test]
fn in_memory_store_reads_raw_collections() {
    let store = InMemoryModelStore::new();
    store.put_raw("users", b"  \n".to_vec()).unwrap();
    assert!(store.load_models::<User>().unwrap_err().is_empty());

    store.put_raw("users", b"{}".to_vec()).unwrap();
    assert!(store.load_models::<User>().unwrap_err().is_malformed());
}
