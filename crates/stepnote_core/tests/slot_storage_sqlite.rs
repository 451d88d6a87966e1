use rusqlite::Connection;
use stepnote_core::db::{open_db, open_db_in_memory};
use stepnote_core::{
    KeyValueBackend, PageStorage, PageStore, SlotStorage, SqliteKvBackend, StorageConfig,
    StorageError,
};

#[test]
fn backend_set_is_an_upsert() {
    let conn = open_db_in_memory().unwrap();
    let mut backend = SqliteKvBackend::try_new(&conn).unwrap();

    assert_eq!(backend.get("alpha").unwrap(), None);
    backend.set("alpha", "1").unwrap();
    backend.set("alpha", "2").unwrap();
    backend.set("beta", "3").unwrap();
    assert_eq!(backend.get("alpha").unwrap().as_deref(), Some("2"));
    assert_eq!(backend.get("beta").unwrap().as_deref(), Some("3"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_slots;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKvBackend::try_new(&conn).unwrap_err();
    assert!(matches!(
        err,
        StorageError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn store_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pages.db");

    let expected = {
        let conn = open_db(&path).unwrap();
        let backend = SqliteKvBackend::try_new(&conn).unwrap();
        let mut store =
            PageStore::load(SlotStorage::new(backend, &StorageConfig::default())).unwrap();
        store.create("Reset Router", "Unplug\nWait\nPlug in").unwrap();
        store.create("Make tea", "boil water").unwrap();
        store.list().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let backend = SqliteKvBackend::try_new(&conn).unwrap();
    let store = PageStore::load(SlotStorage::new(backend, &StorageConfig::default())).unwrap();
    assert_eq!(store.list(), expected.as_slice());
}

#[test]
fn malformed_sqlite_slot_loads_empty() {
    let conn = open_db_in_memory().unwrap();
    let mut backend = SqliteKvBackend::try_new(&conn).unwrap();
    backend.set("stepPages_v1", "{broken").unwrap();

    let storage = SlotStorage::new(backend, &StorageConfig::default());
    assert!(storage.load().unwrap().is_empty());
}
