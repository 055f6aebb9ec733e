#![allow(clippy::unwrap_used)]

use super::*;

// ── MemoryStore ───────────────────────────────────────────────

#[test]
fn test_memory_get_absent() {
    let store = MemoryStore::new();
    assert!(store.get("transactions").unwrap().is_none());
}

#[test]
fn test_memory_set_then_get() {
    let mut store = MemoryStore::new();
    store.set("goals", b"[]").unwrap();
    assert_eq!(store.get("goals").unwrap().unwrap(), b"[]");
    assert_eq!(store.writes(), 1);
}

#[test]
fn test_memory_failed_write_leaves_old_value() {
    let mut store = MemoryStore::new();
    store.set("goals", b"[1]").unwrap();
    store.fail_writes(true);
    assert!(store.set("goals", b"[2]").is_err());
    assert_eq!(store.get("goals").unwrap().unwrap(), b"[1]");
    assert_eq!(store.writes(), 1);
}

// ── SqliteStore ───────────────────────────────────────────────

#[test]
fn test_sqlite_get_absent() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.get("categories").unwrap().is_none());
}

#[test]
fn test_sqlite_overwrite() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.set("categories", b"[\"a\"]").unwrap();
    store.set("categories", b"[\"b\"]").unwrap();
    assert_eq!(store.get("categories").unwrap().unwrap(), b"[\"b\"]");
    assert_eq!(store.keys().unwrap(), vec!["categories".to_string()]);
}

#[test]
fn test_sqlite_keys_are_independent() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store.set("transactions", b"[]").unwrap();
    store.set("goals", b"[{}]").unwrap();
    assert_eq!(store.get("transactions").unwrap().unwrap(), b"[]");
    assert_eq!(store.get("goals").unwrap().unwrap(), b"[{}]");
    assert_eq!(
        store.keys().unwrap(),
        vec!["goals".to_string(), "transactions".to_string()]
    );
}

#[test]
fn test_sqlite_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    {
        let mut store = SqliteStore::open(&path).unwrap();
        store.set("transactions", b"[1,2,3]").unwrap();
    }
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.get("transactions").unwrap().unwrap(), b"[1,2,3]");
}

#[test]
fn test_sqlite_version_row_written_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    drop(SqliteStore::open(&path).unwrap());
    let store = SqliteStore::open(&path).unwrap();
    assert_eq!(store.schema_version().unwrap(), schema::CURRENT_VERSION);
    drop(store);

    let conn = rusqlite::Connection::open(&path).unwrap();
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn test_sqlite_refuses_newer_schema() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    {
        let conn = rusqlite::Connection::open(&path).unwrap();
        conn.execute_batch(schema::SCHEMA_V1).unwrap();
        conn.execute("INSERT INTO schema_version (version) VALUES (99)", [])
            .unwrap();
    }
    let err = SqliteStore::open(&path).err().unwrap();
    assert!(format!("{err:#}").contains("99"));
}
