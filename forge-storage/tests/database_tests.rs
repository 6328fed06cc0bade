use forge_storage::{EncryptedRecord, RecordStore, SettingsStore, SqliteDatabase};
use forge_types::ProjectId;
use tempfile::TempDir;

fn record(id: i64, ciphertext: &str) -> EncryptedRecord {
    EncryptedRecord {
        id: ProjectId::new(id),
        ciphertext: ciphertext.to_string(),
    }
}

// ── Id allocation ────────────────────────────────────────────────

#[test]
fn first_insert_gets_id_one() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    let id = db.records().insert("c1").unwrap();
    assert_eq!(id, ProjectId::new(1));
}

#[test]
fn insert_allocates_max_plus_one() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    let records = db.records();
    records.put(&record(10, "c10")).unwrap();
    records.put(&record(3, "c3")).unwrap();
    assert_eq!(records.insert("next").unwrap(), ProjectId::new(11));
}

#[test]
fn insert_after_deleting_max_reuses_slot() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    let records = db.records();
    records.insert("a").unwrap();
    let b = records.insert("b").unwrap();
    records.delete(b).unwrap();
    assert_eq!(records.insert("c").unwrap(), b);
}

#[test]
fn concurrent_inserts_get_distinct_ids() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let records = db.records();
            std::thread::spawn(move || records.insert(&format!("c{i}")).unwrap())
        })
        .collect();
    let mut ids: Vec<ProjectId> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 8);
    assert_eq!(ids.first(), Some(&ProjectId::new(1)));
    assert_eq!(ids.last(), Some(&ProjectId::new(8)));
}

// ── CRUD ─────────────────────────────────────────────────────────

#[test]
fn put_get_roundtrip() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    let records = db.records();
    records.put(&record(1, "cipher")).unwrap();
    assert_eq!(records.get(ProjectId::new(1)).unwrap(), Some(record(1, "cipher")));
}

#[test]
fn put_overwrites() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    let records = db.records();
    records.put(&record(1, "v1")).unwrap();
    records.put(&record(1, "v2")).unwrap();
    assert_eq!(records.get(ProjectId::new(1)).unwrap().unwrap().ciphertext, "v2");
    assert_eq!(records.count().unwrap(), 1);
}

#[test]
fn get_missing_is_none() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    assert_eq!(db.records().get(ProjectId::new(99)).unwrap(), None);
}

#[test]
fn get_all_and_keys_are_ordered() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    let records = db.records();
    records.put(&record(5, "e")).unwrap();
    records.put(&record(2, "b")).unwrap();
    records.put(&record(9, "i")).unwrap();

    let keys: Vec<i64> = records.keys().unwrap().iter().map(ProjectId::get).collect();
    assert_eq!(keys, vec![2, 5, 9]);

    let all = records.get_all().unwrap();
    assert_eq!(all, vec![record(2, "b"), record(5, "e"), record(9, "i")]);
}

#[test]
fn delete_reports_existence() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    let records = db.records();
    let id = records.insert("x").unwrap();
    assert!(records.delete(id).unwrap());
    assert!(!records.delete(id).unwrap());
    assert_eq!(records.count().unwrap(), 0);
}

// ── Settings ─────────────────────────────────────────────────────

#[test]
fn settings_get_set() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    let settings = db.settings();
    assert_eq!(settings.get_item("ai-forge-salt").unwrap(), None);
    settings.set_item("ai-forge-salt", "c2FsdA==").unwrap();
    assert_eq!(
        settings.get_item("ai-forge-salt").unwrap().as_deref(),
        Some("c2FsdA==")
    );
    settings.set_item("ai-forge-salt", "b3RoZXI=").unwrap();
    assert_eq!(
        settings.get_item("ai-forge-salt").unwrap().as_deref(),
        Some("b3RoZXI=")
    );
}

#[test]
fn settings_and_records_share_database() {
    let db = SqliteDatabase::open_in_memory().unwrap();
    db.settings().set_item("k", "v").unwrap();
    db.records().insert("c").unwrap();
    let clone = db.clone();
    assert_eq!(clone.settings().get_item("k").unwrap().as_deref(), Some("v"));
    assert_eq!(clone.records().count().unwrap(), 1);
}

// ── File-backed ──────────────────────────────────────────────────

#[test]
fn file_backed_persistence() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("nested").join("forge.sqlite");

    {
        let db = SqliteDatabase::open(&path).unwrap();
        db.records().insert("persisted").unwrap();
        db.settings().set_item("salt", "abc").unwrap();
    }

    let db = SqliteDatabase::open(&path).unwrap();
    assert_eq!(
        db.records().get(ProjectId::new(1)).unwrap().unwrap().ciphertext,
        "persisted"
    );
    assert_eq!(db.settings().get_item("salt").unwrap().as_deref(), Some("abc"));
}
