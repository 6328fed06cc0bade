//! SQLite implementation of the storage substrate.

use crate::error::{StorageError, StorageResult};
use crate::record_store::{EncryptedRecord, RecordStore, SettingsStore};
use forge_types::ProjectId;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// One SQLite database holding the `projects` and `settings` tables.
///
/// Cloning is cheap; clones share the connection.
#[derive(Clone)]
pub struct SqliteDatabase {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteDatabase {
    /// Opens (or creates) a database file.
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        // Durable single-record writes across power loss.
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = FULL;")?;
        debug!(path = %path.display(), "opened vault database");
        Self::with_connection(conn)
    }

    /// Opens an in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> StorageResult<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> StorageResult<()> {
        let conn = lock(&self.conn)?;
        // No AUTOINCREMENT: SQLite then assigns max(id) + 1 on insert.
        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS projects (
                id INTEGER PRIMARY KEY,
                ciphertext TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS settings (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Handle to the `projects` table.
    pub fn records(&self) -> SqliteRecordStore {
        SqliteRecordStore {
            conn: Arc::clone(&self.conn),
        }
    }

    /// Handle to the `settings` table.
    pub fn settings(&self) -> SqliteSettingsStore {
        SqliteSettingsStore {
            conn: Arc::clone(&self.conn),
        }
    }
}

fn lock(conn: &Mutex<Connection>) -> StorageResult<MutexGuard<'_, Connection>> {
    conn.lock().map_err(|_| StorageError::Poisoned)
}

/// [`RecordStore`] over the `projects` table.
#[derive(Clone)]
pub struct SqliteRecordStore {
    conn: Arc<Mutex<Connection>>,
}

impl RecordStore for SqliteRecordStore {
    fn insert(&self, ciphertext: &str) -> StorageResult<ProjectId> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO projects (ciphertext) VALUES (?1)",
            params![ciphertext],
        )?;
        Ok(ProjectId::new(conn.last_insert_rowid()))
    }

    fn put(&self, record: &EncryptedRecord) -> StorageResult<()> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO projects (id, ciphertext) VALUES (?1, ?2)
             ON CONFLICT(id) DO UPDATE SET ciphertext = excluded.ciphertext",
            params![record.id.get(), record.ciphertext],
        )?;
        Ok(())
    }

    fn get(&self, id: ProjectId) -> StorageResult<Option<EncryptedRecord>> {
        let conn = lock(&self.conn)?;
        let ciphertext: Option<String> = conn
            .query_row(
                "SELECT ciphertext FROM projects WHERE id = ?1",
                params![id.get()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ciphertext.map(|ciphertext| EncryptedRecord { id, ciphertext }))
    }

    fn get_all(&self) -> StorageResult<Vec<EncryptedRecord>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT id, ciphertext FROM projects ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(EncryptedRecord {
                id: ProjectId::new(row.get(0)?),
                ciphertext: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn keys(&self) -> StorageResult<Vec<ProjectId>> {
        let conn = lock(&self.conn)?;
        let mut stmt = conn.prepare("SELECT id FROM projects ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, i64>(0).map(ProjectId::new))?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn delete(&self, id: ProjectId) -> StorageResult<bool> {
        let conn = lock(&self.conn)?;
        let removed = conn.execute("DELETE FROM projects WHERE id = ?1", params![id.get()])?;
        Ok(removed > 0)
    }

    fn count(&self) -> StorageResult<usize> {
        let conn = lock(&self.conn)?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM projects", [], |row| row.get(0))?;
        Ok(usize::try_from(n).unwrap_or(0))
    }
}

/// [`SettingsStore`] over the `settings` table.
#[derive(Clone)]
pub struct SqliteSettingsStore {
    conn: Arc<Mutex<Connection>>,
}

impl SettingsStore for SqliteSettingsStore {
    fn get_item(&self, name: &str) -> StorageResult<Option<String>> {
        let conn = lock(&self.conn)?;
        Ok(conn
            .query_row(
                "SELECT value FROM settings WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?)
    }

    fn set_item(&self, name: &str, value: &str) -> StorageResult<()> {
        let conn = lock(&self.conn)?;
        conn.execute(
            "INSERT INTO settings (name, value) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET value = excluded.value",
            params![name, value],
        )?;
        Ok(())
    }
}
