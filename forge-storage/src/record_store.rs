//! Substrate traits for persisted state.

use crate::error::StorageResult;
use forge_types::ProjectId;
use serde::{Deserialize, Serialize};

/// One persisted project row. The ciphertext is opaque to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    pub id: ProjectId,
    /// `base64(nonce || sealed JSON)`.
    pub ciphertext: String,
}

/// Keyed collection of encrypted project rows.
///
/// Single-row operations are atomic. There are no multi-row transactions.
pub trait RecordStore: Send + Sync {
    /// Persists a new row under a freshly allocated id: one greater than the
    /// largest persisted id, or 1 when empty. Allocation and write happen in
    /// one step.
    fn insert(&self, ciphertext: &str) -> StorageResult<ProjectId>;

    /// Writes a row, replacing any existing row with the same id.
    fn put(&self, record: &EncryptedRecord) -> StorageResult<()>;

    /// Fetches a row.
    fn get(&self, id: ProjectId) -> StorageResult<Option<EncryptedRecord>>;

    /// Fetches every row in ascending id order.
    fn get_all(&self) -> StorageResult<Vec<EncryptedRecord>>;

    /// Lists every persisted id in ascending order.
    fn keys(&self) -> StorageResult<Vec<ProjectId>>;

    /// Removes a row. Returns whether a row existed.
    fn delete(&self, id: ProjectId) -> StorageResult<bool>;

    /// Number of persisted rows.
    fn count(&self) -> StorageResult<usize>;
}

/// Small persistent string map for plaintext settings.
pub trait SettingsStore: Send + Sync {
    fn get_item(&self, name: &str) -> StorageResult<Option<String>>;

    fn set_item(&self, name: &str, value: &str) -> StorageResult<()>;
}
