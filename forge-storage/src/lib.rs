//! SQLite storage layer for the AI Forge vault.
//!
//! Provides persistent storage for encrypted projects and the handful of
//! plaintext settings (the KDF salt, the key verifier) the vault needs before
//! it can decrypt anything.
//!
//! # Architecture
//!
//! - [`RecordStore`] and [`SettingsStore`] are the substrate seams: one row per
//!   project keyed by integer id, and a small string key-value table.
//! - [`SqliteDatabase`] implements both over a single connection.
//! - [`ProjectStore`] layers typed CRUD and search on top, delegating every
//!   plaintext transform to a bound [`forge_crypto::DataEncryptor`]. With no
//!   encryptor bound, every operation fails with [`StorageError::Locked`].

mod database;
mod error;
mod project_store;
mod record_store;

pub use database::{SqliteDatabase, SqliteRecordStore, SqliteSettingsStore};
pub use error::{StorageError, StorageResult};
pub use project_store::ProjectStore;
pub use record_store::{EncryptedRecord, RecordStore, SettingsStore};
