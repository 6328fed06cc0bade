//! Error types for the storage layer.

use forge_crypto::CryptoError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Encryption/decryption error.
    #[error("encryption error: {0}")]
    Crypto(#[from] CryptoError),

    /// No cipher is bound: the vault is locked.
    #[error("vault is locked")]
    Locked,

    /// An update was attempted on a project that was never persisted.
    #[error("project has no id")]
    MissingId,

    /// A previous holder of the connection panicked.
    #[error("database connection poisoned")]
    Poisoned,

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// True if the failure is an authentication failure on decrypt.
    #[must_use]
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Crypto(CryptoError::Authentication))
    }
}
