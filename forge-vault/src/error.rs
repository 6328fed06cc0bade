//! Error types for the vault layer.

use forge_crypto::CryptoError;
use forge_storage::StorageError;
use thiserror::Error;

/// Result type for vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

/// Errors that can occur in vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// No salt has been persisted yet.
    #[error("vault not initialized")]
    NotInitialized,

    /// A master password was already set for this vault.
    #[error("vault is already initialized")]
    AlreadyInitialized,

    /// The operation needs an unlocked vault.
    #[error("vault is locked")]
    Locked,

    /// Login verification failed. Deliberately carries no cause.
    #[error("invalid password")]
    InvalidPassword,

    #[error("password must be at least {min_len} characters")]
    PasswordTooShort { min_len: usize },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(StorageError),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl From<StorageError> for VaultError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Locked => Self::Locked,
            other => Self::Storage(other),
        }
    }
}
