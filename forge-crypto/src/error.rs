//! Error types for the encryption layer.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in cryptographic operations.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The authentication tag did not verify: wrong key, corrupted or
    /// tampered ciphertext.
    #[error("authentication failed (wrong key or tampered data)")]
    Authentication,

    /// The ciphertext is not validly structured.
    #[error("malformed ciphertext: {0}")]
    Format(String),

    /// Encryption failed.
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
