//! The cipher capability handed to the storage layer.
//!
//! Consumers (the project store) depend on `Arc<dyn DataEncryptor>` and never
//! see raw keys. [`CipherService`] is the implementation the vault session
//! publishes while it is unlocked; dropping the last handle drops the key.

use crate::cipher::{self, EncryptedData};
use crate::error::CryptoResult;
use crate::key::MasterKey;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Trait for sealing and opening opaque byte payloads.
///
/// Implementations own the key material.
pub trait DataEncryptor: Send + Sync {
    /// Seals `data`, returning `base64(nonce || ciphertext)`.
    fn encrypt_bytes(&self, data: &[u8]) -> CryptoResult<String>;

    /// Opens a payload previously produced by `encrypt_bytes`.
    fn decrypt_bytes(&self, encoded: &str) -> CryptoResult<Vec<u8>>;
}

/// Authenticated encryption of JSON-serializable values under one master key.
#[derive(Clone)]
pub struct CipherService {
    key: Arc<MasterKey>,
}

impl CipherService {
    /// Binds a service to `key`.
    pub fn new(key: MasterKey) -> Self {
        Self { key: Arc::new(key) }
    }

    /// Serializes `data` to JSON and seals it.
    pub fn encrypt<T: Serialize + ?Sized>(&self, data: &T) -> CryptoResult<String> {
        let plaintext = serde_json::to_vec(data)?;
        self.encrypt_bytes(&plaintext)
    }

    /// Opens `encoded` and deserializes the JSON payload.
    pub fn decrypt<T: DeserializeOwned>(&self, encoded: &str) -> CryptoResult<T> {
        let plaintext = self.decrypt_bytes(encoded)?;
        Ok(serde_json::from_slice(&plaintext)?)
    }
}

impl DataEncryptor for CipherService {
    fn encrypt_bytes(&self, data: &[u8]) -> CryptoResult<String> {
        Ok(cipher::encrypt(&self.key, data)?.to_base64())
    }

    fn decrypt_bytes(&self, encoded: &str) -> CryptoResult<Vec<u8>> {
        let encrypted = EncryptedData::from_base64(encoded)?;
        cipher::decrypt(&self.key, &encrypted)
    }
}

impl std::fmt::Debug for CipherService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherService")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
