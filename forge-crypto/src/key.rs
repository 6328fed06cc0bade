//! Key derivation and management.
//!
//! Uses PBKDF2-HMAC-SHA256 with a fixed round count. The count is a constant
//! rather than a parameter: every record in a vault was sealed under a key
//! derived with it, and changing it would orphan them all.

use crate::error::{CryptoError, CryptoResult};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of encryption keys in bytes (256 bits for ChaCha20).
pub const KEY_SIZE: usize = 32;

/// Size of salt in bytes.
pub const SALT_SIZE: usize = 16;

/// PBKDF2 iteration count.
pub const PBKDF2_ROUNDS: u32 = 250_000;

/// The vault's symmetric key, zeroized on drop.
///
/// Only ever held in memory; there is no way to serialize it.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct MasterKey {
    bytes: [u8; KEY_SIZE],
}

impl MasterKey {
    /// Creates a key from raw bytes.
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self { bytes }
    }

    /// Generates a random key that is not tied to any password.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Returns the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Salt for key derivation. Not secret; persisted in plaintext.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Salt {
    bytes: [u8; SALT_SIZE],
}

impl Salt {
    /// Generates a random salt.
    pub fn random() -> Self {
        let mut bytes = [0u8; SALT_SIZE];
        rand::rngs::OsRng.fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a salt from raw bytes.
    pub fn from_bytes(bytes: [u8; SALT_SIZE]) -> Self {
        Self { bytes }
    }

    /// Returns the salt bytes.
    pub fn as_bytes(&self) -> &[u8; SALT_SIZE] {
        &self.bytes
    }

    /// Encodes to base64 for the settings store.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.bytes)
    }

    /// Decodes a persisted salt.
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let decoded = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CryptoError::Format(format!("invalid salt base64: {e}")))?;
        let bytes: [u8; SALT_SIZE] = decoded.as_slice().try_into().map_err(|_| {
            CryptoError::Format(format!(
                "salt must be {SALT_SIZE} bytes, got {}",
                decoded.len()
            ))
        })?;
        Ok(Self { bytes })
    }
}

/// Derives the master key from a password.
///
/// Deterministic: the same password and salt always produce the same key.
/// Never fails; a wrong password simply yields a key that will not open any
/// existing record.
pub fn derive_key(password: &str, salt: &Salt) -> MasterKey {
    let mut bytes = [0u8; KEY_SIZE];
    pbkdf2::pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut bytes);
    let key = MasterKey::from_bytes(bytes);
    bytes.zeroize();
    key
}
