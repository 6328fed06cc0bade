//! The sealed-record wire format.
//!
//! A record is `base64(nonce || ciphertext || tag)`, sealed with
//! ChaCha20-Poly1305 under a nonce drawn fresh from the OS for every call.

use crate::error::{CryptoError, CryptoResult};
use crate::key::MasterKey;
use base64::{engine::general_purpose::STANDARD, Engine};
use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::{ChaCha20Poly1305, Nonce};
use rand::RngCore;

/// Nonce length in bytes.
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag length in bytes, carried at the end of the ciphertext.
pub const TAG_SIZE: usize = 16;

/// A decoded record: the nonce and the tagged ciphertext.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedData {
    pub nonce: [u8; NONCE_SIZE],
    pub ciphertext: Vec<u8>,
}

impl EncryptedData {
    pub fn to_base64(&self) -> String {
        STANDARD.encode([self.nonce.as_slice(), self.ciphertext.as_slice()].concat())
    }

    /// Parses the wire form.
    ///
    /// Anything that is not base64, or too short to hold a nonce and a tag,
    /// is a [`CryptoError::Format`]. Whether the bytes authenticate is only
    /// known at [`decrypt`].
    pub fn from_base64(encoded: &str) -> CryptoResult<Self> {
        let raw = STANDARD
            .decode(encoded)
            .map_err(|e| CryptoError::Format(format!("invalid base64: {e}")))?;
        if raw.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::Format(format!(
                "record is {} bytes, need at least {}",
                raw.len(),
                NONCE_SIZE + TAG_SIZE
            )));
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_SIZE);
        let nonce: [u8; NONCE_SIZE] = nonce
            .try_into()
            .map_err(|_| CryptoError::Format("nonce length".into()))?;
        Ok(Self {
            nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

fn aead(key: &MasterKey) -> ChaCha20Poly1305 {
    ChaCha20Poly1305::new(key.as_bytes().into())
}

/// Seals `plaintext` under `key` with a fresh random nonce.
pub fn encrypt(key: &MasterKey, plaintext: &[u8]) -> CryptoResult<EncryptedData> {
    let mut nonce = [0u8; NONCE_SIZE];
    rand::rngs::OsRng.fill_bytes(&mut nonce);
    let ciphertext = aead(key)
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(|e| CryptoError::Encryption(e.to_string()))?;
    Ok(EncryptedData { nonce, ciphertext })
}

/// Opens a sealed record. A tag mismatch (wrong key, flipped bit, truncated
/// body) is [`CryptoError::Authentication`].
pub fn decrypt(key: &MasterKey, sealed: &EncryptedData) -> CryptoResult<Vec<u8>> {
    aead(key)
        .decrypt(Nonce::from_slice(&sealed.nonce), sealed.ciphertext.as_slice())
        .map_err(|_| CryptoError::Authentication)
}
