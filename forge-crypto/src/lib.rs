//! Encryption layer for the AI Forge vault.
//!
//! Provides record encryption using:
//! - PBKDF2-HMAC-SHA256 for key derivation from the master password
//! - ChaCha20-Poly1305 for authenticated encryption
//! - Secure key handling with zeroization
//!
//! # Architecture
//!
//! 1. **Master Key**: Derived from the user's password and a per-install salt.
//!    The key is never stored; it is derived each time the vault is unlocked
//!    and zeroized when dropped.
//!
//! 2. **Cipher Service**: A capability bound to one master key. Consumers
//!    (the project store) hold a [`DataEncryptor`] and never see key bytes.
//!
//! Ciphertexts are `base64(nonce || sealed)` strings. A wrong key, a flipped
//! bit or a truncated record all surface as [`CryptoError::Authentication`];
//! malformed base64 or a record too short to hold a nonce and tag surface as
//! [`CryptoError::Format`].

mod cipher;
mod encryptor;
mod error;
mod key;

pub use cipher::{decrypt, encrypt, EncryptedData, NONCE_SIZE, TAG_SIZE};
pub use encryptor::{CipherService, DataEncryptor};
pub use error::{CryptoError, CryptoResult};
pub use key::{derive_key, MasterKey, Salt, KEY_SIZE, PBKDF2_ROUNDS, SALT_SIZE};
