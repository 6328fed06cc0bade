//! Vault configuration.

use crate::error::{VaultError, VaultResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where the vault lives and how it names its plaintext settings.
///
/// The KDF round count is deliberately absent: it is a constant of the
/// crypto layer, so every record in a vault stays decryptable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// SQLite file; `None` keeps everything in memory.
    pub database_path: Option<PathBuf>,
    /// Settings entry holding the base64 salt.
    pub salt_key: String,
    /// Settings entry holding the sealed password verifier.
    pub verifier_key: String,
    /// Shortest master password accepted when creating a vault.
    pub min_password_len: usize,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            salt_key: "ai-forge-salt".into(),
            verifier_key: "ai-forge-verifier".into(),
            min_password_len: 8,
        }
    }
}

impl VaultConfig {
    /// An in-memory vault with default names.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// A file-backed vault with default names.
    pub fn at_path(path: impl AsRef<Path>) -> Self {
        Self {
            database_path: Some(path.as_ref().to_path_buf()),
            ..Self::default()
        }
    }

    /// Parses a JSON settings document; missing fields take their defaults.
    pub fn from_json(json: &str) -> VaultResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| VaultError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> VaultResult<()> {
        if self.salt_key.is_empty() || self.verifier_key.is_empty() {
            return Err(VaultError::Config("settings keys must not be empty".into()));
        }
        if self.salt_key == self.verifier_key {
            return Err(VaultError::Config(
                "salt_key and verifier_key must differ".into(),
            ));
        }
        Ok(())
    }
}
