//! Salt management.
//!
//! The salt is created once per install and never replaced: regenerating it
//! would orphan every record sealed under keys derived from the old one.

use crate::error::VaultResult;
use forge_crypto::Salt;
use forge_storage::SettingsStore;
use std::sync::Arc;
use tracing::info;

/// Persists the vault's KDF salt in the plaintext settings store.
#[derive(Clone)]
pub struct SaltStore {
    settings: Arc<dyn SettingsStore>,
    key: String,
}

impl SaltStore {
    pub fn new(settings: Arc<dyn SettingsStore>, key: impl Into<String>) -> Self {
        Self {
            settings,
            key: key.into(),
        }
    }

    /// True iff a salt has ever been persisted.
    pub fn exists(&self) -> VaultResult<bool> {
        Ok(self.settings.get_item(&self.key)?.is_some())
    }

    /// Returns the persisted salt, creating and persisting a random one on
    /// first call.
    pub fn get_or_create(&self) -> VaultResult<Salt> {
        if let Some(encoded) = self.settings.get_item(&self.key)? {
            return Ok(Salt::from_base64(&encoded)?);
        }
        let salt = Salt::random();
        self.settings.set_item(&self.key, &salt.to_base64())?;
        info!("created vault salt");
        Ok(salt)
    }
}
