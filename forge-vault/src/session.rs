//! Vault lifecycle and master key ownership.

use crate::config::VaultConfig;
use crate::error::{VaultError, VaultResult};
use crate::salt::SaltStore;
use forge_crypto::{derive_key, CipherService};
use forge_storage::{ProjectStore, SettingsStore};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

const INVALID_PASSWORD: &str = "Invalid password. Please try again.";
const ALREADY_INITIALIZED: &str = "Vault is already initialized.";
const NOT_INITIALIZED: &str = "Vault is not initialized.";

/// Known plaintext sealed under a candidate key to prove the key works.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
struct Sentinel {
    test: String,
}

impl Sentinel {
    fn expected() -> Self {
        Self { test: "ok".into() }
    }
}

/// Where a vault is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultState {
    /// No salt persisted; a master password must be set first.
    Uninitialized,
    /// Salt persisted, no key held.
    Locked,
    /// Key held and bound to the project store.
    Unlocked,
}

struct SessionInner {
    cipher: Option<CipherService>,
    last_error: Option<String>,
}

/// Owns the master key and drives the project store's locked state.
///
/// Lock transitions are serialized by an internal mutex, so two concurrent
/// logins cannot interleave their verify-then-publish steps. Dropping the
/// session locks the project store.
pub struct VaultSession {
    salts: SaltStore,
    settings: Arc<dyn SettingsStore>,
    projects: Arc<ProjectStore>,
    verifier_key: String,
    min_password_len: usize,
    inner: Mutex<SessionInner>,
}

impl VaultSession {
    /// Creates a locked session over `settings` that unlocks `projects`.
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        projects: Arc<ProjectStore>,
        config: &VaultConfig,
    ) -> Self {
        projects.unbind();
        Self {
            salts: SaltStore::new(Arc::clone(&settings), config.salt_key.clone()),
            settings,
            projects,
            verifier_key: config.verifier_key.clone(),
            min_password_len: config.min_password_len,
            inner: Mutex::new(SessionInner {
                cipher: None,
                last_error: None,
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// True iff a salt has been persisted, i.e. a master password was set.
    pub fn has_vault(&self) -> VaultResult<bool> {
        self.salts.exists()
    }

    /// Alias of [`has_vault`](Self::has_vault).
    pub fn is_initialized(&self) -> VaultResult<bool> {
        self.has_vault()
    }

    pub fn state(&self) -> VaultResult<VaultState> {
        if !self.is_locked() {
            return Ok(VaultState::Unlocked);
        }
        if self.has_vault()? {
            Ok(VaultState::Locked)
        } else {
            Ok(VaultState::Uninitialized)
        }
    }

    /// True while no key is held.
    pub fn is_locked(&self) -> bool {
        self.inner().cipher.is_none()
    }

    /// User-facing message for the most recent failed transition.
    ///
    /// Cleared by the next successful transition.
    pub fn last_error(&self) -> Option<String> {
        self.inner().last_error.clone()
    }

    /// Creates the vault: persists a salt, derives the key and unlocks.
    ///
    /// Fails with `AlreadyInitialized` if a salt already exists, leaving any
    /// held key untouched.
    pub fn set_master_password(&self, password: &str) -> VaultResult<()> {
        let mut inner = self.inner();

        if self.salts.exists()? {
            inner.last_error = Some(ALREADY_INITIALIZED.into());
            warn!("refused to re-initialize vault");
            return Err(VaultError::AlreadyInitialized);
        }
        if password.chars().count() < self.min_password_len {
            inner.last_error = Some(format!(
                "Password must be at least {} characters long.",
                self.min_password_len
            ));
            return Err(VaultError::PasswordTooShort {
                min_len: self.min_password_len,
            });
        }

        let salt = self.salts.get_or_create()?;
        let cipher = CipherService::new(derive_key(password, &salt));
        let verifier = cipher.encrypt(&Sentinel::expected())?;
        self.settings.set_item(&self.verifier_key, &verifier)?;

        self.publish(&mut inner, cipher);
        info!("vault created and unlocked");
        Ok(())
    }

    /// Unlocks an existing vault.
    ///
    /// Any failure while checking the candidate key is reported as
    /// `InvalidPassword`, and the session ends up locked even if it was
    /// unlocked before.
    pub fn login(&self, password: &str) -> VaultResult<()> {
        let mut inner = self.inner();

        if !self.salts.exists()? {
            inner.last_error = Some(NOT_INITIALIZED.into());
            return Err(VaultError::NotInitialized);
        }

        let salt = self.salts.get_or_create()?;
        let candidate = CipherService::new(derive_key(password, &salt));

        match self.verify(&candidate) {
            Ok(true) => {
                self.publish(&mut inner, candidate);
                info!("vault unlocked");
                Ok(())
            }
            outcome => {
                if let Err(e) = outcome {
                    debug!(error = %e, "password verification errored");
                }
                self.withdraw(&mut inner);
                inner.last_error = Some(INVALID_PASSWORD.into());
                warn!("login rejected");
                Err(VaultError::InvalidPassword)
            }
        }
    }

    /// Drops the key and locks the project store. Idempotent.
    pub fn logout(&self) {
        let mut inner = self.inner();
        let was_unlocked = inner.cipher.is_some();
        self.withdraw(&mut inner);
        inner.last_error = None;
        if was_unlocked {
            info!("vault locked");
        }
    }

    fn verify(&self, candidate: &CipherService) -> VaultResult<bool> {
        let sealed = candidate.encrypt(&Sentinel::expected())?;
        let opened: Sentinel = candidate.decrypt(&sealed)?;
        if opened != Sentinel::expected() {
            return Ok(false);
        }

        match self.settings.get_item(&self.verifier_key)? {
            Some(verifier) => Ok(matches!(
                candidate.decrypt::<Sentinel>(&verifier),
                Ok(s) if s == Sentinel::expected()
            )),
            None => {
                // Vault created before verifiers were persisted.
                if !self.projects.opens_existing_records(candidate)? {
                    return Ok(false);
                }
                let verifier = candidate.encrypt(&Sentinel::expected())?;
                self.settings.set_item(&self.verifier_key, &verifier)?;
                info!("persisted password verifier for legacy vault");
                Ok(true)
            }
        }
    }

    fn publish(&self, inner: &mut SessionInner, cipher: CipherService) {
        self.projects.bind(Arc::new(cipher.clone()));
        inner.cipher = Some(cipher);
        inner.last_error = None;
    }

    fn withdraw(&self, inner: &mut SessionInner) {
        self.projects.unbind();
        inner.cipher = None;
    }
}

impl Drop for VaultSession {
    fn drop(&mut self) {
        self.projects.unbind();
    }
}

impl std::fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSession")
            .field("locked", &self.is_locked())
            .finish_non_exhaustive()
    }
}
