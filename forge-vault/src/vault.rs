//! Vault facade.

use crate::config::VaultConfig;
use crate::error::VaultResult;
use crate::session::VaultSession;
use forge_storage::{ProjectStore, SqliteDatabase};
use std::sync::Arc;
use tracing::info;

/// An opened vault: one database, one session, one project store.
///
/// A freshly opened vault is always locked, even if the previous process
/// exited while unlocked.
pub struct Vault {
    session: VaultSession,
    projects: Arc<ProjectStore>,
}

impl Vault {
    /// Opens (or creates) the database named by `config`.
    pub fn open(config: &VaultConfig) -> VaultResult<Self> {
        let db = match &config.database_path {
            Some(path) => SqliteDatabase::open(path)?,
            None => SqliteDatabase::open_in_memory()?,
        };
        let projects = Arc::new(ProjectStore::new(Arc::new(db.records())));
        let session = VaultSession::new(Arc::new(db.settings()), Arc::clone(&projects), config);
        info!(
            persistent = config.database_path.is_some(),
            "vault opened"
        );
        Ok(Self { session, projects })
    }

    /// Opens a throwaway in-memory vault.
    pub fn open_in_memory() -> VaultResult<Self> {
        Self::open(&VaultConfig::in_memory())
    }

    pub fn session(&self) -> &VaultSession {
        &self.session
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    /// Shared handle to the project store, for callers that outlive a borrow.
    pub fn project_store(&self) -> Arc<ProjectStore> {
        Arc::clone(&self.projects)
    }
}
