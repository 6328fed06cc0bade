//! Encrypted project collection.

use crate::error::{StorageError, StorageResult};
use crate::record_store::{EncryptedRecord, RecordStore};
use chrono::Utc;
use forge_crypto::DataEncryptor;
use forge_types::{normalize_tags, NewProject, Project, ProjectId, SearchQuery};
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

/// Typed CRUD and search over encrypted project rows.
///
/// The store starts locked. The vault session binds a cipher on unlock and
/// unbinds it on lock; while unbound every operation returns
/// [`StorageError::Locked`] before touching the substrate.
pub struct ProjectStore {
    records: Arc<dyn RecordStore>,
    encryptor: RwLock<Option<Arc<dyn DataEncryptor>>>,
}

impl ProjectStore {
    /// Creates a locked store over `records`.
    pub fn new(records: Arc<dyn RecordStore>) -> Self {
        Self {
            records,
            encryptor: RwLock::new(None),
        }
    }

    /// Publishes the cipher used for every subsequent operation.
    ///
    /// Only `forge_vault::VaultSession` calls this, after verifying the key.
    /// Binding any other cipher bypasses password verification.
    #[doc(hidden)]
    pub fn bind(&self, encryptor: Arc<dyn DataEncryptor>) {
        match self.encryptor.write() {
            Ok(mut slot) => *slot = Some(encryptor),
            Err(poisoned) => *poisoned.into_inner() = Some(encryptor),
        }
    }

    /// Drops the bound cipher. Subsequent operations fail with `Locked`.
    #[doc(hidden)]
    pub fn unbind(&self) {
        match self.encryptor.write() {
            Ok(mut slot) => *slot = None,
            Err(poisoned) => *poisoned.into_inner() = None,
        }
    }

    /// Whether a cipher is currently bound.
    pub fn is_bound(&self) -> bool {
        self.encryptor.read().map(|slot| slot.is_some()).unwrap_or(false)
    }

    fn encryptor(&self) -> StorageResult<Arc<dyn DataEncryptor>> {
        self.encryptor
            .read()
            .map_err(|_| StorageError::Poisoned)?
            .clone()
            .ok_or(StorageError::Locked)
    }

    /// Encrypts and persists a new project, returning its id.
    pub fn add_project(&self, new: NewProject) -> StorageResult<ProjectId> {
        let encryptor = self.encryptor()?;
        let project = Project::from_new(new, Utc::now());
        let ciphertext = seal(encryptor.as_ref(), &project)?;
        let id = self.records.insert(&ciphertext)?;
        debug!(%id, kind = %project.kind(), "project added");
        Ok(id)
    }

    /// Re-encrypts `project` over its stored row. Last write wins.
    ///
    /// The stored `created_at` is kept even if the caller's copy differs.
    pub fn update_project(&self, project: &Project) -> StorageResult<()> {
        let encryptor = self.encryptor()?;
        let id = project.id.ok_or(StorageError::MissingId)?;

        let mut updated = project.clone();
        updated.tags = normalize_tags(&project.tags);
        if let Some(record) = self.records.get(id)? {
            match open(encryptor.as_ref(), &record) {
                Ok(stored) => updated.created_at = stored.created_at,
                Err(e) => warn!(%id, error = %e, "stored project unreadable; overwriting"),
            }
        }

        let ciphertext = seal(encryptor.as_ref(), &updated)?;
        self.records.put(&EncryptedRecord { id, ciphertext })?;
        debug!(%id, "project updated");
        Ok(())
    }

    /// Fetches and decrypts one project.
    ///
    /// `Ok(None)` means no row exists. A row that fails to decrypt is an
    /// error, not a miss.
    pub fn get_project(&self, id: ProjectId) -> StorageResult<Option<Project>> {
        let encryptor = self.encryptor()?;
        match self.records.get(id)? {
            Some(record) => Ok(Some(open(encryptor.as_ref(), &record)?)),
            None => Ok(None),
        }
    }

    /// Decrypts every project, newest first.
    ///
    /// Rows that fail to decrypt are skipped and logged so one corrupted
    /// record does not hide the rest of the vault.
    pub fn get_all_projects(&self) -> StorageResult<Vec<Project>> {
        let encryptor = self.encryptor()?;
        let mut projects = self.open_all(encryptor.as_ref())?;
        projects.sort_by(Project::newest_first);
        Ok(projects)
    }

    /// Returns projects whose tags, prompt, file name or textual payload
    /// contain `query` (case-insensitive), newest first. An empty query
    /// returns everything.
    pub fn search_projects(&self, query: &str) -> StorageResult<Vec<Project>> {
        let encryptor = self.encryptor()?;
        let query = SearchQuery::new(query);
        let mut projects: Vec<Project> = self
            .open_all(encryptor.as_ref())?
            .into_iter()
            .filter(|p| query.matches(p))
            .collect();
        projects.sort_by(Project::newest_first);
        Ok(projects)
    }

    /// Removes a project. Deleting an absent id succeeds.
    pub fn delete_project(&self, id: ProjectId) -> StorageResult<()> {
        self.encryptor()?;
        if self.records.delete(id)? {
            debug!(%id, "project deleted");
        }
        Ok(())
    }

    /// Number of stored projects.
    pub fn count(&self) -> StorageResult<usize> {
        self.encryptor()?;
        self.records.count()
    }

    /// Checks a candidate cipher against the stored rows without binding it.
    ///
    /// Accepts if any row opens, so one corrupted record cannot reject the
    /// right key. Rejects only when rows exist and none of them open. An
    /// empty store accepts any cipher.
    pub fn opens_existing_records(&self, candidate: &dyn DataEncryptor) -> StorageResult<bool> {
        let records = self.records.get_all()?;
        if records.is_empty() {
            return Ok(true);
        }
        let opened = records
            .iter()
            .any(|record| candidate.decrypt_bytes(&record.ciphertext).is_ok());
        if !opened {
            debug!(rows = records.len(), "candidate cipher opened no stored row");
        }
        Ok(opened)
    }

    fn open_all(&self, encryptor: &dyn DataEncryptor) -> StorageResult<Vec<Project>> {
        let records = self.records.get_all()?;
        let mut projects = Vec::with_capacity(records.len());
        for record in &records {
            match open(encryptor, record) {
                Ok(project) => projects.push(project),
                Err(e) => warn!(id = %record.id, error = %e, "skipping unreadable project"),
            }
        }
        Ok(projects)
    }
}

/// Seals a project body. Row keys are authoritative, so the id is stripped
/// from the plaintext.
fn seal(encryptor: &dyn DataEncryptor, project: &Project) -> StorageResult<String> {
    let mut body = serde_json::to_value(project)?;
    if let Some(fields) = body.as_object_mut() {
        fields.remove("id");
    }
    let plaintext = serde_json::to_vec(&body)?;
    Ok(encryptor.encrypt_bytes(&plaintext)?)
}

fn open(encryptor: &dyn DataEncryptor, record: &EncryptedRecord) -> StorageResult<Project> {
    let plaintext = encryptor.decrypt_bytes(&record.ciphertext)?;
    let mut project: Project = serde_json::from_slice(&plaintext)?;
    project.id = Some(record.id);
    Ok(project)
}
