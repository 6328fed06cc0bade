//! Password-locked vault for AI Forge projects.
//!
//! Ties the layers together:
//! - [`SaltStore`] persists the per-install KDF salt
//! - [`VaultSession`] runs the uninitialized → locked → unlocked lifecycle and
//!   exclusively owns the master key while unlocked
//! - [`Vault`] opens the database and wires the session to the
//!   [`forge_storage::ProjectStore`] it unlocks
//!
//! ```no_run
//! use forge_types::{NewProject, ProjectData};
//! use forge_vault::{Vault, VaultConfig};
//!
//! # fn main() -> forge_vault::VaultResult<()> {
//! let vault = Vault::open(&VaultConfig::at_path("forge.sqlite"))?;
//! if vault.session().has_vault()? {
//!     vault.session().login("correct-horse-battery")?;
//! } else {
//!     vault.session().set_master_password("correct-horse-battery")?;
//! }
//! let id = vault.projects().add_project(NewProject::new(ProjectData::Code {
//!     generated_code: "fn main() {}".into(),
//! }))?;
//! # let _ = id;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod salt;
mod session;
mod vault;

pub use config::VaultConfig;
pub use error::{VaultError, VaultResult};
pub use salt::SaltStore;
pub use session::{VaultSession, VaultState};
pub use vault::Vault;
