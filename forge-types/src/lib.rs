//! Core type definitions for the AI Forge vault.
//!
//! This crate defines the plaintext side of the vault:
//! - Project identifiers assigned by the store
//! - The closed set of project kinds (review, code, image, chat) and their payloads
//! - Tag normalization and case-insensitive search matching
//!
//! Nothing here knows about keys or ciphertext; projects are serialized to JSON
//! and handed to the crypto layer as opaque bytes.

mod ids;
mod payload;
mod project;
mod search;
mod tags;

pub use ids::ProjectId;
pub use payload::{
    ChatMessage, ChatRole, CodeReview, Correction, GroundingChunk, Persona, Recommendation,
    WebSource, WorkspaceAsset,
};
pub use project::{NewProject, Project, ProjectData, ProjectKind};
pub use search::SearchQuery;
pub use tags::normalize_tags;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid project id: {0}")]
    InvalidProjectId(String),
}
