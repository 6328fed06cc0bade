//! Projects: the persisted unit of user work.
//!
//! A project is one of four closed kinds. The kind is carried by
//! [`ProjectData`], so every place that interprets the payload matches
//! exhaustively and a new kind cannot slip through unhandled.

use crate::ids::ProjectId;
use crate::payload::{ChatMessage, CodeReview, Persona, WorkspaceAsset};
use crate::tags::normalize_tags;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Discriminant of a project, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    /// A reviewed piece of source code.
    Review,
    /// Code generated from a prompt.
    Code,
    /// An image generated from a prompt.
    Image,
    /// A chat transcript.
    Chat,
}

impl ProjectKind {
    /// Returns the wire name of this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Review => "review",
            Self::Code => "code",
            Self::Image => "image",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific payload of a project.
///
/// Serialized as `{"type": "<kind>", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    content = "data",
    rename_all = "lowercase",
    rename_all_fields = "camelCase"
)]
pub enum ProjectData {
    Review {
        review: CodeReview,
        original_code: String,
    },
    Code {
        generated_code: String,
    },
    Image {
        /// Base64-encoded image bytes as returned by the provider.
        base64_image: String,
    },
    Chat {
        messages: Vec<ChatMessage>,
        persona: Persona,
        #[serde(default)]
        workspace: Vec<WorkspaceAsset>,
    },
}

impl ProjectData {
    /// Returns the kind of this payload.
    #[must_use]
    pub const fn kind(&self) -> ProjectKind {
        match self {
            Self::Review { .. } => ProjectKind::Review,
            Self::Code { .. } => ProjectKind::Code,
            Self::Image { .. } => ProjectKind::Image,
            Self::Chat { .. } => ProjectKind::Chat,
        }
    }
}

/// A decrypted project.
///
/// `id` is `None` until the store has persisted the project. `created_at` is
/// stamped once by the store and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProjectId>,
    /// Prompt that produced the project; doubles as the title of a chat.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(flatten)]
    pub data: ProjectData,
}

impl Project {
    /// Materializes a new project stamped with `created_at`.
    #[must_use]
    pub fn from_new(new: NewProject, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            prompt: new.prompt,
            tags: normalize_tags(&new.tags),
            created_at,
            file_name: new.file_name,
            data: new.data,
        }
    }

    /// Returns the kind of this project.
    #[must_use]
    pub const fn kind(&self) -> ProjectKind {
        self.data.kind()
    }

    /// Orders projects newest first, breaking ties on the larger id.
    #[must_use]
    pub fn newest_first(a: &Self, b: &Self) -> Ordering {
        match b.created_at.cmp(&a.created_at) {
            Ordering::Equal => b.id.cmp(&a.id),
            other => other,
        }
    }
}

/// A project as submitted by the application, before the store assigns
/// its id and creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(flatten)]
    pub data: ProjectData,
}

impl NewProject {
    /// Starts a project around its payload.
    #[must_use]
    pub fn new(data: ProjectData) -> Self {
        Self {
            prompt: None,
            tags: Vec::new(),
            file_name: None,
            data,
        }
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}
