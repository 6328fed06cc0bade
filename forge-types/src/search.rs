//! Case-insensitive substring search over decrypted projects.
//!
//! Ciphertext is opaque, so search runs on plaintext after decryption. This is
//! plain substring matching, not tokenized or ranked search.

use crate::payload::CodeReview;
use crate::project::{Project, ProjectData};

/// A lower-cased search needle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Builds a query from user input.
    pub fn new(query: &str) -> Self {
        Self {
            needle: query.to_lowercase(),
        }
    }

    /// An empty query matches every project.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns true if the project's tags, prompt, file name or textual
    /// payload contain the needle.
    #[must_use]
    pub fn matches(&self, project: &Project) -> bool {
        if self.is_empty() {
            return true;
        }
        project.tags.iter().any(|tag| self.hit(tag))
            || project.prompt.as_deref().is_some_and(|p| self.hit(p))
            || project.file_name.as_deref().is_some_and(|f| self.hit(f))
            || self.matches_payload(&project.data)
    }

    fn matches_payload(&self, data: &ProjectData) -> bool {
        match data {
            ProjectData::Review {
                review:
                    CodeReview {
                        summary,
                        corrected_code,
                        ..
                    },
                original_code,
            } => self.hit(original_code) || self.hit(summary) || self.hit(corrected_code),
            ProjectData::Code { generated_code } => self.hit(generated_code),
            ProjectData::Chat { messages, .. } => messages.iter().any(|m| self.hit(&m.content)),
            ProjectData::Image { .. } => false,
        }
    }

    fn hit(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(&self.needle)
    }
}
