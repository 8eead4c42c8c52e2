//! The saved link record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Description stored when the user leaves the field blank.
pub const DEFAULT_DESCRIPTION: &str = "No description";

/// Opaque identifier assigned when a link is created.
///
/// Identifiers are timestamp-derived strings (`"1718000000000"`) but callers
/// must not rely on their shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LinkId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A normalized link as held by the repository.
///
/// Field names on the wire follow the remote API and backup format:
/// `identifier` is `id` and `created_at` is `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Row handle in the remote store. Stale after any mutation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u64>,
    #[serde(rename = "id")]
    pub identifier: LinkId,
    pub url: String,
    pub description: String,
    /// Lowercase, trimmed, display order preserved.
    pub tags: Vec<String>,
    /// Creation instant in milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub created_at: i64,
}

impl LinkRecord {
    /// Create a record that has not been stored yet (no row).
    pub fn new(
        identifier: LinkId,
        url: impl Into<String>,
        description: impl Into<String>,
        tags: Vec<String>,
        created_at: i64,
    ) -> Self {
        Self {
            row: None,
            identifier,
            url: url.into(),
            description: description.into(),
            tags,
            created_at,
        }
    }

    /// Builder-style row assignment.
    pub fn with_row(mut self, row: u64) -> Self {
        self.row = Some(row);
        self
    }

    /// Tags in the comma-joined wire form.
    pub fn tags_joined(&self) -> String {
        linkshelf_tags::join_tags(&self.tags)
    }
}
