//! Form input for creating or updating a link.

use crate::domain::{validate_url, LinkRecord, ValidationError, DEFAULT_DESCRIPTION};
use linkshelf_tags::{append_tag_input, format_tag_input, parse_tag_list};

/// What the owner typed, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDraft {
    pub url: String,
    pub description: String,
    /// Comma-separated tag input, e.g. `"rust, async"`
    pub tags: String,
}

/// A validated, normalized draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLink {
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
}

impl LinkDraft {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Stage an existing record's values for editing.
    pub fn from_record(record: &LinkRecord) -> Self {
        Self {
            url: record.url.clone(),
            description: record.description.clone(),
            tags: format_tag_input(&record.tags),
        }
    }

    /// Append a preset tag to the tag input.
    pub fn add_preset_tag(&mut self, tag: &str) {
        self.tags = append_tag_input(&self.tags, tag);
    }

    /// Validate the URL and normalize the rest.
    ///
    /// The URL is kept as typed (trimmed), not re-serialized by the parser.
    pub fn prepare(&self) -> Result<PreparedLink, ValidationError> {
        validate_url(&self.url)?;

        let description = match self.description.trim() {
            "" => DEFAULT_DESCRIPTION.to_string(),
            d => d.to_string(),
        };

        Ok(PreparedLink {
            url: self.url.trim().to_string(),
            description,
            tags: parse_tag_list(&self.tags),
        })
    }
}
