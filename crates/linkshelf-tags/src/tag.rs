//! Core tag types.

use serde::{Deserialize, Serialize};

use crate::config::default_tag_color;

/// Tag color (light and dark mode hex).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagColor {
    pub light: String,
    pub dark: String,
}

/// A clickable tag shown next to a link.
///
/// Clicking a chip replaces the search term with `filter_term`, which is the
/// literal tag text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TagChip {
    pub label: String,
    pub filter_term: String,
    pub color: TagColor,
}

impl TagChip {
    /// Build a chip for a normalized tag.
    pub fn new(tag: &str) -> Self {
        Self {
            label: tag.to_string(),
            filter_term: tag.to_string(),
            color: default_tag_color(tag),
        }
    }
}

/// Normalize a single tag: trim surrounding whitespace and lowercase.
///
/// Returns `None` for input that is empty after trimming.
pub fn normalize_tag(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Whether any tag in the list contains `term` as a substring.
///
/// `term` is expected to be lowercased already; tags are lowercase by
/// construction.
pub fn any_tag_contains(tags: &[String], term: &str) -> bool {
    tags.iter().any(|t| t.contains(term))
}
