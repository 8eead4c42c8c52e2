//! Free-text filtering.
//!
//! One term, no syntax: a record matches when its description, its URL, or
//! any of its tags contains the term, ignoring case.

use crate::domain::LinkRecord;
use linkshelf_tags::any_tag_contains;

/// A normalized search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Trim and lowercase raw input.
    pub fn new(input: &str) -> Self {
        Self(input.trim().to_lowercase())
    }

    /// Whether this term matches everything.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, record: &LinkRecord) -> bool {
        if self.is_empty() {
            return true;
        }
        record.description.to_lowercase().contains(&self.0)
            || record.url.to_lowercase().contains(&self.0)
            || any_tag_contains(&record.tags, &self.0)
    }
}

/// Records matching `term`, in their original order.
pub fn filter_records<'a>(records: &'a [LinkRecord], term: &SearchTerm) -> Vec<&'a LinkRecord> {
    records.iter().filter(|r| term.matches(r)).collect()
}
