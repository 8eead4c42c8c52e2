//! Sort orders for the link list.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::domain::LinkRecord;

/// Sort order, one per option of the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    NewestFirst,
    OldestFirst,
    UrlAsc,
    UrlDesc,
    DescriptionAsc,
    DescriptionDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 6] = [
        SortKey::NewestFirst,
        SortKey::OldestFirst,
        SortKey::UrlAsc,
        SortKey::UrlDesc,
        SortKey::DescriptionAsc,
        SortKey::DescriptionDesc,
    ];

    /// Selector value, e.g. `"timestamp-desc"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::NewestFirst => "timestamp-desc",
            SortKey::OldestFirst => "timestamp-asc",
            SortKey::UrlAsc => "url-asc",
            SortKey::UrlDesc => "url-desc",
            SortKey::DescriptionAsc => "description-asc",
            SortKey::DescriptionDesc => "description-desc",
        }
    }

    /// Parse a selector value, falling back to newest first.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Compare two records under this order.
    pub fn compare(&self, a: &LinkRecord, b: &LinkRecord) -> Ordering {
        match self {
            SortKey::NewestFirst => b.created_at.cmp(&a.created_at),
            SortKey::OldestFirst => a.created_at.cmp(&b.created_at),
            SortKey::UrlAsc => locale_cmp(&a.url, &b.url),
            SortKey::UrlDesc => locale_cmp(&b.url, &a.url),
            SortKey::DescriptionAsc => locale_cmp(&a.description, &b.description),
            SortKey::DescriptionDesc => locale_cmp(&b.description, &a.description),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown sort key '{0}'")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| UnknownSortKey(s.to_string()))
    }
}

/// Fold a string for primary comparison: compatibility decomposition,
/// combining marks removed, lowercased.
fn fold(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Accent- and case-insensitive comparison with the raw string as tie-break.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    fold(a).cmp(&fold(b)).then_with(|| a.cmp(b))
}

/// Stable sort in place.
pub fn sort_records(records: &mut [&LinkRecord], key: SortKey) {
    records.sort_by(|a, b| key.compare(a, b));
}
