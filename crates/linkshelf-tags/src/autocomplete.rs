//! Tag suggestions built from the tags already in use.
//!
//! Ranking: frequency > alphabetical.

use std::collections::HashMap;

/// A tag suggestion with its usage count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub tag: String,
    pub use_count: u32,
}

/// Frequency index over the tags of a link collection.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    counts: HashMap<String, u32>,
}

impl TagIndex {
    /// Build an index from per-link tag lists.
    pub fn from_tag_lists<'a, I>(lists: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut counts = HashMap::new();
        for list in lists {
            for tag in list {
                *counts.entry(tag.clone()).or_insert(0) += 1;
            }
        }
        Self { counts }
    }

    /// Number of distinct tags.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All tags, most used first.
    pub fn ranked(&self) -> Vec<Suggestion> {
        self.complete("", usize::MAX)
    }

    /// Tags starting with `prefix` (case-insensitive), most used first.
    pub fn complete(&self, prefix: &str, limit: usize) -> Vec<Suggestion> {
        let prefix = prefix.trim().to_lowercase();
        let mut suggestions: Vec<Suggestion> = self
            .counts
            .iter()
            .filter(|(tag, _)| tag.starts_with(&prefix))
            .map(|(tag, count)| Suggestion {
                tag: tag.clone(),
                use_count: *count,
            })
            .collect();

        suggestions.sort_by(|a, b| b.use_count.cmp(&a.use_count).then_with(|| a.tag.cmp(&b.tag)));
        suggestions.truncate(limit);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> TagIndex {
        let lists = vec![
            vec!["rust".to_string(), "blog".to_string()],
            vec!["rust".to_string()],
            vec!["recipes".to_string(), "blog".to_string()],
            vec!["rust".to_string(), "reading".to_string()],
        ];
        TagIndex::from_tag_lists(lists.iter().map(|l| l.as_slice()))
    }

    #[test]
    fn ranked_by_frequency_then_name() {
        let ranked = index().ranked();
        let tags: Vec<&str> = ranked.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["rust", "blog", "reading", "recipes"]);
        assert_eq!(ranked[0].use_count, 3);
    }

    #[test]
    fn complete_prefix() {
        let suggestions = index().complete("Re", 10);
        let tags: Vec<&str> = suggestions.iter().map(|s| s.tag.as_str()).collect();
        assert_eq!(tags, vec!["reading", "recipes"]);
    }

    #[test]
    fn complete_respects_limit() {
        assert_eq!(index().complete("r", 1).len(), 1);
    }

    #[test]
    fn empty_index() {
        let index = TagIndex::default();
        assert!(index.is_empty());
        assert!(index.complete("r", 5).is_empty());
    }
}
