//! Render-ready descriptors for a page of links.
//!
//! Nothing here decides *which* links are shown; that is [`crate::query`].
//! This module turns a [`Projection`] into strings and flags a front end can
//! print as-is.

use serde::Serialize;

use crate::domain::{LinkId, LinkRecord};
use crate::query::{EmptyState, Projection};
use crate::repository::LoadStatus;
use linkshelf_tags::TagChip;

pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const NO_LINKS_MESSAGE: &str = "No links loaded. Connect to API or add a link.";
pub const LOAD_FAILED_MESSAGE: &str = "ERROR: Could not load data from the link API.";

/// The URL as shown to the reader: scheme, one trailing slash and a leading
/// `www.` removed.
pub fn display_url(url: &str) -> String {
    let rest = strip_prefix_ignore_case(url, "https://")
        .or_else(|| strip_prefix_ignore_case(url, "http://"))
        .unwrap_or(url);
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    strip_prefix_ignore_case(rest, "www.")
        .unwrap_or(rest)
        .to_string()
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        s.get(prefix.len()..)
    } else {
        None
    }
}

/// One link as a front end draws it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkView {
    pub identifier: LinkId,
    pub row: Option<u64>,
    pub url: String,
    pub display_url: String,
    pub description: String,
    pub tags: Vec<TagChip>,
    pub created_at: i64,
    /// Edit and remove actions are offered
    pub editable: bool,
}

impl LinkView {
    pub fn new(record: &LinkRecord, owner: bool) -> Self {
        Self {
            identifier: record.identifier.clone(),
            row: record.row,
            url: record.url.clone(),
            display_url: display_url(&record.url),
            description: record.description.clone(),
            tags: record.tags.iter().map(|t| TagChip::new(t)).collect(),
            created_at: record.created_at,
            editable: owner,
        }
    }
}

pub fn link_views(items: &[LinkRecord], owner: bool) -> Vec<LinkView> {
    items.iter().map(|r| LinkView::new(r, owner)).collect()
}

/// Counter, pagination and empty-state text for a projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub counter: String,
    /// `"Page 2 / 3"`
    pub page_info: String,
    /// `"2/3"`, for the compact top controls
    pub compact_page_info: String,
    pub has_previous: bool,
    pub has_next: bool,
    pub show_pagination: bool,
    pub empty_message: Option<String>,
}

pub fn page_summary(projection: &Projection, status: &LoadStatus) -> PageSummary {
    let counter = match projection.showing_range() {
        Some((first, last)) => format!(
            "Saved Links ({total}) | Showing {first} - {last} of {total}",
            total = projection.total_count
        ),
        None => format!("Saved Links ({})", projection.repository_count),
    };

    let empty_message = match projection.empty {
        None => None,
        Some(_) if status.is_failed() => Some(LOAD_FAILED_MESSAGE),
        Some(EmptyState::NoRecords) => Some(NO_LINKS_MESSAGE),
        Some(EmptyState::NoMatches) => Some(NO_RESULTS_MESSAGE),
    };

    PageSummary {
        counter,
        page_info: format!("Page {} / {}", projection.current_page, projection.page_count),
        compact_page_info: format!("{}/{}", projection.current_page, projection.page_count),
        has_previous: projection.has_previous(),
        has_next: projection.has_next(),
        show_pagination: projection.total_count > projection.page_size,
        empty_message: empty_message.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{project, QueryState};
    use rstest::rstest;

    #[rstest]
    #[case("https://www.example.com/", "example.com")]
    #[case("HTTP://WWW.Example.com/path/", "Example.com/path")]
    #[case("https://example.com/a//", "example.com/a/")]
    #[case("ftp://www.example.com", "ftp://www.example.com")]
    #[case("www.example.com", "example.com")]
    #[case("https://", "")]
    fn display_urls(#[case] url: &str, #[case] expected: &str) {
        assert_eq!(display_url(url), expected);
    }

    fn records(n: i64) -> Vec<LinkRecord> {
        (1..=n)
            .map(|i| {
                LinkRecord::new(
                    LinkId::new(i.to_string()),
                    format!("https://site{}.io", i),
                    format!("Link {}", i),
                    vec!["blog".to_string()],
                    i,
                )
                .with_row(i as u64 + 1)
            })
            .collect()
    }

    #[test]
    fn counter_for_a_middle_page() {
        let projection = project(&records(25), &QueryState::new().with_page(2), 10);
        let summary = page_summary(&projection, &LoadStatus::NotLoaded);
        assert_eq!(summary.counter, "Saved Links (25) | Showing 11 - 20 of 25");
        assert_eq!(summary.page_info, "Page 2 / 3");
        assert_eq!(summary.compact_page_info, "2/3");
        assert!(summary.has_previous && summary.has_next);
        assert!(summary.show_pagination);
        assert_eq!(summary.empty_message, None);
    }

    #[test]
    fn single_page_hides_pagination() {
        let projection = project(&records(10), &QueryState::new(), 10);
        let summary = page_summary(&projection, &LoadStatus::NotLoaded);
        assert!(!summary.show_pagination);
        assert!(!summary.has_next);
    }

    #[test]
    fn empty_messages() {
        let none = project(&records(3), &QueryState::new().with_term("zzz"), 10);
        let summary = page_summary(&none, &LoadStatus::NotLoaded);
        assert_eq!(summary.counter, "Saved Links (3)");
        assert_eq!(summary.empty_message.as_deref(), Some(NO_RESULTS_MESSAGE));

        let empty = project(&[], &QueryState::new(), 10);
        let summary = page_summary(&empty, &LoadStatus::NotLoaded);
        assert_eq!(summary.empty_message.as_deref(), Some(NO_LINKS_MESSAGE));

        let failed = LoadStatus::Failed {
            message: "offline".into(),
        };
        let summary = page_summary(&empty, &failed);
        assert_eq!(summary.counter, "Saved Links (0)");
        assert_eq!(summary.empty_message.as_deref(), Some(LOAD_FAILED_MESSAGE));
    }

    #[test]
    fn views_carry_chips_and_owner_actions() {
        let items = records(1);
        let visitor = link_views(&items, false);
        let owner = link_views(&items, true);
        assert!(!visitor[0].editable);
        assert!(owner[0].editable);
        assert_eq!(owner[0].display_url, "site1.io");
        assert_eq!(owner[0].tags[0].filter_term, "blog");
    }
}
