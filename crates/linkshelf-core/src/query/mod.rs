//! Query engine: filter, sort, and paginate the repository.
//!
//! [`project`] is pure. Given the same records, state and page size it
//! returns the same [`Projection`], so the view can recompute on every
//! keystroke without touching the network.

mod filter;
mod paginate;
mod sort;

pub use filter::*;
pub use paginate::*;
pub use sort::*;

use crate::domain::LinkRecord;

/// Search, sort and page cursor as chosen in the UI.
///
/// Changing the term or sort order returns to page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub term: String,
    pub sort: SortKey,
    /// 1-based requested page; clamped by [`project`]
    pub page: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            term: String::new(),
            sort: SortKey::default(),
            page: 1,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_term(&self, term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            sort: self.sort,
            page: 1,
        }
    }

    pub fn with_sort(&self, sort: SortKey) -> Self {
        Self {
            term: self.term.clone(),
            sort,
            page: 1,
        }
    }

    /// Jump to `page` without clamping; [`project`] clamps.
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    pub fn next_page(&self) -> Self {
        self.with_page(self.page.saturating_add(1))
    }

    pub fn previous_page(&self) -> Self {
        self.with_page(self.page.saturating_sub(1))
    }

    /// Search for the literal text of a clicked tag.
    pub fn with_tag_filter(&self, tag: &str) -> Self {
        self.with_term(tag)
    }

    /// Re-anchor the cursor to the page a projection actually showed.
    pub fn settled(&self, projection: &Projection) -> Self {
        self.with_page(projection.current_page)
    }
}

/// Why a projection has no items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// The repository holds no records.
    NoRecords,
    /// Records exist but none match the term.
    NoMatches,
}

/// One rendered page of the link list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub items: Vec<LinkRecord>,
    pub page_count: usize,
    pub current_page: usize,
    /// Records matching the term
    pub total_count: usize,
    /// Records in the repository, regardless of term
    pub repository_count: usize,
    pub page_size: usize,
    pub empty: Option<EmptyState>,
}

impl Projection {
    /// 1-based inclusive range of the shown items within the filtered list,
    /// or `None` when nothing is shown.
    pub fn showing_range(&self) -> Option<(usize, usize)> {
        if self.items.is_empty() {
            return None;
        }
        let first = (self.current_page - 1) * self.page_size + 1;
        Some((first, first + self.items.len() - 1))
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }
}

/// Filter, sort and paginate `records` under `state`.
pub fn project(records: &[LinkRecord], state: &QueryState, page_size: usize) -> Projection {
    let page_size = page_size.max(1);
    let term = SearchTerm::new(&state.term);

    let mut matched = filter_records(records, &term);
    sort_records(&mut matched, state.sort);

    let window = page_window(matched.len(), state.page, page_size);
    let items: Vec<LinkRecord> = matched[window.start..window.end]
        .iter()
        .map(|r| (*r).clone())
        .collect();

    let empty = if !items.is_empty() {
        None
    } else if records.is_empty() {
        Some(EmptyState::NoRecords)
    } else {
        Some(EmptyState::NoMatches)
    };

    Projection {
        items,
        page_count: window.page_count,
        current_page: window.page,
        total_count: matched.len(),
        repository_count: records.len(),
        page_size,
        empty,
    }
}
