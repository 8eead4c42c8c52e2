//! Fixed-size pagination.

/// The slice of a filtered list that one page covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// 1-based page actually shown after clamping
    pub page: usize,
    /// Number of pages; 0 when there is nothing to show
    pub page_count: usize,
    /// Start index into the filtered list (inclusive)
    pub start: usize,
    /// End index into the filtered list (exclusive)
    pub end: usize,
}

/// Compute the window for `requested` over `total` items.
///
/// Page 0 is read as page 1 and pages past the end clamp to the last page.
/// An empty list yields `page_count == 0` on page 1.
pub fn page_window(total: usize, requested: usize, page_size: usize) -> PageWindow {
    let page_size = page_size.max(1);
    let page_count = total.div_ceil(page_size);
    let page = requested.max(1).min(page_count.max(1));
    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);
    PageWindow {
        page,
        page_count,
        start,
        end,
    }
}
