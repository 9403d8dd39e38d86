//! Page bookkeeping for paged list endpoints.

use serde::Serialize;

/// Totals derived from a paged response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    /// Total number of items across all pages.
    pub total: u64,
    /// Number of pages reported for `total`.
    pub total_pages: u64,
    /// Whether the requested page is the last one.
    pub is_last_page: bool,
}

/// Compute page totals for a list response.
///
/// `current_page` is 1-based; `0` is treated as the first page. The page count
/// is `total / page_size + 1`, which reports one extra (empty) trailing page
/// when `total` is an exact multiple of `page_size`. Callers iterating pages
/// should also stop on an empty page. A `page_size` of zero is a single page.
///
/// ```rust
/// use temu_seller_client::types::page_summary;
///
/// let summary = page_summary(0, 20, 45);
/// assert_eq!((summary.total, summary.total_pages, summary.is_last_page), (45, 3, false));
/// assert!(page_summary(3, 20, 45).is_last_page);
/// ```
pub fn page_summary(current_page: u32, page_size: u32, total: u64) -> PageSummary {
    let current_page = u64::from(current_page.max(1));
    let total_pages = match u64::from(page_size) {
        0 => 1,
        size => total / size + 1,
    };

    PageSummary {
        total,
        total_pages,
        is_last_page: current_page >= total_pages,
    }
}
