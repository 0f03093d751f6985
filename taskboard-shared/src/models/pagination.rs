/// Pagination envelope for list endpoints
///
/// Every list endpoint returns its items wrapped in a `PaginatedResponse`
/// carrying the total row count and the derived page count.
///
/// # Example
///
/// ```
/// use taskboard_shared::models::pagination::PaginatedResponse;
///
/// let page = PaginatedResponse::new(vec!["a", "b", "c"], 23, 1, 10);
/// assert_eq!(page.total_pages, 3);
/// ```
use serde::{Deserialize, Serialize};

/// A single page of results plus pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items on this page
    pub data: Vec<T>,

    /// Total number of items matching the filter (across all pages)
    pub total: u64,

    /// Current page number (1-based)
    pub page: u32,

    /// Requested page size
    pub page_size: u32,

    /// Total number of pages: `ceil(total / page_size)`
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Builds a page, deriving `total_pages` from `total` and `page_size`.
    ///
    /// `page_size` must be non-zero; callers clamp it before reaching here.
    pub fn new(data: Vec<T>, total: u64, page: u32, page_size: u32) -> Self {
        let total_pages = total.div_ceil(u64::from(page_size.max(1))) as u32;

        Self {
            data,
            total,
            page,
            page_size,
            total_pages,
        }
    }
}
