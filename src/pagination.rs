//! This module defines the common functionality for paging data.

/// The config for pagination.
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of transactions per page when not specified in a request.
    pub default_page_size: u64,
    /// The largest page size a request may ask for. Larger values are clamped down.
    pub max_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 50,
            max_page_size: 200,
        }
    }
}

/// The number of pages needed to display `total` items at `page_size` items per page.
///
/// An empty data set still has one (empty) page.
pub(crate) fn page_count(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size).max(1)
}
