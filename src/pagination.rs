//! Minimal pagination primitives used by list queries and JSON responses.

use serde::Serialize;

/// Default page size for list endpoints.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page request attached to a repository list query.
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    /// Number of items per page.
    pub per_page: usize,
}

/// A page of items together with paging metadata.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page,
            total_pages,
        }
    }
}
