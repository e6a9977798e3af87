//! Incremental result pagination: a render limit that grows on demand.

/// Default number of items revealed per page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Bounds how many items of an ordered result list are rendered.
///
/// The limit resets to one page on every navigation, query, or scope change
/// and grows by one page per `load_more` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    limit: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pagination {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            limit: page_size,
        }
    }

    #[allow(dead_code)]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Shrink back to the initial page size.
    pub fn reset(&mut self) {
        self.limit = self.page_size;
    }

    /// Reveal one more page. No effect once every item is already visible.
    pub fn load_more(&mut self, total: usize) {
        if self.limit < total {
            self.limit += self.page_size;
        }
    }

    /// The currently visible prefix of `items`.
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..items.len().min(self.limit)]
    }

    /// Whether more items exist beyond the current limit.
    pub fn has_more(&self, total: usize) -> bool {
        total > self.limit
    }
}
