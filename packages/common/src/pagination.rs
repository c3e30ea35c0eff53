/// Largest page size a caller may ask for.
pub const MAX_PER_PAGE: u64 = 100;

/// Largest row offset the store accepts (a signed 64-bit bind).
const MAX_OFFSET: u64 = i64::MAX as u64;

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Build a request from optional query values. Missing values take the
    /// defaults (page 1, `default_per_page`); both are floored at 1 and the
    /// page size is capped at [`MAX_PER_PAGE`].
    pub fn new(page: Option<u64>, per_page: Option<u64>, default_per_page: u64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            per_page: per_page.unwrap_or(default_per_page).clamp(1, MAX_PER_PAGE),
        }
    }

    /// Number of items before this page, never above `i64::MAX`.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page).min(MAX_OFFSET)
    }

    /// Total page count for `total` items at this page size.
    pub fn total_pages(&self, total: u64) -> u64 {
        total_pages(total, self.per_page)
    }

    /// The window `[offset, offset + per_page)` of `items`, clipped to its bounds.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let len = items.len() as u64;
        let start = self.offset().min(len) as usize;
        let end = self.offset().saturating_add(self.per_page).min(len) as usize;
        &items[start..end]
    }
}

/// `ceil(total / per_page)`; zero exactly when `total` is zero.
pub fn total_pages(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1))
}
