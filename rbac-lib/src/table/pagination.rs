//! Pagination state.

use crate::api::PageEnvelope;

/// The table's view of the server's pagination.
///
/// `page` always lies in `[1, last_page()]`. Every mutator re-clamps it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
    total: u64,
    from: u64,
    to: u64,
}

impl Pagination {
    /// Empty pagination on page 1.
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total: 0,
            from: 0,
            to: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// 1-based position of the first row on this page, 0 when empty.
    pub fn from(&self) -> u64 {
        self.from
    }

    /// 1-based position of the last row on this page, 0 when empty.
    pub fn to(&self) -> u64 {
        self.to
    }

    /// `max(1, ceil(total / per_page))`.
    pub fn last_page(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.per_page)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }

    /// Moves to page `n`, clamped to the valid range.
    pub fn set_page(&mut self, n: u32) {
        self.page = n;
        self.clamp();
    }

    /// Changes the page size and returns to page 1.
    pub fn set_per_page(&mut self, n: u32) {
        self.per_page = n.max(1);
        self.page = 1;
    }

    /// Returns to page 1.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }

    /// Adopts the server-reported pagination of a fetched page.
    pub fn apply(&mut self, envelope: &PageEnvelope) {
        self.per_page = envelope.per_page().max(1);
        self.total = envelope.total();
        self.to = envelope.to().min(self.total);
        self.from = envelope.from().min(self.to);
        self.page = envelope.current_page();
        self.clamp();
    }

    /// Row number shown for the row at `index` on the current page.
    pub fn row_number(&self, index: usize) -> u64 {
        u64::from(self.page - 1) * u64::from(self.per_page) + index as u64 + 1
    }

    fn clamp(&mut self) {
        self.page = self.page.clamp(1, self.last_page());
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}
