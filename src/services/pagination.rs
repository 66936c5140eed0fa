//! Page-number pagination for listing endpoints.

use serde::Deserialize;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// 1-based page request as it arrives on the query string. Out-of-range
/// values are clamped rather than rejected.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct PageFilter {
    pub page_number: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageFilter {
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self { page_number: Some(page_number), page_size: Some(page_size) }
    }

    /// Clamps to sane values and returns `(page_number, page_size)`.
    pub fn normalize(self) -> (u32, u32) {
        let page = self.page_number.filter(|p| *p > 0).unwrap_or(1);
        let size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        (page, size)
    }

    /// `(offset, limit)` for SQL.
    pub fn window(self) -> (i64, i64) {
        let (page, size) = self.normalize();
        ((page as i64 - 1) * size as i64, size as i64)
    }
}

impl Default for PageFilter {
    fn default() -> Self {
        Self { page_number: Some(1), page_size: Some(DEFAULT_PAGE_SIZE) }
    }
}

#[derive(Debug)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_records: i64,
}

impl<T> Page<T> {
    pub fn total_pages(&self) -> u32 {
        if self.page_size == 0 || self.total_records <= 0 {
            return 0;
        }
        ((self.total_records as u64).div_ceil(self.page_size as u64)) as u32
    }
}
