use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pagination envelope returned by collection endpoints that page.
///
/// `total` counts matching records across every page; `data` holds at most
/// `limit` of them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl<T> Page<T> {
    /// Whether the envelope respects `data.len() <= limit` and `data.len() <= total`.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let len = self.data.len() as u64;
        len <= u64::from(self.limit) && len <= self.total
    }

    /// Number of pages needed to show `total` records at `limit` per page.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        if self.limit == 0 {
            return 0;
        }
        self.total.div_ceil(u64::from(self.limit))
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages()
    }
}
