use serde::Serialize;

/// Half-open row window `[offset, offset + limit)` for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub offset: u64,
    pub limit: u64,
}

impl PageWindow {
    /// Pages are 1-based. There is no upper bound: a page past the data is a
    /// valid window that simply selects nothing.
    pub fn new(page: u64, limit: u64) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        Self {
            offset: (page - 1).saturating_mul(limit),
            limit,
        }
    }

    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u64,
    pub total_pages: u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub limit: u64,
}

impl PaginationInfo {
    pub fn new(current_page: u64, limit: u64, total_count: u64) -> Self {
        let limit = limit.max(1);
        let total_pages = total_count.div_ceil(limit);
        Self {
            current_page,
            total_pages,
            has_next_page: current_page < total_pages,
            // An empty result has no neighbours in either direction.
            has_prev_page: total_pages > 0 && current_page > 1,
            limit,
        }
    }
}

/// Load-more heuristic: a full page means there may be another one.
///
/// Saves a count query on the scrolling path. When the remaining rows are an
/// exact multiple of `limit`, the client asks once more and gets an empty
/// page with `has_more == false`.
pub fn has_more(returned: usize, limit: u64) -> bool {
    returned as u64 == limit
}
