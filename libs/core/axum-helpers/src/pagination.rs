//! Page/limit query contract shared by the list endpoints.

use serde::Deserialize;
use utoipa::IntoParams;

/// Pagination query parameters.
///
/// `page` defaults to 1 with a floor of 1; `limit` defaults to 20 and is
/// clamped into [1, 100] regardless of what the caller asks for.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
pub struct Pagination {
    /// 1-based page number
    pub page: Option<i64>,
    /// Page size, clamped to [1, 100]
    pub limit: Option<i64>,
}

impl Pagination {
    pub const DEFAULT_LIMIT: i64 = 20;
    pub const MAX_LIMIT: i64 = 100;

    /// Effective page number (>= 1)
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped into [1, MAX_LIMIT]
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    /// Number of documents to skip for the effective page
    pub fn skip(&self) -> u64 {
        ((self.page() - 1) * self.limit()) as u64
    }

    /// Total page count for a result set: ceil(total / limit)
    pub fn page_count(total: u64, limit: i64) -> u64 {
        total.div_ceil(limit.max(1) as u64)
    }
}
