use async_trait::async_trait;

use crate::error::ActivityResult;
use crate::models::{ActivityFilter, ActivityLog};

/// Repository trait for the activity trail.
///
/// Deliberately append-only: there is no update or delete. Entries are a
/// durable audit record once written.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityLogRepository: Send + Sync {
    /// Append a new entry
    async fn insert(&self, entry: ActivityLog) -> ActivityResult<ActivityLog>;

    /// List entries matching a filter, newest first
    async fn list(
        &self,
        filter: &ActivityFilter,
        limit: i64,
        skip: u64,
    ) -> ActivityResult<Vec<ActivityLog>>;

    /// Count entries matching a filter
    async fn count(&self, filter: &ActivityFilter) -> ActivityResult<u64>;
}
