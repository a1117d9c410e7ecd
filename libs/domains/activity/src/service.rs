//! Activity trail query service

use std::sync::Arc;
use tracing::instrument;

use axum_helpers::Pagination;

use crate::error::ActivityResult;
use crate::models::{ActivityFilter, ActivityPage};
use crate::repository::ActivityLogRepository;

/// Read-side service over the audit trail
pub struct ActivityService<R: ActivityLogRepository> {
    repository: Arc<R>,
}

impl<R: ActivityLogRepository> ActivityService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List entries matching `filter`, newest first, with the standard
    /// pagination contract (limit clamped to [1,100], page floored to 1).
    #[instrument(skip(self, filter))]
    pub async fn list(
        &self,
        filter: &ActivityFilter,
        pagination: Pagination,
    ) -> ActivityResult<ActivityPage> {
        let page = pagination.page();
        let limit = pagination.limit();

        let (items, total) = tokio::try_join!(
            self.repository.list(filter, limit, pagination.skip()),
            self.repository.count(filter),
        )?;

        Ok(ActivityPage {
            items,
            page,
            limit,
            total,
            pages: Pagination::page_count(total, limit),
        })
    }
}

impl<R: ActivityLogRepository> Clone for ActivityService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
