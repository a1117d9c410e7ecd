//! Fire-and-forget activity recorder.
//!
//! Invoked by write handlers after catalog mutations. Recording must never
//! gate or abort the operation that triggered it: persistence runs on a
//! detached task and failures are logged and swallowed.

use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

use crate::models::{ActivityAction, ActivityLog, ActivityMetadata, EntityRef};
use crate::repository::ActivityLogRepository;

/// Handle for recording audit entries from anywhere in the request path
#[derive(Clone)]
pub struct ActivityLogger {
    repository: Arc<dyn ActivityLogRepository>,
}

impl ActivityLogger {
    pub fn new(repository: impl ActivityLogRepository + 'static) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Record an action attributed to `seller`.
    ///
    /// Without a seller this is a silent no-op: an unattributable audit
    /// entry has no value. The write itself happens on a spawned task and
    /// its outcome never reaches the caller.
    pub fn record(
        &self,
        seller: Option<Uuid>,
        action: ActivityAction,
        entity: Option<EntityRef>,
        metadata: Option<ActivityMetadata>,
    ) {
        let Some(seller) = seller else {
            return;
        };

        let entry = ActivityLog::new(
            seller,
            action,
            entity.unwrap_or_default(),
            metadata.unwrap_or_default(),
        );

        let repository = Arc::clone(&self.repository);
        tokio::spawn(async move {
            Self::persist(repository, entry).await;
        });
    }

    async fn persist(repository: Arc<dyn ActivityLogRepository>, entry: ActivityLog) {
        if let Err(e) = repository.insert(entry).await {
            warn!(error = %e, "Failed to record activity");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActivityError;
    use crate::repository::MockActivityLogRepository;

    #[tokio::test]
    async fn missing_seller_is_a_silent_noop() {
        let mut repo = MockActivityLogRepository::new();
        repo.expect_insert().times(0);

        let logger = ActivityLogger::new(repo);
        logger.record(None, ActivityAction::ProductCreate, None, None);
        // mock verifies on drop that insert was never called
    }

    #[tokio::test]
    async fn persistence_failures_are_swallowed() {
        let mut repo = MockActivityLogRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|_| Err(ActivityError::Database("connection reset".to_string())));

        let entry = ActivityLog::new(
            Uuid::now_v7(),
            ActivityAction::ProductDelete,
            EntityRef::default(),
            ActivityMetadata::default(),
        );

        // does not panic and does not propagate the error
        ActivityLogger::persist(Arc::new(repo), entry).await;
    }

    #[tokio::test]
    async fn attributed_record_is_persisted() {
        let mut repo = MockActivityLogRepository::new();
        repo.expect_insert()
            .times(1)
            .withf(|entry| entry.action == ActivityAction::ProductUpdate)
            .returning(|entry| Ok(entry));

        let logger = ActivityLogger::new(repo);
        logger.record(
            Some(Uuid::now_v7()),
            ActivityAction::ProductUpdate,
            Some(EntityRef::product(Uuid::now_v7(), "Shirt")),
            None,
        );

        // let the spawned write run before the mock is dropped
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
}
