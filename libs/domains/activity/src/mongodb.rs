//! MongoDB implementation of ActivityLogRepository

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::{Collection, Database, IndexModel};
use tracing::instrument;

use crate::error::ActivityResult;
use crate::models::{ActivityFilter, ActivityLog};
use crate::repository::ActivityLogRepository;

/// MongoDB-backed activity trail
#[derive(Clone)]
pub struct MongoActivityLogRepository {
    collection: Collection<ActivityLog>,
}

impl MongoActivityLogRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("activity_logs"),
        }
    }

    /// Convert chrono DateTime to a BSON DateTime value
    fn to_bson_datetime(dt: chrono::DateTime<chrono::Utc>) -> Bson {
        Bson::DateTime(mongodb::bson::DateTime::from_millis(dt.timestamp_millis()))
    }

    /// Create indexes for the common query shapes
    pub async fn create_indexes(&self) -> ActivityResult<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
            IndexModel::builder()
                .keys(doc! { "seller": 1, "createdAt": -1 })
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Activity log indexes created");
        Ok(())
    }

    /// Build a filter document from ActivityFilter
    fn build_filter(filter: &ActivityFilter) -> Document {
        let mut doc = Document::new();

        if let Some(seller) = &filter.seller_id {
            doc.insert("seller", to_bson(seller).unwrap_or(Bson::Null));
        }

        if let Some(action) = &filter.action {
            doc.insert("action", action.to_string());
        }

        let mut created_filter = Document::new();
        if let Some(from) = filter.from {
            created_filter.insert("$gte", Self::to_bson_datetime(from));
        }
        if let Some(to) = filter.to {
            created_filter.insert("$lte", Self::to_bson_datetime(to));
        }
        if !created_filter.is_empty() {
            doc.insert("createdAt", created_filter);
        }

        doc
    }
}

#[async_trait]
impl ActivityLogRepository for MongoActivityLogRepository {
    #[instrument(skip(self, entry), fields(entry_id = %entry.id, action = %entry.action))]
    async fn insert(&self, entry: ActivityLog) -> ActivityResult<ActivityLog> {
        self.collection.insert_one(&entry).await?;
        Ok(entry)
    }

    #[instrument(skip(self, filter))]
    async fn list(
        &self,
        filter: &ActivityFilter,
        limit: i64,
        skip: u64,
    ) -> ActivityResult<Vec<ActivityLog>> {
        use mongodb::options::FindOptions;

        let query = Self::build_filter(filter);
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .skip(skip)
            .limit(limit)
            .build();

        let cursor = self.collection.find(query).with_options(options).await?;
        let entries: Vec<ActivityLog> = cursor.try_collect().await?;
        Ok(entries)
    }

    #[instrument(skip(self, filter))]
    async fn count(&self, filter: &ActivityFilter) -> ActivityResult<u64> {
        let query = Self::build_filter(filter);
        let count = self.collection.count_documents(query).await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityAction;
    use chrono::TimeZone;
    use uuid::Uuid;

    #[test]
    fn empty_filter_builds_empty_document() {
        let doc = MongoActivityLogRepository::build_filter(&ActivityFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn seller_and_action_are_exact_matches() {
        let filter = ActivityFilter {
            seller_id: Some(Uuid::now_v7()),
            action: Some(ActivityAction::ProductDelete),
            ..Default::default()
        };
        let doc = MongoActivityLogRepository::build_filter(&filter);

        assert!(doc.contains_key("seller"));
        assert_eq!(doc.get_str("action").unwrap(), "product_delete");
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let from = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let to = chrono::Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap();
        let filter = ActivityFilter {
            from: Some(from),
            to: Some(to),
            ..Default::default()
        };
        let doc = MongoActivityLogRepository::build_filter(&filter);

        let range = doc.get_document("createdAt").unwrap();
        assert!(range.contains_key("$gte"));
        assert!(range.contains_key("$lte"));
    }

    #[test]
    fn open_ended_range_keeps_one_bound() {
        let filter = ActivityFilter {
            from: Some(chrono::Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let doc = MongoActivityLogRepository::build_filter(&filter);

        let range = doc.get_document("createdAt").unwrap();
        assert!(range.contains_key("$gte"));
        assert!(!range.contains_key("$lte"));
    }
}
