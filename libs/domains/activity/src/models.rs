//! Activity audit trail models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Auditable seller actions
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActivityAction {
    ProductCreate,
    ProductUpdate,
    ProductDelete,
    Login,
    Logout,
    Other,
}

/// Loose reference to the entity an action touched.
///
/// Kept weakly typed on purpose: entries may point at products, users, or
/// entities this service does not own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct EntityRef {
    /// Referenced entity kind (e.g. "Product")
    #[serde(rename = "type", default)]
    pub entity_type: String,
    /// Referenced entity id, when one exists
    #[serde(default)]
    pub id: Option<Uuid>,
    /// Human-readable name at the time of the action
    #[serde(default)]
    pub name: String,
}

impl EntityRef {
    /// Reference a catalog product
    pub fn product(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            entity_type: "Product".to_string(),
            id: Some(id),
            name: name.into(),
        }
    }
}

/// Request context captured alongside an action
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetadata {
    /// Client IP address
    #[serde(default)]
    pub ip: String,
    /// Client user agent
    #[serde(default)]
    pub user_agent: String,
    /// Opaque structured description of what changed
    #[serde(default)]
    pub changes: serde_json::Value,
}

/// One audit trail entry.
///
/// Append-only: written once by the activity logger, never updated or
/// deleted by this system.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// The seller the action is attributed to
    pub seller: Uuid,
    /// What happened
    pub action: ActivityAction,
    /// What it happened to
    #[serde(default)]
    pub entity: EntityRef,
    /// Request context
    #[serde(default)]
    pub metadata: ActivityMetadata,
    /// Set once at creation, never mutated
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(
        seller: Uuid,
        action: ActivityAction,
        entity: EntityRef,
        metadata: ActivityMetadata,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            seller,
            action,
            entity,
            metadata,
            created_at: Utc::now(),
        }
    }
}

/// Query filters for the activity trail
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ActivityFilter {
    /// Restrict to one seller
    pub seller_id: Option<Uuid>,
    /// Restrict to one action kind
    pub action: Option<ActivityAction>,
    /// Inclusive lower bound on creation time (RFC 3339)
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on creation time (RFC 3339)
    pub to: Option<DateTime<Utc>>,
}

/// One page of the activity trail
#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityPage {
    pub items: Vec<ActivityLog>,
    pub page: i64,
    pub limit: i64,
    pub total: u64,
    pub pages: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_serialize_snake_case() {
        assert_eq!(ActivityAction::ProductCreate.to_string(), "product_create");
        let json = serde_json::to_string(&ActivityAction::ProductDelete).unwrap();
        assert_eq!(json, "\"product_delete\"");
    }

    #[test]
    fn new_entry_gets_id_and_timestamp() {
        let seller = Uuid::now_v7();
        let entry = ActivityLog::new(
            seller,
            ActivityAction::ProductCreate,
            EntityRef::product(Uuid::now_v7(), "Linen Shirt"),
            ActivityMetadata::default(),
        );

        assert!(!entry.id.is_nil());
        assert_eq!(entry.seller, seller);
        assert_eq!(entry.entity.entity_type, "Product");
    }

    #[test]
    fn entry_serializes_with_mongo_id_and_camel_case() {
        let entry = ActivityLog::new(
            Uuid::now_v7(),
            ActivityAction::ProductUpdate,
            EntityRef::default(),
            ActivityMetadata {
                ip: "203.0.113.7".to_string(),
                user_agent: "curl/8".to_string(),
                changes: serde_json::json!({"name": "renamed"}),
            },
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["metadata"]["userAgent"], "curl/8");
    }
}
