//! Handler tests for the activity trail API.
//!
//! Exercise the HTTP surface against an in-memory repository: status codes,
//! role gating, and the pagination envelope.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Extension;
use domain_activity::*;
use axum_helpers::auth::{AuthUser, Role};
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

/// Repository stub serving a fixed set of entries
#[derive(Clone, Default)]
struct StubRepository {
    entries: Vec<ActivityLog>,
}

#[async_trait]
impl ActivityLogRepository for StubRepository {
    async fn insert(&self, entry: ActivityLog) -> ActivityResult<ActivityLog> {
        Ok(entry)
    }

    async fn list(
        &self,
        filter: &ActivityFilter,
        limit: i64,
        skip: u64,
    ) -> ActivityResult<Vec<ActivityLog>> {
        let items = self
            .entries
            .iter()
            .filter(|e| filter.seller_id.is_none_or(|s| e.seller == s))
            .filter(|e| filter.action.is_none_or(|a| e.action == a))
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(items)
    }

    async fn count(&self, filter: &ActivityFilter) -> ActivityResult<u64> {
        Ok(self
            .entries
            .iter()
            .filter(|e| filter.seller_id.is_none_or(|s| e.seller == s))
            .filter(|e| filter.action.is_none_or(|a| e.action == a))
            .count() as u64)
    }
}

fn seller() -> AuthUser {
    AuthUser {
        id: Uuid::now_v7(),
        email: "seller@example.com".to_string(),
        role: Role::Seller,
    }
}

fn trail(n: usize) -> StubRepository {
    let seller_id = Uuid::now_v7();
    StubRepository {
        entries: (0..n)
            .map(|_| {
                ActivityLog::new(
                    seller_id,
                    ActivityAction::ProductCreate,
                    EntityRef::default(),
                    ActivityMetadata::default(),
                )
            })
            .collect(),
    }
}

async fn json_body(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn listing_requires_authentication() {
    let app = handlers::router(ActivityService::new(trail(1)));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn listing_rejects_plain_users() {
    let app = handlers::router(ActivityService::new(trail(1))).layer(Extension(AuthUser {
        role: Role::User,
        ..seller()
    }));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn listing_returns_the_page_envelope() {
    let app = handlers::router(ActivityService::new(trail(3))).layer(Extension(seller()));

    let response = app
        .oneshot(Request::builder().uri("/?limit=2").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["total"], 3);
    assert_eq!(body["pages"], 2);
}

#[tokio::test]
async fn oversized_limit_is_clamped_in_the_response() {
    let app = handlers::router(ActivityService::new(trail(1))).layer(Extension(seller()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?limit=1000&page=0")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["limit"], 100);
    assert_eq!(body["page"], 1);
}

#[tokio::test]
async fn action_filter_narrows_results() {
    let mut repo = trail(2);
    repo.entries.push(ActivityLog::new(
        repo.entries[0].seller,
        ActivityAction::ProductDelete,
        EntityRef::default(),
        ActivityMetadata::default(),
    ));
    let app = handlers::router(ActivityService::new(repo)).layer(Extension(seller()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/?action=product_delete")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["action"], "product_delete");
}
