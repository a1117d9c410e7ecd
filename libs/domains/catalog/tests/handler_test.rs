//! Handler tests for the Products API.
//!
//! Exercise the HTTP surface against in-memory repositories: status codes,
//! error-kind separation, role gating, and audit emission.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Extension;
use axum_helpers::auth::{AuthUser, Role};
use domain_activity::{ActivityLog, ActivityLogRepository, ActivityLogger, ActivityResult};
use domain_catalog::*;
use http_body_util::BodyExt;
use tower::ServiceExt;
use uuid::Uuid;

/// In-memory product store
#[derive(Clone, Default)]
struct MemoryRepository {
    products: Arc<Mutex<Vec<Product>>>,
}

#[async_trait]
impl ProductRepository for MemoryRepository {
    async fn insert(&self, product: Product) -> CatalogResult<Product> {
        self.products.lock().unwrap().push(product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list(
        &self,
        filter: &ProductFilter,
        limit: i64,
        skip: u64,
    ) -> CatalogResult<Vec<Product>> {
        let mut items: Vec<Product> = self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| filter.category.as_ref().is_none_or(|c| &p.category == c))
            .filter(|p| filter.active_filter().is_none_or(|a| p.is_active == a))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &ProductFilter) -> CatalogResult<u64> {
        Ok(self.list(filter, i64::MAX, 0).await?.len() as u64)
    }

    async fn replace(&self, product: &Product) -> CatalogResult<()> {
        let mut products = self.products.lock().unwrap();
        match products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => {
                *slot = product.clone();
                Ok(())
            }
            None => Err(CatalogError::NotFound(product.id)),
        }
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() < before)
    }
}

/// Activity sink capturing recorded entries
#[derive(Clone, Default)]
struct MemoryTrail {
    entries: Arc<Mutex<Vec<ActivityLog>>>,
}

#[async_trait]
impl ActivityLogRepository for MemoryTrail {
    async fn insert(&self, entry: ActivityLog) -> ActivityResult<ActivityLog> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn list(
        &self,
        _filter: &domain_activity::ActivityFilter,
        _limit: i64,
        _skip: u64,
    ) -> ActivityResult<Vec<ActivityLog>> {
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn count(&self, _filter: &domain_activity::ActivityFilter) -> ActivityResult<u64> {
        Ok(self.entries.lock().unwrap().len() as u64)
    }
}

struct TestApp {
    repository: MemoryRepository,
    trail: MemoryTrail,
}

impl TestApp {
    fn new() -> Self {
        Self {
            repository: MemoryRepository::default(),
            trail: MemoryTrail::default(),
        }
    }

    fn router(&self) -> axum::Router {
        let state = CatalogState {
            service: Arc::new(CatalogService::new(self.repository.clone())),
            activity: ActivityLogger::new(self.trail.clone()),
        };
        handlers::router(state)
    }

    fn router_as(&self, role: Role) -> axum::Router {
        self.router().layer(Extension(AuthUser {
            id: Uuid::now_v7(),
            email: "seller@example.com".to_string(),
            role,
        }))
    }

    async fn seed(&self, name: &str, category: &str, price: f64) -> Product {
        let input: CreateProduct = serde_json::from_value(serde_json::json!({
            "name": name,
            "category": category,
            "price": price
        }))
        .unwrap();
        let pricing = input.resolve_pricing().unwrap();
        let product = Product::new(&input, pricing, vec![], vec![]);
        self.repository.insert(product).await.unwrap()
    }
}

async fn json_body(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.7")
        .header("user-agent", "handler-test/1.0")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

#[tokio::test]
async fn listing_returns_the_page_envelope() {
    let app = TestApp::new();
    for i in 0..3 {
        app.seed(&format!("Shirt {i}"), "shirts", 100.0 + i as f64)
            .await;
    }

    let response = app
        .router()
        .oneshot(Request::builder().uri("/?limit=2").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["total"], 3);
    assert_eq!(body["pages"], 2);
}

#[tokio::test]
async fn malformed_and_absent_ids_are_distinct_errors() {
    let app = TestApp::new();

    let malformed = app
        .router()
        .oneshot(
            Request::builder()
                .uri("/not-a-valid-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
    let body = json_body(malformed.into_body()).await;
    assert_eq!(body["error"], "INVALID_UUID");

    let absent = app
        .router()
        .oneshot(
            Request::builder()
                .uri(&format!("/{}", Uuid::now_v7()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(absent.status(), StatusCode::NOT_FOUND);
    let body = json_body(absent.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn writes_require_authentication_and_role() {
    let app = TestApp::new();
    let payload = serde_json::json!({
        "name": "Shirt", "category": "shirts", "price": 499.0
    });

    let anonymous = app
        .router()
        .oneshot(post_json("/", payload.clone()))
        .await
        .unwrap();
    assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);

    let plain_user = app
        .router_as(Role::User)
        .oneshot(post_json("/", payload))
        .await
        .unwrap();
    assert_eq!(plain_user.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_returns_201_and_records_activity() {
    let app = TestApp::new();

    let response = app
        .router_as(Role::Seller)
        .oneshot(post_json(
            "/",
            serde_json::json!({
                "name": "Linen Shirt",
                "category": "shirts",
                "pricing": { "mrp": 1999.0, "sellingPrice": 1499.0 },
                "images": ["https://cdn.example.com/a.jpg"]
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["name"], "Linen Shirt");
    assert_eq!(body["images"][0]["alt"], "Linen Shirt");

    // the audit write is fire-and-forget; give the spawned task a beat
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    let entries = app.trail.entries.lock().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].action.to_string(), "product_create");
    assert_eq!(entries[0].metadata.ip, "203.0.113.7");
}

#[tokio::test]
async fn create_with_missing_fields_stores_nothing() {
    let app = TestApp::new();

    let response = app
        .router_as(Role::Seller)
        .oneshot(post_json(
            "/",
            serde_json::json!({ "name": "Shirt", "price": 499.0 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("category"));

    assert!(app.repository.products.lock().unwrap().is_empty());
}

#[tokio::test]
async fn create_with_inline_image_and_no_provider_is_503() {
    let app = TestApp::new();

    let response = app
        .router_as(Role::Seller)
        .oneshot(post_json(
            "/",
            serde_json::json!({
                "name": "Shirt",
                "category": "shirts",
                "price": 499.0,
                "image": "data:image/png;base64,AAAA"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
}

#[tokio::test]
async fn update_merges_the_patch() {
    let app = TestApp::new();
    let product = app.seed("Shirt", "shirts", 499.0).await;

    let response = app
        .router_as(Role::Seller)
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(&format!("/{}", product.id))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({ "price": 399.0, "tags": ["sale"] }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["pricing"]["sellingPrice"], 399.0);
    assert_eq!(body["tags"][0], "sale");
}

#[tokio::test]
async fn delete_confirms_and_404s_on_absent() {
    let app = TestApp::new();
    let product = app.seed("Shirt", "shirts", 499.0).await;
    let other = app.seed("Trousers", "trousers", 999.0).await;

    let response = app
        .router_as(Role::Seller)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/{}", product.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // the other document is untouched
    assert_eq!(app.repository.products.lock().unwrap().len(), 1);
    assert_eq!(app.repository.products.lock().unwrap()[0].id, other.id);

    let again = app
        .router_as(Role::Seller)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&format!("/{}", product.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::NOT_FOUND);
}
