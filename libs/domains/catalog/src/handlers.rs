//! HTTP handlers for the Products API

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    auth::RequireSeller,
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, ForbiddenResponse,
        InternalServerErrorResponse, NotFoundResponse, ServiceUnavailableResponse,
        UnauthorizedResponse,
    },
    extract_client_ip, extract_user_agent, Pagination, UuidPath, ValidatedJson,
};
use domain_activity::{ActivityAction, ActivityLogger, ActivityMetadata, EntityRef};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::images::ImageInput;
use crate::models::{
    CreateProduct, Gender, Policies, Pricing, PricingInput, Product, ProductFilter, ProductImage,
    ProductPage, Rating, Shipping, UpdateProduct, Variant,
};
use crate::repository::ProductRepository;
use crate::service::CatalogService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, ProductPage, Pricing, PricingInput,
            Variant, ProductImage, ImageInput, Gender, Rating, Shipping, Policies,
            DeleteResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            UnauthorizedResponse,
            ForbiddenResponse,
            ServiceUnavailableResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product catalog endpoints")
    )
)]
pub struct ApiDoc;

/// Handler state: the catalog service plus the audit recorder its write
/// paths report into
pub struct CatalogState<R: ProductRepository> {
    pub service: Arc<CatalogService<R>>,
    pub activity: ActivityLogger,
}

impl<R: ProductRepository> Clone for CatalogState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            activity: self.activity.clone(),
        }
    }
}

/// Create the products router.
///
/// Reads are public; writes require a seller or super_admin identity
/// (enforced by the [`RequireSeller`] extractor, fed by the app-level auth
/// middleware).
pub fn router<R: ProductRepository + 'static>(state: CatalogState<R>) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

fn request_metadata(headers: &HeaderMap, changes: serde_json::Value) -> ActivityMetadata {
    ActivityMetadata {
        ip: extract_client_ip(headers).unwrap_or_default(),
        user_agent: extract_user_agent(headers).unwrap_or_default(),
        changes,
    }
}

/// List products with filters and pagination
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductFilter, Pagination),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    Query(filter): Query<ProductFilter>,
    Query(pagination): Query<Pagination>,
) -> CatalogResult<Json<ProductPage>> {
    let page = state.service.list(&filter, pagination).await?;
    Ok(Json(page))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    UuidPath(id): UuidPath,
) -> CatalogResult<Json<Product>> {
    let product = state.service.get(id).await?;
    Ok(Json(product))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    RequireSeller(actor): RequireSeller,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> CatalogResult<impl IntoResponse> {
    let product = state.service.create(input).await?;

    state.activity.record(
        Some(actor.id),
        ActivityAction::ProductCreate,
        Some(EntityRef::product(product.id, product.name.clone())),
        Some(request_metadata(
            &headers,
            serde_json::json!({ "productId": product.id }),
        )),
    );

    Ok((StatusCode::CREATED, Json(product)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 503, response = ServiceUnavailableResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    RequireSeller(actor): RequireSeller,
    UuidPath(id): UuidPath,
    headers: HeaderMap,
    ValidatedJson(patch): ValidatedJson<UpdateProduct>,
) -> CatalogResult<Json<Product>> {
    let changes = serde_json::to_value(&patch).unwrap_or(serde_json::Value::Null);
    let product = state.service.update(id, patch).await?;

    state.activity.record(
        Some(actor.id),
        ActivityAction::ProductUpdate,
        Some(EntityRef::product(product.id, product.name.clone())),
        Some(request_metadata(&headers, changes)),
    );

    Ok(Json(product))
}

/// Deletion confirmation
#[derive(Serialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub message: String,
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = DeleteResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(state): State<CatalogState<R>>,
    RequireSeller(actor): RequireSeller,
    UuidPath(id): UuidPath,
    headers: HeaderMap,
) -> CatalogResult<impl IntoResponse> {
    state.service.delete(id).await?;

    state.activity.record(
        Some(actor.id),
        ActivityAction::ProductDelete,
        Some(EntityRef {
            entity_type: "Product".to_string(),
            id: Some(id),
            name: String::new(),
        }),
        Some(request_metadata(
            &headers,
            serde_json::json!({ "productId": id }),
        )),
    );

    Ok((
        StatusCode::OK,
        Json(DeleteResponse {
            message: "Product deleted successfully".to_string(),
        }),
    ))
}
