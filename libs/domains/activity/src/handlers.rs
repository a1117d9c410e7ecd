//! HTTP handlers for the activity trail API

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use axum_helpers::{
    auth::RequireSeller,
    errors::responses::{
        ForbiddenResponse, InternalServerErrorResponse, UnauthorizedResponse,
    },
    Pagination,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ActivityResult;
use crate::models::{ActivityAction, ActivityFilter, ActivityLog, ActivityMetadata, ActivityPage, EntityRef};
use crate::repository::ActivityLogRepository;
use crate::service::ActivityService;

/// OpenAPI documentation for the Activity API
#[derive(OpenApi)]
#[openapi(
    paths(list_activity),
    components(
        schemas(ActivityLog, ActivityAction, ActivityMetadata, EntityRef, ActivityPage),
        responses(UnauthorizedResponse, ForbiddenResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = "Activity", description = "Seller activity audit trail")
    )
)]
pub struct ApiDoc;

/// Create the activity router
pub fn router<R: ActivityLogRepository + 'static>(service: ActivityService<R>) -> Router {
    Router::new()
        .route("/", get(list_activity))
        .with_state(Arc::new(service))
}

/// Query the audit trail
#[utoipa::path(
    get,
    path = "",
    tag = "Activity",
    params(ActivityFilter, Pagination),
    responses(
        (status = 200, description = "One page of activity entries", body = ActivityPage),
        (status = 401, response = UnauthorizedResponse),
        (status = 403, response = ForbiddenResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_activity<R: ActivityLogRepository>(
    State(service): State<Arc<ActivityService<R>>>,
    RequireSeller(_actor): RequireSeller,
    Query(filter): Query<ActivityFilter>,
    Query(pagination): Query<Pagination>,
) -> ActivityResult<Json<ActivityPage>> {
    let page = service.list(&filter, pagination).await?;
    Ok(Json(page))
}
