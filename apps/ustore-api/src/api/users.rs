//! Users API routes.
//!
//! Identity itself is issued elsewhere; this surface only echoes the
//! already-authenticated actor.

use axum::{routing::get, Json, Router};
use axum_helpers::auth::{AuthUser, Role};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// The authenticated actor's identity
#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Create the users router
pub fn router() -> Router {
    Router::new().route("/me", get(me))
}

/// Who am I
#[utoipa::path(
    get,
    path = "/me",
    tag = "Users",
    responses(
        (status = 200, description = "The authenticated identity", body = MeResponse),
        (status = 401, description = "Authentication required")
    )
)]
pub async fn me(user: AuthUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.id,
        email: user.email,
        role: user.role,
    })
}
