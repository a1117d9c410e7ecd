//! API routes module.
//!
//! All routes here are nested under /api by axum_helpers::create_router.

pub mod activity;
pub mod health;
pub mod products;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/products", products::router(state))
        .nest("/activity", activity::router(state))
        .nest("/users", users::router())
        .merge(health::router(state.clone()))
}
