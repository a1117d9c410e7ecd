//! Products API routes.
//!
//! Wires the catalog domain to HTTP: MongoDB repository, optional
//! Cloudinary uploads, and the activity recorder its write paths report to.

use axum::Router;
use domain_activity::{ActivityLogger, MongoActivityLogRepository};
use domain_catalog::{
    handlers, CatalogService, CatalogState, CloudinaryUploader, MongoProductRepository,
};
use std::sync::Arc;
use tracing::info;

use crate::state::AppState;

/// Create the products router
pub fn router(state: &AppState) -> Router {
    let repository = MongoProductRepository::new(&state.db);

    let mut service = CatalogService::new(repository);
    if let Some(uploader) = CloudinaryUploader::from_env() {
        info!("Cloudinary image uploads enabled");
        service = service.with_uploader(uploader);
    }

    // Write paths report into the audit trail, decoupled from their outcome
    let activity = ActivityLogger::new(MongoActivityLogRepository::new(&state.db));

    handlers::router(CatalogState {
        service: Arc::new(service),
        activity,
    })
}

/// Initialize product indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoProductRepository::new(db)
        .init_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create product indexes: {}", e))?;
    Ok(())
}
