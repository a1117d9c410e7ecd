//! Activity API routes

use axum::Router;
use domain_activity::{handlers, ActivityService, MongoActivityLogRepository};

use crate::state::AppState;

/// Create the activity router
pub fn router(state: &AppState) -> Router {
    let repository = MongoActivityLogRepository::new(&state.db);
    let service = ActivityService::new(repository);

    handlers::router(service)
}

/// Initialize activity log indexes in MongoDB
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoActivityLogRepository::new(db)
        .create_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create activity log indexes: {}", e))?;
    Ok(())
}
