//! Shared application state passed to request handlers.

use mongodb::{Client, Database};

/// Cloned per handler (inexpensive: the client shares one connection pool).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client
    pub mongo_client: Client,
    /// MongoDB database handle
    pub db: Database,
}
