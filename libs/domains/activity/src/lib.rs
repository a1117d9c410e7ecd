//! Activity Domain
//!
//! Append-only audit trail of seller actions, stored in MongoDB.
//!
//! Two entry points:
//! - [`ActivityLogger`] - fire-and-forget recorder invoked by write
//!   handlers; failures never reach the triggering operation.
//! - [`ActivityService`] + [`handlers`] - the paged query API over the
//!   recorded trail.

pub mod error;
pub mod handlers;
pub mod logger;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use error::{ActivityError, ActivityResult};
pub use handlers::ApiDoc;
pub use logger::ActivityLogger;
pub use models::{
    ActivityAction, ActivityFilter, ActivityLog, ActivityMetadata, ActivityPage, EntityRef,
};
pub use mongodb::MongoActivityLogRepository;
pub use repository::ActivityLogRepository;
pub use service::ActivityService;
