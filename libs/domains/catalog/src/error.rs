use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Image uploads are not configured")]
    UploadNotConfigured,

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Database(err.to_string())
    }
}

/// Convert CatalogError to AppError for standardized error responses.
///
/// The taxonomy matters to clients: a malformed id never reads as a missing
/// product, and an unconfigured upload provider is distinguishable from a
/// storage failure so callers can retry without the image.
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            CatalogError::MissingFields(fields) => {
                AppError::BadRequest(format!("Missing required fields: {}", fields.join(", ")))
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::UploadNotConfigured => {
                AppError::ServiceUnavailable("Image uploads are not configured".to_string())
            }
            CatalogError::Upload(msg) => AppError::InternalServerError(msg),
            CatalogError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
