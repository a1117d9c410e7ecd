use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ActivityResult<T> = Result<T, ActivityError>;

impl From<mongodb::error::Error> for ActivityError {
    fn from(err: mongodb::error::Error) -> Self {
        ActivityError::Database(err.to_string())
    }
}

impl From<ActivityError> for AppError {
    fn from(err: ActivityError) -> Self {
        match err {
            ActivityError::Validation(msg) => AppError::BadRequest(msg),
            ActivityError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ActivityError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
