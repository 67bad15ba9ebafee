use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClockInError {
    #[error("Clock-in record not found: {0}")]
    NotFound(ObjectId),

    #[error("Stored document is missing its identifier")]
    MalformedDocument,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ClockInResult<T> = Result<T, ClockInError>;

/// Convert ClockInError to AppError for standardized error responses.
impl From<ClockInError> for AppError {
    fn from(err: ClockInError) -> Self {
        match err {
            ClockInError::NotFound(id) => {
                AppError::NotFound(format!("Clock-in record {} not found", id.to_hex()))
            }
            ClockInError::Validation(msg) => AppError::UnprocessableEntity(msg),
            ClockInError::MalformedDocument => {
                tracing::error!("clock-in document is missing _id after a successful write");
                AppError::InternalServerError("Internal Server Error".to_string())
            }
            ClockInError::Database(msg) => {
                tracing::error!(error = %msg, "clock-in store operation failed");
                AppError::InternalServerError("Internal Server Error".to_string())
            }
        }
    }
}

impl IntoResponse for ClockInError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ClockInError {
    fn from(err: mongodb::error::Error) -> Self {
        ClockInError::Database(err.to_string())
    }
}
