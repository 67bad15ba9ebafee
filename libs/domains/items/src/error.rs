use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found: {0}")]
    NotFound(ObjectId),

    #[error("No data found")]
    NoData,

    #[error("Stored document is missing its identifier")]
    MalformedDocument,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

/// Convert ItemError to AppError for standardized error responses.
///
/// Store-side failures are logged here with full detail and surfaced to
/// clients as a generic internal error.
impl From<ItemError> for AppError {
    fn from(err: ItemError) -> Self {
        match err {
            ItemError::NotFound(id) => {
                AppError::NotFound(format!("Item {} not found", id.to_hex()))
            }
            ItemError::NoData => AppError::NotFound("No data found".to_string()),
            ItemError::Validation(msg) => AppError::UnprocessableEntity(msg),
            ItemError::MalformedDocument => {
                tracing::error!("item document is missing _id after a successful write");
                AppError::InternalServerError("Internal Server Error".to_string())
            }
            ItemError::Database(msg) => {
                tracing::error!(error = %msg, "item store operation failed");
                AppError::InternalServerError("Internal Server Error".to_string())
            }
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ItemError {
    fn from(err: mongodb::error::Error) -> Self {
        ItemError::Database(err.to_string())
    }
}
