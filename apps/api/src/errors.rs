use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Boxed cause carried by extraction failures.
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failures raised by the resume/matching engine itself.
///
/// Heuristic misses (no name, no skills, no section) are never errors; they
/// degrade to empty values on the profile.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    #[error("Text extraction failed ({extractor}): {source}")]
    ExtractionFailed {
        extractor: String,
        #[source]
        source: BoxedCause,
    },

    #[error("Invalid match criteria: {0}")]
    InvalidCriteria(String),
}

impl EngineError {
    pub fn extraction_failed(extractor: &str, source: impl Into<BoxedCause>) -> Self {
        EngineError::ExtractionFailed {
            extractor: extractor.to_string(),
            source: source.into(),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Engine(EngineError::UnsupportedFormat(media_type)) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_FORMAT",
                format!("Only PDF or DOCX files are supported (got '{media_type}')"),
            ),
            AppError::Engine(e @ EngineError::ExtractionFailed { .. }) => {
                tracing::warn!("Resume extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACTION_FAILED",
                    "The document could not be read. Please re-upload it.".to_string(),
                )
            }
            AppError::Engine(EngineError::InvalidCriteria(msg)) => {
                (StatusCode::BAD_REQUEST, "INVALID_CRITERIA", msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
