use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use archive_core::ImportError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Sqlx(e) => {
                tracing::error!("Database error: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
        };

        (status, Json(json!({ "detail": message }))).into_response()
    }
}

/// Map import failures to responses: unique-constraint violations (duplicate
/// ply in one game) become 409s with the database message attached; anything
/// else from the sink is a processing error.
impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InvalidPly(e) => AppError::BadRequest(e.to_string()),
            ImportError::Sink(source) => match source.downcast::<sqlx::Error>() {
                Ok(db_err)
                    if db_err
                        .as_database_error()
                        .is_some_and(|d| d.is_unique_violation()) =>
                {
                    AppError::Conflict(format!("Import rejected: {db_err}"))
                }
                Ok(db_err) => AppError::Sqlx(db_err),
                Err(other) => AppError::Internal(format!("Failed to process archive: {other}")),
            },
        }
    }
}
