use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::query::QueryError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers and middleware can return `Result<T, AppError>`.
/// The body is always `{"error": "<message>"}`; internal causes are only logged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No Authorization header")]
    CredentialMissing,

    #[error("Invalid JWT in Authorization header")]
    CredentialInvalid,

    #[error("Query error: {0}")]
    Query(#[from] QueryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::CredentialMissing | AppError::CredentialInvalid => {
                (StatusCode::FORBIDDEN, self.to_string())
            }
            AppError::Query(QueryError::PoolExhausted) => {
                tracing::error!("Database pool exhausted");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Service unavailable".to_string(),
                )
            }
            AppError::Query(e) => {
                tracing::error!("Query error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
