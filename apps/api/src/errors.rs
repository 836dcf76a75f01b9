use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::generation::{DocumentKind, GenerationError};

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Everything except a missing download renders as `{ "success": false, "error": ... }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Failed to generate {kind}: {source}")]
    Generation {
        kind: DocumentKind,
        #[source]
        source: GenerationError,
    },

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn generation(kind: DocumentKind, source: GenerationError) -> Self {
        AppError::Generation { kind, source }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Generation {
                source: GenerationError::UnknownTemplate(_),
                ..
            } => StatusCode::BAD_REQUEST,
            AppError::Generation { .. } => {
                tracing::error!("{self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::FileNotFound(_) => {
                // Plain-text page, not JSON.
                return (StatusCode::NOT_FOUND, self.to_string()).into_response();
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "success": false,
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
