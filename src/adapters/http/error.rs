//! Shared API error handling for HTTP handlers.
//!
//! Gateway failures never surface here: the AI-backed endpoints always answer
//! 200 with a fallback payload. This type covers everything else - input
//! validation, missing entities, auth, and store failures.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::domain::{DomainError, ErrorCode};

/// JSON error body returned for non-2xx responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// API error mapped onto HTTP statuses.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String, String),
    Forbidden(String),
    Internal(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err.code() {
            ErrorCode::InvalidInput => ApiError::BadRequest(err.to_string()),
            ErrorCode::NotFound => ApiError::NotFound(err.to_string(), String::new()),
            ErrorCode::Forbidden => ApiError::Forbidden(err.to_string()),
            ErrorCode::Internal => ApiError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::NotFound(resource, id) => {
                let message = if id.is_empty() {
                    resource
                } else {
                    format!("{} not found: {}", resource, id)
                };
                (StatusCode::NOT_FOUND, "NOT_FOUND", message)
            }
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                code: code.to_string(),
                message,
            }),
        )
            .into_response()
    }
}
