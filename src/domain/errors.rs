//! Domain error type shared across stores and application services.

use thiserror::Error;

/// Machine-readable error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Input failed validation (empty message, unknown id, ...).
    InvalidInput,
    /// Requested entity does not exist.
    NotFound,
    /// Caller is not allowed to touch the entity.
    Forbidden,
    /// Anything else - storage failures, invariant violations.
    Internal,
}

/// Error returned by stores and domain operations.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}
