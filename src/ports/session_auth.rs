//! Session validation port - the authentication boundary.
//!
//! Login, cookies, and session issuance belong to the external auth
//! collaborator; the core only needs "is this session token valid, and for
//! whom". Keeping this behind a port lets the HTTP middleware stay identical
//! between the real validator and the test mock.

use async_trait::async_trait;
use thiserror::Error;

/// The user attached to a validated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("session expired")]
    SessionExpired,

    #[error("invalid session token")]
    InvalidToken,

    #[error("auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Validates session tokens presented by the HTTP layer.
#[async_trait]
pub trait SessionValidator: Send + Sync {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
