//! Static-token session validator for development and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::ports::{AuthError, AuthenticatedUser, SessionValidator};

/// Validator backed by a fixed token-to-user table.
#[derive(Default)]
pub struct MockSessionValidator {
    users: Mutex<HashMap<String, AuthenticatedUser>>,
}

impl MockSessionValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` as a valid session for the given user.
    pub fn with_user(self, token: &str, id: &str, display_name: &str) -> Self {
        self.users.lock().expect("user table poisoned").insert(
            token.to_string(),
            AuthenticatedUser {
                id: id.to_string(),
                display_name: display_name.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl SessionValidator for MockSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.users
            .lock()
            .expect("user table poisoned")
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
