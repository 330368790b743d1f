//! The gateway installed when no provider credential exists.
//!
//! The credential check happens once, at process start: if the key is absent
//! this gateway is wired in and every call resolves immediately to
//! [`GatewayError::Unconfigured`] with no network I/O. Callers that check
//! [`TextGenerationGateway::is_configured`] can skip the call entirely.

use async_trait::async_trait;

use crate::ports::{CompletionRequest, GatewayError, TextGenerationGateway};

/// Gateway stand-in for a process started without a provider credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredGateway;

impl UnconfiguredGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextGenerationGateway for UnconfiguredGateway {
    async fn complete(&self, _request: CompletionRequest) -> Result<String, GatewayError> {
        Err(GatewayError::Unconfigured)
    }

    fn is_configured(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_call_is_unconfigured() {
        let gateway = UnconfiguredGateway::new();
        assert!(!gateway.is_configured());
        let result = gateway.complete(CompletionRequest::new("hello")).await;
        assert!(matches!(result, Err(GatewayError::Unconfigured)));
    }
}
