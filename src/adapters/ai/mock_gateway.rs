//! Mock gateway for tests.
//!
//! Queues responses and errors consumed in order, records every request, and
//! counts calls so tests can assert batching behavior (one call for the whole
//! vibe catalog) and fallback paths without a real provider.
//!
//! # Example
//!
//! ```ignore
//! let gateway = MockGateway::new()
//!     .with_response("rewritten text")
//!     .with_error(GatewayError::RateLimited("429".into()));
//!
//! let shared = gateway.clone(); // same internal state
//! // ... run the component under test ...
//! assert_eq!(shared.call_count(), 2);
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{CompletionRequest, GatewayError, TextGenerationGateway};

/// Configurable test double for the text generation gateway.
///
/// Cloning shares the queue and call history, so a clone kept by the test
/// observes calls made through the instance handed to the component.
#[derive(Debug, Clone)]
pub struct MockGateway {
    outcomes: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
    configured: bool,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// A configured mock with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            configured: true,
        }
    }

    /// A mock reporting the unconfigured state; calls still count.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Queues a successful completion.
    pub fn with_response(self, content: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .expect("outcome queue poisoned")
            .push_back(Ok(content.into()));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: GatewayError) -> Self {
        self.outcomes
            .lock()
            .expect("outcome queue poisoned")
            .push_back(Err(error));
        self
    }

    /// Number of completed calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("call log poisoned").len()
    }

    /// The most recent request, if any call was made.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.calls.lock().expect("call log poisoned").last().cloned()
    }

    /// All recorded requests, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.calls.lock().expect("call log poisoned").clone()
    }
}

#[async_trait]
impl TextGenerationGateway for MockGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        // Record and pop synchronously on first poll so queue order matches
        // fan-out poll order in concurrent tests.
        self.calls.lock().expect("call log poisoned").push(request);
        if !self.configured {
            return Err(GatewayError::Unconfigured);
        }
        self.outcomes
            .lock()
            .expect("outcome queue poisoned")
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Provider("mock queue empty".to_string())))
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
