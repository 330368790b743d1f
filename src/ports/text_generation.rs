//! Text Generation Gateway port - the single boundary to the language model.
//!
//! Every AI-driven component (refiner, coach, radar) talks to the provider
//! through this trait and nothing else. The gateway performs no retries;
//! callers fall back instead. Whether a credential exists is decided once at
//! construction - an unconfigured process gets a gateway whose every call
//! resolves to [`GatewayError::Unconfigured`] without network I/O.
//!
//! # Example
//!
//! ```ignore
//! let request = CompletionRequest::new("Rewrite this warmly: see you at 7")
//!     .with_system_prompt("You rewrite messages between partners.")
//!     .with_temperature(0.7)
//!     .with_max_tokens(300);
//!
//! match gateway.complete(request).await {
//!     Ok(text) => println!("{text}"),
//!     Err(err) => println!("fallback: {}", err.classification()),
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

/// Port for chat-completion calls against the external provider.
#[async_trait]
pub trait TextGenerationGateway: Send + Sync {
    /// Runs one completion. Never retries; errors classify the failure.
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError>;

    /// Whether a provider credential was present at construction.
    ///
    /// Callers that want to skip the call entirely in the unconfigured state
    /// (rather than pay for a failed future) check this first.
    fn is_configured(&self) -> bool;
}

/// A single completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System prompt guiding model behavior.
    pub system_prompt: Option<String>,
    /// The user-role prompt body.
    pub user_prompt: String,
    /// Request structured JSON output instead of free text.
    ///
    /// The gateway only requests the format; parsing is the caller's job.
    pub json_mode: bool,
    /// Sampling temperature.
    pub temperature: f32,
    /// Hard cap on generated tokens.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Creates a plain-text request with the component defaults
    /// (temperature 0.7, 500 token budget).
    pub fn new(user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: None,
            user_prompt: user_prompt.into(),
            json_mode: false,
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Gateway failure taxonomy.
///
/// The only four ways an AI call can fail, as seen by callers. Raw provider
/// error strings stay inside `detail` fields and are never shown to users;
/// [`GatewayError::classification`] is the stable human-readable form.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// No provider credential configured; known at startup, never retried.
    #[error("gateway not configured")]
    Unconfigured,

    /// Provider signaled throttling.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Provider signaled a billing or usage limit.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Any other provider-side failure, including malformed structured output.
    #[error("provider error: {0}")]
    Provider(String),
}

impl GatewayError {
    /// Stable classification string surfaced in API `error` fields.
    pub fn classification(&self) -> &'static str {
        match self {
            GatewayError::Unconfigured => "not configured",
            GatewayError::RateLimited(_) => "rate limited",
            GatewayError::QuotaExceeded(_) => "quota exceeded",
            GatewayError::Provider(_) => "provider error",
        }
    }

    /// True when the failure is a credential/configuration problem rather
    /// than a transient provider condition.
    pub fn is_configuration_problem(&self) -> bool {
        matches!(self, GatewayError::Unconfigured)
    }
}
