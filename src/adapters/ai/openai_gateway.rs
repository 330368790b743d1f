//! OpenAI-compatible implementation of the text generation gateway.
//!
//! Talks to a chat-completions endpoint over HTTPS. Structured output is
//! requested with `response_format: {"type": "json_object"}`; parsing the
//! returned text stays with the caller. No retries happen here - callers
//! fall back instead - and request bodies carrying user message content are
//! never logged, only model, latency, and outcome.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::ports::{CompletionRequest, GatewayError, TextGenerationGateway};

/// Configuration for the OpenAI-compatible gateway.
#[derive(Debug, Clone)]
pub struct OpenAiGatewayConfig {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAiGatewayConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Gateway backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiGateway {
    config: OpenAiGatewayConfig,
    client: Client,
}

impl OpenAiGateway {
    pub fn new(config: OpenAiGatewayConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("failed to build HTTP client");
        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn to_api_request(&self, request: &CompletionRequest) -> ApiRequest {
        let mut messages = Vec::new();
        if let Some(ref prompt) = request.system_prompt {
            messages.push(ApiMessage {
                role: "system".to_string(),
                content: prompt.clone(),
            });
        }
        messages.push(ApiMessage {
            role: "user".to_string(),
            content: request.user_prompt.clone(),
        });

        ApiRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            response_format: request.json_mode.then(|| ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        }
    }

    /// Maps a non-success HTTP status onto the gateway error taxonomy.
    ///
    /// OpenAI reports exhausted billing quota as a 429 with error type
    /// `insufficient_quota`, so 429 splits on the body.
    fn classify_status(status: u16, body: &str) -> GatewayError {
        match status {
            429 if body.contains("insufficient_quota") => {
                GatewayError::QuotaExceeded(truncate(body))
            }
            429 => GatewayError::RateLimited(truncate(body)),
            _ => GatewayError::Provider(format!("status {}: {}", status, truncate(body))),
        }
    }
}

fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[async_trait]
impl TextGenerationGateway for OpenAiGateway {
    async fn complete(&self, request: CompletionRequest) -> Result<String, GatewayError> {
        let api_request = self.to_api_request(&request);
        let started = std::time::Instant::now();

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Provider(format!(
                        "request timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else {
                    GatewayError::Provider(format!("network error: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = Self::classify_status(status.as_u16(), &body);
            tracing::warn!(
                model = %self.config.model,
                status = status.as_u16(),
                outcome = err.classification(),
                "completion failed"
            );
            return Err(err);
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Provider(format!("unparseable response: {}", e)))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| GatewayError::Provider("no choices in response".to_string()))?;

        tracing::debug!(
            model = %self.config.model,
            json_mode = request.json_mode,
            latency_ms = started.elapsed().as_millis() as u64,
            outcome = "ok",
            "completion succeeded"
        );
        Ok(content)
    }

    fn is_configured(&self) -> bool {
        true
    }
}

// ----- Wire types -----

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    messages: Vec<ApiMessage>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> OpenAiGateway {
        OpenAiGateway::new(OpenAiGatewayConfig::new("test-key").with_model("gpt-4o-mini"))
    }

    #[test]
    fn config_builder_works() {
        let config = OpenAiGatewayConfig::new("key")
            .with_model("gpt-4o")
            .with_base_url("https://proxy.example.com/v1")
            .with_timeout(Duration::from_secs(10));
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.base_url, "https://proxy.example.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.api_key(), "key");
    }

    #[test]
    fn json_mode_sets_response_format() {
        let request = CompletionRequest::new("hello").with_json_mode(true);
        let api_request = gateway().to_api_request(&request);
        assert_eq!(
            api_request.response_format.as_ref().unwrap().format_type,
            "json_object"
        );

        let plain = CompletionRequest::new("hello");
        assert!(gateway().to_api_request(&plain).response_format.is_none());
    }

    #[test]
    fn system_prompt_becomes_first_message() {
        let request = CompletionRequest::new("user text").with_system_prompt("persona");
        let api_request = gateway().to_api_request(&request);
        assert_eq!(api_request.messages.len(), 2);
        assert_eq!(api_request.messages[0].role, "system");
        assert_eq!(api_request.messages[0].content, "persona");
        assert_eq!(api_request.messages[1].role, "user");
    }

    #[test]
    fn status_classification() {
        let err = OpenAiGateway::classify_status(429, r#"{"error":{"type":"insufficient_quota"}}"#);
        assert!(matches!(err, GatewayError::QuotaExceeded(_)));

        let err = OpenAiGateway::classify_status(429, r#"{"error":{"type":"rate_limit_exceeded"}}"#);
        assert!(matches!(err, GatewayError::RateLimited(_)));

        let err = OpenAiGateway::classify_status(500, "server error");
        assert!(matches!(err, GatewayError::Provider(_)));
    }

    #[test]
    fn constructed_gateway_reports_configured() {
        assert!(gateway().is_configured());
    }
}
