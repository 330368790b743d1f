//! Message Refiner - tone-adjusted rewriting of couple messages.
//!
//! Refinement is always best-effort: every failure path resolves to the
//! original text with `used_fallback` set, never an error to the caller.
//! The all-vibes operation deliberately issues a single JSON-mode call for
//! the whole catalog instead of one call per vibe, bounding latency and cost
//! to one completion regardless of catalog size.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::refinement::{AliasContext, RefinedMessage, VibeVariants};
use crate::domain::vibe;
use crate::ports::{CompletionRequest, TextGenerationGateway};

const REFINE_SYSTEM_PROMPT: &str =
    "You help partners communicate better by rewriting their messages in a requested tone. \
     Keep the meaning, keep it natural, and reply with only the rewritten message.";

const REFINE_ALL_SYSTEM_PROMPT: &str =
    "You help partners communicate better by rewriting one message in several tones at once. \
     Respond with a JSON object only.";

/// Failure classification for locally rejected input.
const INVALID_INPUT: &str = "invalid input";

/// Rewrites messages into catalog vibes through the gateway.
pub struct MessageRefiner {
    gateway: Arc<dyn TextGenerationGateway>,
}

impl MessageRefiner {
    pub fn new(gateway: Arc<dyn TextGenerationGateway>) -> Self {
        Self { gateway }
    }

    /// Rewrites `text` into the single vibe `vibe_id`.
    ///
    /// Empty text or an unknown vibe id short-circuits to the original text
    /// with `failure_reason = "invalid input"`; gateway failures classify per
    /// [`crate::ports::GatewayError::classification`].
    pub async fn refine_one(
        &self,
        text: &str,
        vibe_id: &str,
        aliases: &AliasContext,
    ) -> RefinedMessage {
        if text.trim().is_empty() {
            return RefinedMessage::fallback(text, INVALID_INPUT);
        }
        let Some(vibe) = vibe::find(vibe_id) else {
            return RefinedMessage::fallback(text, INVALID_INPUT);
        };

        let request = CompletionRequest::new(single_vibe_prompt(text, vibe, aliases))
            .with_system_prompt(REFINE_SYSTEM_PROMPT)
            .with_temperature(0.7)
            .with_max_tokens(300);

        match self.gateway.complete(request).await {
            Ok(raw) => {
                let refined = raw.trim();
                if refined.is_empty() {
                    tracing::warn!(vibe = vibe_id, "gateway returned empty refinement");
                    RefinedMessage::fallback(text, "provider error")
                } else {
                    RefinedMessage::refined(refined)
                }
            }
            Err(err) => {
                tracing::warn!(vibe = vibe_id, error = %err, "refinement fell back");
                RefinedMessage::fallback(text, err.classification())
            }
        }
    }

    /// Rewrites `text` into every catalog vibe with one gateway call.
    ///
    /// The result map always carries the full catalog key set: vibes the
    /// model skipped are filled with the original text, and a total gateway
    /// failure yields the original under every id.
    pub async fn refine_all(&self, text: &str, aliases: &AliasContext) -> VibeVariants {
        if text.trim().is_empty() {
            return all_originals(text, Some(INVALID_INPUT.to_string()));
        }

        let request = CompletionRequest::new(all_vibes_prompt(text, aliases))
            .with_system_prompt(REFINE_ALL_SYSTEM_PROMPT)
            .with_json_mode(true)
            .with_temperature(0.7)
            .with_max_tokens(1500);

        let raw = match self.gateway.complete(request).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(error = %err, "all-vibes refinement fell back");
                return all_originals(text, Some(err.classification().to_string()));
            }
        };

        let parsed: serde_json::Value = match serde_json::from_str(raw.trim()) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(error = %err, "all-vibes response was not valid json");
                return all_originals(text, Some("provider error".to_string()));
            }
        };

        // The model is asked for exactly the catalog key set but is not
        // trusted to comply: missing or non-string entries fall back to the
        // original text per vibe rather than failing the whole map.
        let mut variants = BTreeMap::new();
        let mut any_filled = false;
        for id in vibe::ids() {
            match parsed.get(id).and_then(|v| v.as_str()) {
                Some(value) if !value.trim().is_empty() => {
                    variants.insert(id.to_string(), value.trim().to_string());
                }
                _ => {
                    any_filled = true;
                    variants.insert(id.to_string(), text.to_string());
                }
            }
        }

        VibeVariants {
            variants,
            used_fallback: any_filled,
            failure_reason: None,
        }
    }
}

fn alias_fragment(aliases: &AliasContext) -> String {
    let mut fragment = String::new();
    if let Some(ref sender) = aliases.sender {
        fragment.push_str(&format!("The sender goes by {}. ", sender));
    }
    if let Some(ref recipient) = aliases.recipient {
        fragment.push_str(&format!("The recipient goes by {}. ", recipient));
    }
    fragment
}

fn single_vibe_prompt(
    text: &str,
    vibe: &crate::domain::vibe::VibeDefinition,
    aliases: &AliasContext,
) -> String {
    format!(
        "{}{}.\n\nMessage: {}",
        alias_fragment(aliases),
        vibe.rewrite_instruction,
        text
    )
}

fn all_vibes_prompt(text: &str, aliases: &AliasContext) -> String {
    let tone_lines: Vec<String> = vibe::all()
        .iter()
        .map(|v| format!("- \"{}\": {}", v.id, v.rewrite_instruction))
        .collect();
    format!(
        "{}Rewrite the message below once per tone. Return a JSON object whose keys are \
         exactly the tone ids and whose values are the rewritten messages.\n\nTones:\n{}\n\nMessage: {}",
        alias_fragment(aliases),
        tone_lines.join("\n"),
        text
    )
}

fn all_originals(text: &str, failure_reason: Option<String>) -> VibeVariants {
    let variants = vibe::ids()
        .into_iter()
        .map(|id| (id.to_string(), text.to_string()))
        .collect();
    VibeVariants {
        variants,
        used_fallback: true,
        failure_reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockGateway;
    use crate::ports::GatewayError;
    use std::collections::BTreeSet;

    fn refiner(gateway: MockGateway) -> (MessageRefiner, MockGateway) {
        let shared = gateway.clone();
        (MessageRefiner::new(Arc::new(gateway)), shared)
    }

    #[tokio::test]
    async fn refine_one_success_trims_response() {
        let (refiner, _) = refiner(MockGateway::new().with_response("  warmer words  "));
        let result = refiner
            .refine_one("see you at 7", "affectionate", &AliasContext::default())
            .await;
        assert_eq!(result.refined_text, "warmer words");
        assert!(!result.used_fallback);
    }

    #[tokio::test]
    async fn refine_one_unknown_vibe_is_invalid_input() {
        let (refiner, gateway) = refiner(MockGateway::new().with_response("unused"));
        let result = refiner
            .refine_one("hello", "sarcastic", &AliasContext::default())
            .await;
        assert_eq!(result.refined_text, "hello");
        assert!(result.used_fallback);
        assert_eq!(result.failure_reason.as_deref(), Some("invalid input"));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn refine_one_empty_text_is_invalid_input() {
        let (refiner, gateway) = refiner(MockGateway::new());
        let result = refiner
            .refine_one("   ", "playful", &AliasContext::default())
            .await;
        assert!(result.used_fallback);
        assert_eq!(result.failure_reason.as_deref(), Some("invalid input"));
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn refine_one_classifies_gateway_errors() {
        let cases = [
            (GatewayError::Unconfigured, "not configured"),
            (GatewayError::RateLimited("429".into()), "rate limited"),
            (GatewayError::QuotaExceeded("billing".into()), "quota exceeded"),
            (GatewayError::Provider("boom".into()), "provider error"),
        ];
        for (error, expected) in cases {
            let (refiner, _) = refiner(MockGateway::new().with_error(error));
            let result = refiner
                .refine_one("hello", "playful", &AliasContext::default())
                .await;
            assert_eq!(result.refined_text, "hello");
            assert!(result.used_fallback);
            assert_eq!(result.failure_reason.as_deref(), Some(expected));
        }
    }

    #[tokio::test]
    async fn refine_one_empty_response_falls_back() {
        let (refiner, _) = refiner(MockGateway::new().with_response("   "));
        let result = refiner
            .refine_one("hello", "funny", &AliasContext::default())
            .await;
        assert_eq!(result.refined_text, "hello");
        assert!(result.used_fallback);
    }

    #[tokio::test]
    async fn refine_one_includes_aliases_in_prompt() {
        let (refiner, gateway) = refiner(MockGateway::new().with_response("ok"));
        let aliases = AliasContext {
            sender: Some("Bear".into()),
            recipient: Some("Bunny".into()),
        };
        refiner.refine_one("hello", "playful", &aliases).await;
        let request = gateway.last_request().unwrap();
        assert!(request.user_prompt.contains("Bear"));
        assert!(request.user_prompt.contains("Bunny"));
        assert!(!request.json_mode);
    }

    #[tokio::test]
    async fn refine_all_issues_exactly_one_call() {
        let body = serde_json::json!({
            "affectionate": "a", "concerned": "b", "apologetic": "c",
            "playful": "d", "excited": "e", "flirty": "f", "funny": "g"
        });
        let (refiner, gateway) = refiner(MockGateway::new().with_response(body.to_string()));
        let result = refiner.refine_all("hello", &AliasContext::default()).await;

        assert_eq!(gateway.call_count(), 1);
        assert!(gateway.last_request().unwrap().json_mode);
        assert!(!result.used_fallback);
        assert_eq!(result.variants["playful"], "d");
    }

    #[tokio::test]
    async fn refine_all_fills_missing_keys_with_original() {
        let body = serde_json::json!({ "playful": "something playful", "funny": 42 });
        let (refiner, _) = refiner(MockGateway::new().with_response(body.to_string()));
        let result = refiner.refine_all("hello", &AliasContext::default()).await;

        let expected: BTreeSet<String> = vibe::ids().into_iter().map(String::from).collect();
        let actual: BTreeSet<String> = result.variants.keys().cloned().collect();
        assert_eq!(actual, expected);
        assert_eq!(result.variants["playful"], "something playful");
        assert_eq!(result.variants["funny"], "hello"); // non-string filled
        assert_eq!(result.variants["flirty"], "hello");
        assert!(result.used_fallback);
    }

    #[tokio::test]
    async fn refine_all_total_failure_maps_originals_everywhere() {
        let (refiner, _) = refiner(MockGateway::new().with_error(GatewayError::Unconfigured));
        let result = refiner.refine_all("hello", &AliasContext::default()).await;

        assert_eq!(result.variants.len(), vibe::all().len());
        assert!(result.variants.values().all(|v| v == "hello"));
        assert!(result.used_fallback);
        assert_eq!(result.failure_reason.as_deref(), Some("not configured"));
    }

    #[tokio::test]
    async fn refine_all_malformed_json_maps_originals() {
        let (refiner, _) = refiner(MockGateway::new().with_response("not json at all"));
        let result = refiner.refine_all("hello", &AliasContext::default()).await;

        assert!(result.variants.values().all(|v| v == "hello"));
        assert_eq!(result.failure_reason.as_deref(), Some("provider error"));
    }
}
