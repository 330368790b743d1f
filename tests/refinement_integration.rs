//! Integration tests for message refinement.
//!
//! These exercise the refiner against the mock gateway end to end and check
//! the DTO mapping the HTTP layer relies on:
//! 1. Single-vibe refinement and its fallbacks
//! 2. All-vibes refinement batches into exactly one gateway call
//! 3. The variant map always carries the full catalog key set

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use harmony::adapters::ai::MockGateway;
use harmony::adapters::http::messages::dto::{RefineAllResponse, RefineResponse};
use harmony::application::MessageRefiner;
use harmony::domain::refinement::AliasContext;
use harmony::domain::vibe;
use harmony::ports::GatewayError;

fn refiner_with(gateway: MockGateway) -> (MessageRefiner, MockGateway) {
    let probe = gateway.clone();
    (MessageRefiner::new(Arc::new(gateway)), probe)
}

#[tokio::test]
async fn refine_one_returns_model_output() {
    let (refiner, gateway) =
        refiner_with(MockGateway::new().with_response("Hey love, dinner tonight?"));

    let result = refiner
        .refine_one("dinner tonight?", "affectionate", &AliasContext::default())
        .await;

    assert_eq!(result.refined_text, "Hey love, dinner tonight?");
    assert!(!result.used_fallback);
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn refine_one_unknown_vibe_never_calls_gateway() {
    let (refiner, gateway) = refiner_with(MockGateway::new().with_response("unused"));

    let result = refiner
        .refine_one("hello", "sarcastic", &AliasContext::default())
        .await;

    assert!(result.used_fallback);
    assert_eq!(result.refined_text, "hello");
    assert_eq!(result.failure_reason.as_deref(), Some("invalid input"));
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn refine_one_rate_limit_maps_to_classification() {
    let (refiner, _) = refiner_with(
        MockGateway::new().with_error(GatewayError::RateLimited("429".to_string())),
    );

    let result = refiner
        .refine_one("hello", "playful", &AliasContext::default())
        .await;

    assert!(result.used_fallback);
    assert_eq!(result.failure_reason.as_deref(), Some("rate limited"));

    let response = RefineResponse::from(result);
    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["refinedMessage"], "hello");
    assert_eq!(body["error"], "rate limited");
}

#[tokio::test]
async fn refine_all_uses_a_single_gateway_call() {
    let mut payload = serde_json::Map::new();
    for id in vibe::ids() {
        payload.insert(id.to_string(), json!(format!("{id} version")));
    }
    let (refiner, gateway) = refiner_with(
        MockGateway::new().with_response(serde_json::Value::Object(payload).to_string()),
    );

    let result = refiner.refine_all("see you soon", &AliasContext::default()).await;

    assert_eq!(gateway.call_count(), 1);
    assert!(!result.used_fallback);
    for id in vibe::ids() {
        assert_eq!(result.variants[id], format!("{id} version"));
    }
}

#[tokio::test]
async fn refine_all_fills_missing_keys_with_original() {
    let partial = json!({
        "playful": "heyyy, guess who",
        "funny": "knock knock"
    });
    let (refiner, _) = refiner_with(MockGateway::new().with_response(partial.to_string()));

    let result = refiner.refine_all("guess who", &AliasContext::default()).await;

    assert!(result.used_fallback);
    assert!(result.failure_reason.is_none());
    assert_eq!(result.variants["playful"], "heyyy, guess who");
    assert_eq!(result.variants["funny"], "knock knock");
    assert_eq!(result.variants["apologetic"], "guess who");
    assert_eq!(result.variants.len(), vibe::ids().len());
}

#[tokio::test]
async fn refine_all_total_failure_keeps_every_key() {
    let (refiner, _) = refiner_with(
        MockGateway::new().with_error(GatewayError::QuotaExceeded("billing".to_string())),
    );

    let result = refiner.refine_all("miss you", &AliasContext::default()).await;

    assert!(result.used_fallback);
    assert_eq!(result.failure_reason.as_deref(), Some("quota exceeded"));
    for id in vibe::ids() {
        assert_eq!(result.variants[id], "miss you");
    }

    let response = RefineAllResponse::from(result);
    let body = serde_json::to_value(&response).unwrap();
    assert_eq!(body["error"], "quota exceeded");
    assert_eq!(
        body["refinedMessages"].as_object().unwrap().len(),
        vibe::ids().len()
    );
}

proptest! {
    /// Whatever the input and however the gateway fails, the all-vibes map
    /// carries exactly the catalog key set.
    #[test]
    fn refine_all_key_set_is_invariant(message in "\\PC{1,80}", malformed in "\\PC{0,40}") {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async {
            let (refiner, _) = refiner_with(MockGateway::new().with_response(malformed));
            let result = refiner.refine_all(&message, &AliasContext::default()).await;

            let mut keys: Vec<&str> = result.variants.keys().map(String::as_str).collect();
            keys.sort_unstable();
            let mut expected = vibe::ids();
            expected.sort_unstable();
            prop_assert_eq!(keys, expected);
            Ok(())
        })?;
    }
}
