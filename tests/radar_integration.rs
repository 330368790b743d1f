//! Integration tests for the relationship radar.
//!
//! These seed the in-memory stores, run the fan-out against the mock
//! gateway, and check the aggregate shape: ordering, degradation of a
//! single failed analysis, and the never-empty guarantee.

use std::sync::Arc;

use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use harmony::adapters::ai::MockGateway;
use harmony::adapters::store::InMemoryStore;
use harmony::application::radar::CALENDAR_HORIZON_DAYS;
use harmony::application::RelationshipRadar;
use harmony::domain::profile::RelationshipCondition;
use harmony::domain::radar::{InsightKind, Severity};
use harmony::domain::UserProfileContext;
use harmony::ports::{
    CalendarEvent, CalendarStore, GatewayError, MessageStore, ProfileStore, StoredMessage,
};

const USER: &str = "user-1";

fn message(content: &str) -> StoredMessage {
    StoredMessage {
        id: Uuid::new_v4(),
        sender_id: USER.to_string(),
        content: content.to_string(),
        sent_at: Utc::now(),
    }
}

fn event(title: &str, in_days: i64) -> CalendarEvent {
    CalendarEvent {
        id: Uuid::new_v4(),
        title: title.to_string(),
        starts_at: Utc::now() + Duration::days(in_days),
        all_day: false,
    }
}

fn tone_payload() -> String {
    json!({
        "title": "Warm but rushed",
        "description": "Most messages are brief logistics.",
        "severity": "medium",
        "actionItem": "Send one unhurried message today."
    })
    .to_string()
}

fn calendar_payload() -> String {
    json!({
        "title": "Packed week ahead",
        "description": "Back-to-back commitments leave little shared time.",
        "severity": "high",
        "actionItem": "Block one evening together."
    })
    .to_string()
}

#[tokio::test]
async fn full_data_produces_three_ordered_insights() {
    // Queue order matches the fan-out poll order: tone, calendar, tip.
    let gateway = MockGateway::new()
        .with_response(tone_payload())
        .with_response(calendar_payload())
        .with_response("Ask one open question before giving advice.");
    let radar = RelationshipRadar::new(Arc::new(gateway));

    let store = InMemoryStore::new();
    store.add_message(USER, message("running late, sorry"));
    store.add_event(USER, event("Project deadline", 2));
    let profile = UserProfileContext {
        relationship_condition: Some(RelationshipCondition::Critical),
        ..Default::default()
    };
    store.set_profile(USER, profile.clone());

    let messages = store.recent_messages(USER, 10).await.unwrap();
    let events = store
        .upcoming_events(USER, CALENDAR_HORIZON_DAYS)
        .await
        .unwrap();
    let loaded_profile = store.profile_context(USER).await.unwrap();

    let insights = radar
        .generate_insights(&loaded_profile, &messages, &events)
        .await;

    assert_eq!(insights.len(), 3);
    assert_eq!(insights[0].kind, InsightKind::MessageTone);
    assert_eq!(insights[1].kind, InsightKind::CalendarStress);
    assert_eq!(insights[2].kind, InsightKind::CommunicationTip);

    assert_eq!(insights[0].title, "Warm but rushed");
    assert_eq!(insights[1].severity, Severity::High);
    // Tip severity tracks the reported condition, not model output.
    assert_eq!(insights[2].severity, Severity::High);
    assert_eq!(
        insights[2].description,
        "Ask one open question before giving advice."
    );
}

#[tokio::test]
async fn one_failed_analysis_never_drops_the_others() {
    let gateway = MockGateway::new()
        .with_error(GatewayError::RateLimited("429".to_string()))
        .with_response(calendar_payload())
        .with_response("Take a walk together tonight.");
    let radar = RelationshipRadar::new(Arc::new(gateway));

    let profile = UserProfileContext {
        relationship_condition: Some(RelationshipCondition::Improving),
        ..Default::default()
    };
    let messages = vec![message("see you at six")];
    let events = vec![event("Dentist appointment", 1)];

    let insights = radar.generate_insights(&profile, &messages, &events).await;

    assert_eq!(insights.len(), 2);
    assert_eq!(insights[0].kind, InsightKind::CalendarStress);
    assert_eq!(insights[1].kind, InsightKind::CommunicationTip);
    assert_eq!(insights[1].severity, Severity::Low);
}

#[tokio::test]
async fn no_data_yields_the_onboarding_insight() {
    let gateway = MockGateway::new();
    let probe = gateway.clone();
    let radar = RelationshipRadar::new(Arc::new(gateway));

    let insights = radar
        .generate_insights(&UserProfileContext::default(), &[], &[])
        .await;

    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].kind, InsightKind::RelationshipHealth);
    assert_eq!(insights[0].severity, Severity::Low);
    assert_eq!(probe.call_count(), 0);
}

#[tokio::test]
async fn total_gateway_failure_still_answers() {
    let gateway = MockGateway::new()
        .with_error(GatewayError::Provider("boom".to_string()))
        .with_error(GatewayError::Provider("boom".to_string()))
        .with_error(GatewayError::Provider("boom".to_string()));
    let radar = RelationshipRadar::new(Arc::new(gateway));

    let profile = UserProfileContext {
        relationship_condition: Some(RelationshipCondition::Stable),
        ..Default::default()
    };
    let messages = vec![message("good morning")];
    let events = vec![event("Team meeting", 3)];

    let insights = radar.generate_insights(&profile, &messages, &events).await;

    assert_eq!(insights.len(), 1);
    assert_eq!(insights[0].kind, InsightKind::RelationshipHealth);
}

#[tokio::test]
async fn insights_serialize_camel_case() {
    let gateway = MockGateway::new();
    let radar = RelationshipRadar::new(Arc::new(gateway));

    let insights = radar
        .generate_insights(&UserProfileContext::default(), &[], &[])
        .await;
    let body = serde_json::to_value(&insights).unwrap();

    assert_eq!(body[0]["kind"], "relationshipHealth");
    assert_eq!(body[0]["severity"], "low");
    assert!(body[0]["title"].is_string());
}
