//! Relationship Radar - concurrent insight aggregation.
//!
//! Three independent sub-analyses (message tone, calendar stress,
//! condition-aware communication tip) fan out concurrently and join before
//! aggregation. Each one swallows its own gateway or parse failure and
//! contributes nothing; a failure in one never cancels or delays the others.
//! If nothing contributes, a single "building your profile" insight stands in
//! so the result list is never empty.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::profile::UserProfileContext;
use crate::domain::radar::{InsightKind, RadarInsight, Severity};
use crate::ports::{CalendarEvent, CompletionRequest, StoredMessage, TextGenerationGateway};

/// Messages considered by the tone analysis.
const TONE_MESSAGE_WINDOW: usize = 10;

/// Calendar horizon, in days, for the stress analysis.
pub const CALENDAR_HORIZON_DAYS: i64 = 7;

/// Title words that count toward the local stress metric.
const STRESS_KEYWORDS: [&str; 5] = ["meeting", "deadline", "urgent", "appointment", "due"];

/// Structured output expected from the JSON-mode analyses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalysisPayload {
    title: Option<String>,
    description: Option<String>,
    severity: Option<String>,
    action_item: Option<String>,
}

/// Aggregates relationship insights from recent activity.
pub struct RelationshipRadar {
    gateway: Arc<dyn TextGenerationGateway>,
}

impl RelationshipRadar {
    pub fn new(gateway: Arc<dyn TextGenerationGateway>) -> Self {
        Self { gateway }
    }

    /// Runs all three analyses concurrently and assembles the ranked list.
    ///
    /// Fixed ordering: tone, calendar, communication tip. Never empty.
    pub async fn generate_insights(
        &self,
        profile: &UserProfileContext,
        recent_messages: &[StoredMessage],
        upcoming_events: &[CalendarEvent],
    ) -> Vec<RadarInsight> {
        let (tone, calendar, tip) = tokio::join!(
            self.message_tone_insight(recent_messages),
            self.calendar_stress_insight(upcoming_events),
            self.communication_tip_insight(profile),
        );

        let insights: Vec<RadarInsight> = [tone, calendar, tip].into_iter().flatten().collect();

        if insights.is_empty() {
            vec![RadarInsight::building_profile()]
        } else {
            insights
        }
    }

    /// Tone patterns across the most recent messages.
    ///
    /// No messages is an intentional skip, not an error.
    async fn message_tone_insight(&self, messages: &[StoredMessage]) -> Option<RadarInsight> {
        if messages.is_empty() {
            return None;
        }

        let excerpt: Vec<String> = messages
            .iter()
            .take(TONE_MESSAGE_WINDOW)
            .map(|m| format!("- {}", m.content))
            .collect();

        let prompt = format!(
            "These are recent messages exchanged by a couple:\n{}\n\nSummarize the overall tone \
             pattern and suggest one actionable tip. Return a JSON object with keys \"title\", \
             \"description\", \"severity\" (low, medium, or high), and \"actionItem\".",
            excerpt.join("\n")
        );

        let payload = self.analyze_json(prompt, "message tone").await?;
        let mut insight = RadarInsight::new(
            InsightKind::MessageTone,
            payload.title.unwrap_or_else(|| "Message tone check".to_string()),
            payload.description?,
            Severity::parse_or_medium(payload.severity.as_deref()),
        );
        if let Some(action) = payload.action_item {
            insight = insight.with_action_item(action);
        }
        Some(insight)
    }

    /// Stress signals from the upcoming week's calendar.
    ///
    /// Local metrics are computed here; the model only interprets them.
    async fn calendar_stress_insight(&self, events: &[CalendarEvent]) -> Option<RadarInsight> {
        if events.is_empty() {
            return None;
        }

        let events_per_day = events.len() as f32 / CALENDAR_HORIZON_DAYS as f32;
        let all_day_count = events.iter().filter(|e| e.all_day).count();
        let stress_count = events
            .iter()
            .filter(|e| {
                let title = e.title.to_lowercase();
                STRESS_KEYWORDS.iter().any(|kw| title.contains(kw))
            })
            .count();
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();

        let prompt = format!(
            "A couple has {} calendar events in the next {} days ({:.1} per day), {} all-day, \
             {} with stress-signal titles. Event titles: {}.\n\nAssess how stressful this week \
             looks for the relationship and suggest one way to protect time together. Return a \
             JSON object with keys \"title\", \"description\", \"severity\" (low, medium, or \
             high), and \"actionItem\".",
            events.len(),
            CALENDAR_HORIZON_DAYS,
            events_per_day,
            all_day_count,
            stress_count,
            titles.join(", ")
        );

        let payload = self.analyze_json(prompt, "calendar stress").await?;
        let mut insight = RadarInsight::new(
            InsightKind::CalendarStress,
            payload.title.unwrap_or_else(|| "Upcoming week".to_string()),
            payload.description?,
            Severity::parse_or_medium(payload.severity.as_deref()),
        );
        if let Some(action) = payload.action_item {
            insight = insight.with_action_item(action);
        }
        Some(insight)
    }

    /// Condition-aware supportive tip.
    ///
    /// Severity comes from the reported condition, never from the model, so
    /// displayed urgency is stable across model variance.
    async fn communication_tip_insight(
        &self,
        profile: &UserProfileContext,
    ) -> Option<RadarInsight> {
        let condition = profile.relationship_condition?;
        let severity = Severity::for_condition(condition);

        let mut prompt =
            String::from("Offer one supportive, specific communication tip for a couple. ");
        if let Some(fragment) = profile.prompt_fragment() {
            prompt.push_str(&fragment);
        }
        prompt.push_str(" Reply with only the tip, two sentences at most.");

        let request = CompletionRequest::new(prompt)
            .with_temperature(0.7)
            .with_max_tokens(200);

        match self.gateway.complete(request).await {
            Ok(raw) if !raw.trim().is_empty() => Some(RadarInsight::new(
                InsightKind::CommunicationTip,
                "Communication tip",
                raw.trim(),
                severity,
            )),
            Ok(_) => {
                tracing::debug!("communication tip analysis returned empty text");
                None
            }
            Err(err) => {
                tracing::debug!(error = %err, "communication tip analysis skipped");
                None
            }
        }
    }

    /// One JSON-mode gateway call plus parse; any failure becomes `None`.
    async fn analyze_json(&self, prompt: String, analysis: &str) -> Option<AnalysisPayload> {
        let request = CompletionRequest::new(prompt)
            .with_json_mode(true)
            .with_temperature(0.7)
            .with_max_tokens(400);

        let raw = match self.gateway.complete(request).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(analysis, error = %err, "radar analysis skipped");
                return None;
            }
        };

        match serde_json::from_str::<AnalysisPayload>(raw.trim()) {
            Ok(payload) => Some(payload),
            Err(err) => {
                tracing::debug!(analysis, error = %err, "radar analysis output unparseable");
                None
            }
        }
    }
}
