//! Relationship radar insight types.
//!
//! Insights are transient: recomputed on every request, never persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::profile::RelationshipCondition;

/// Which sub-analysis produced an insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    MessageTone,
    CalendarStress,
    RelationshipHealth,
    CommunicationTip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Deterministic severity for the communication-tip insight.
    ///
    /// Derived from the reported condition rather than model output so the
    /// displayed urgency never varies with model phrasing.
    pub fn for_condition(condition: RelationshipCondition) -> Self {
        match condition {
            RelationshipCondition::Critical => Severity::High,
            RelationshipCondition::Stable => Severity::Medium,
            RelationshipCondition::Improving => Severity::Low,
        }
    }

    /// Parses a model-supplied severity word, defaulting to `Medium`.
    pub fn parse_or_medium(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("low") => Severity::Low,
            Some("high") => Severity::High,
            _ => Severity::Medium,
        }
    }
}

/// One piece of derived relationship feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarInsight {
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_item: Option<String>,
    pub produced_at: DateTime<Utc>,
}

impl RadarInsight {
    pub fn new(
        kind: InsightKind,
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            severity,
            action_item: None,
            produced_at: Utc::now(),
        }
    }

    pub fn with_action_item(mut self, action: impl Into<String>) -> Self {
        self.action_item = Some(action.into());
        self
    }

    /// The single substitute insight used when no analysis contributed.
    ///
    /// Guarantees the radar list is never empty for brand-new couples or when
    /// every analysis failed.
    pub fn building_profile() -> Self {
        Self::new(
            InsightKind::RelationshipHealth,
            "Building your relationship profile",
            "Keep exchanging messages and planning time together - insights will \
             appear here as we learn more about your relationship.",
            Severity::Low,
        )
    }
}
