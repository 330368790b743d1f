//! User profile context shared by the coach and the radar.
//!
//! A read-only snapshot assembled at request time from the store; neither the
//! dialogue engine nor the radar ever mutates it.

use serde::{Deserialize, Serialize};

/// Self-reported state of the relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipCondition {
    Critical,
    Stable,
    Improving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Dating,
    Engaged,
    Married,
    Separated,
}

/// Light per-user context embedded into prompts only when present.
#[derive(Debug, Clone, Default)]
pub struct UserProfileContext {
    pub self_alias: Option<String>,
    pub partner_alias: Option<String>,
    pub relationship_condition: Option<RelationshipCondition>,
    pub marital_status: Option<MaritalStatus>,
}

impl UserProfileContext {
    /// Renders the prompt fragment for whatever context is known.
    ///
    /// Returns `None` when nothing is known, so callers can omit the section
    /// entirely instead of prompting with empty placeholders.
    pub fn prompt_fragment(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(ref name) = self.self_alias {
            parts.push(format!("The user goes by {}.", name));
        }
        if let Some(ref name) = self.partner_alias {
            parts.push(format!("Their partner goes by {}.", name));
        }
        if let Some(status) = self.marital_status {
            let word = match status {
                MaritalStatus::Dating => "dating",
                MaritalStatus::Engaged => "engaged",
                MaritalStatus::Married => "married",
                MaritalStatus::Separated => "separated",
            };
            parts.push(format!("They are {}.", word));
        }
        if let Some(condition) = self.relationship_condition {
            let word = match condition {
                RelationshipCondition::Critical => "going through a difficult period",
                RelationshipCondition::Stable => "stable",
                RelationshipCondition::Improving => "improving",
            };
            parts.push(format!("Their relationship is currently {}.", word));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}
