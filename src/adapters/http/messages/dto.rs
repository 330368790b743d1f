//! HTTP DTOs for message refinement endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::refinement::{RefinedMessage, VibeVariants};

/// Request body for POST /api/messages/refine.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineRequest {
    pub message: String,
    pub vibe: String,
}

/// Response body for POST /api/messages/refine.
///
/// Always 200; `error` is present only when the fallback was used.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineResponse {
    pub refined_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<RefinedMessage> for RefineResponse {
    fn from(result: RefinedMessage) -> Self {
        Self {
            refined_message: result.refined_text,
            error: result.failure_reason,
        }
    }
}

/// Request body for POST /api/messages/refine-all-vibes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineAllRequest {
    pub message: String,
}

/// Response body for POST /api/messages/refine-all-vibes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefineAllResponse {
    pub refined_messages: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<VibeVariants> for RefineAllResponse {
    fn from(result: VibeVariants) -> Self {
        Self {
            refined_messages: result.variants,
            error: result.failure_reason,
        }
    }
}
