//! Refinement request/result types.
//!
//! A refinement takes one user-authored message and produces either a single
//! tone-adjusted variant or one variant per catalog vibe. Results are always
//! best-effort: when the gateway cannot produce a rewrite the original text
//! stands in, flagged with `used_fallback` and a stable `failure_reason`
//! classification (never the raw provider error).

use std::collections::BTreeMap;

/// One refinement request as received from the HTTP layer.
///
/// Created per call, never persisted; only the resulting message is stored
/// (by the external store, after the user sends it).
#[derive(Debug, Clone, Default)]
pub struct RefinementRequest {
    pub original_text: String,
    /// Target vibe id; `None` means "all vibes at once".
    pub vibe_id: Option<String>,
    pub sender_alias: Option<String>,
    pub recipient_alias: Option<String>,
}

impl RefinementRequest {
    /// The alias context carried by this request.
    pub fn alias_context(&self) -> AliasContext {
        AliasContext {
            sender: self.sender_alias.clone(),
            recipient: self.recipient_alias.clone(),
        }
    }
}

/// Sender/recipient nicknames woven into the rewrite prompt when present.
#[derive(Debug, Clone, Default)]
pub struct AliasContext {
    pub sender: Option<String>,
    pub recipient: Option<String>,
}

impl AliasContext {
    pub fn is_empty(&self) -> bool {
        self.sender.is_none() && self.recipient.is_none()
    }
}

/// Result of refining into a single vibe.
#[derive(Debug, Clone)]
pub struct RefinedMessage {
    pub refined_text: String,
    pub used_fallback: bool,
    pub failure_reason: Option<String>,
}

impl RefinedMessage {
    /// A successful rewrite.
    pub fn refined(text: impl Into<String>) -> Self {
        Self {
            refined_text: text.into(),
            used_fallback: false,
            failure_reason: None,
        }
    }

    /// The original text standing in for a rewrite that could not happen.
    pub fn fallback(original: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            refined_text: original.into(),
            used_fallback: true,
            failure_reason: Some(reason.into()),
        }
    }
}

/// Result of refining into every catalog vibe at once.
///
/// Invariant: `variants` holds exactly one entry per known vibe id - callers
/// never see a partial map. A `BTreeMap` keeps iteration order stable for
/// serialization and tests.
#[derive(Debug, Clone)]
pub struct VibeVariants {
    pub variants: BTreeMap<String, String>,
    pub used_fallback: bool,
    pub failure_reason: Option<String>,
}
