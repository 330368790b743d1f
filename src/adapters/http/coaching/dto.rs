//! HTTP DTOs for coaching endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::coaching::{CoachingSession, ConversationTurn, SessionMessage};

/// One client-supplied history entry for the stateless generate endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub content: String,
    pub is_user_message: bool,
}

impl HistoryEntry {
    pub fn into_turn(self) -> ConversationTurn {
        if self.is_user_message {
            ConversationTurn::user(self.content)
        } else {
            ConversationTurn::coach(self.content)
        }
    }
}

/// Request body for POST /api/coaching/generate-response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_history: Vec<HistoryEntry>,
    /// `false` selects the rule-based responder (the no-AI coaching mode).
    #[serde(default = "default_ai_mode")]
    pub ai_mode: bool,
}

fn default_ai_mode() -> bool {
    true
}

/// Response body for POST /api/coaching/generate-response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request body for POST /api/coaching/sessions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub title: Option<String>,
}

/// View of a coaching session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub title: String,
    pub created_at: String,
}

impl From<&CoachingSession> for SessionView {
    fn from(session: &CoachingSession) -> Self {
        Self {
            id: session.id.to_string(),
            title: session.title.clone(),
            created_at: session.created_at.to_rfc3339(),
        }
    }
}

/// Request body for POST /api/coaching/sessions/{id}/messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    pub content: String,
    pub is_user_message: bool,
}

/// View of a persisted session message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub id: String,
    pub session_id: String,
    pub content: String,
    pub is_user_message: bool,
    pub created_at: String,
}

impl From<&SessionMessage> for MessageView {
    fn from(message: &SessionMessage) -> Self {
        Self {
            id: message.id.to_string(),
            session_id: message.session_id.to_string(),
            content: message.content.clone(),
            is_user_message: message.is_user_message,
            created_at: message.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::coaching::Speaker;

    #[test]
    fn generate_request_defaults() {
        let request: GenerateRequest = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert!(request.conversation_history.is_empty());
        assert!(request.ai_mode);
    }

    #[test]
    fn generate_request_with_history() {
        let request: GenerateRequest = serde_json::from_str(
            r#"{"message":"hi","conversationHistory":[{"content":"a","isUserMessage":true}],"aiMode":false}"#,
        )
        .unwrap();
        assert_eq!(request.conversation_history.len(), 1);
        assert!(!request.ai_mode);
    }

    #[test]
    fn history_entry_maps_speaker() {
        let entry = HistoryEntry {
            content: "hello".to_string(),
            is_user_message: false,
        };
        assert_eq!(entry.into_turn().speaker, Speaker::Coach);
    }
}
