//! Coaching conversation types.
//!
//! A coaching session is a persisted, ordered conversation between a user and
//! the coach. The dialogue engine only consumes and produces turns; history is
//! append-only and owned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Coach,
}

/// One turn in a coaching conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub speaker: Speaker,
    pub text: String,
    pub occurred_at: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            occurred_at: Utc::now(),
        }
    }

    pub fn coach(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Coach,
            text: text.into(),
            occurred_at: Utc::now(),
        }
    }
}

/// A persisted coaching session header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachingSession {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

impl CoachingSession {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            title: title.into(),
            created_at: Utc::now(),
        }
    }
}

/// A persisted message inside a coaching session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub content: String,
    pub is_user_message: bool,
    pub created_at: DateTime<Utc>,
}

impl SessionMessage {
    pub fn new(session_id: Uuid, content: impl Into<String>, is_user_message: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            session_id,
            content: content.into(),
            is_user_message,
            created_at: Utc::now(),
        }
    }

    /// The turn view of this message, as consumed by the dialogue engine.
    pub fn as_turn(&self) -> ConversationTurn {
        ConversationTurn {
            speaker: if self.is_user_message {
                Speaker::User
            } else {
                Speaker::Coach
            },
            text: self.content.clone(),
            occurred_at: self.created_at,
        }
    }
}
