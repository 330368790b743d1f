//! Store ports - persistence boundaries for the core.
//!
//! The store is an external collaborator: the core only reads recent data and
//! appends coaching messages through these traits. All durable shared state
//! and its concurrency control live behind them.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{CoachingSession, DomainError, SessionMessage, UserProfileContext};

/// A persisted couple message, as read back for tone analysis.
#[derive(Debug, Clone)]
pub struct StoredMessage {
    pub id: Uuid,
    pub sender_id: String,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

/// A shared calendar event, as read for stress analysis.
#[derive(Debug, Clone)]
pub struct CalendarEvent {
    pub id: Uuid,
    pub title: String,
    pub starts_at: DateTime<Utc>,
    pub all_day: bool,
}

/// Read access to the couple's exchanged messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// The most recent messages involving this user, newest first.
    async fn recent_messages(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, DomainError>;
}

/// Read access to the shared calendar.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    /// Events starting within the next `within_days` days, soonest first.
    async fn upcoming_events(
        &self,
        user_id: &str,
        within_days: i64,
    ) -> Result<Vec<CalendarEvent>, DomainError>;
}

/// Read access to the user's profile snapshot.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn profile_context(&self, user_id: &str) -> Result<UserProfileContext, DomainError>;
}

/// Coaching session persistence.
#[async_trait]
pub trait CoachingStore: Send + Sync {
    async fn create_session(&self, session: CoachingSession) -> Result<(), DomainError>;

    async fn find_session(&self, session_id: Uuid) -> Result<Option<CoachingSession>, DomainError>;

    /// Appends a message to a session. History is append-only.
    async fn append_message(&self, message: SessionMessage) -> Result<(), DomainError>;

    /// All messages for a session, oldest first.
    async fn session_messages(&self, session_id: Uuid) -> Result<Vec<SessionMessage>, DomainError>;
}
