//! In-memory store for development and tests.
//!
//! One struct implements every store port behind interior mutability.
//! Suitable for single-process use; a database-backed implementation would
//! slot in behind the same traits.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domain::{CoachingSession, DomainError, SessionMessage, UserProfileContext};
use crate::ports::{
    CalendarEvent, CalendarStore, CoachingStore, MessageStore, ProfileStore, StoredMessage,
};

/// Shared in-memory backing store.
#[derive(Default)]
pub struct InMemoryStore {
    messages: Mutex<Vec<(String, StoredMessage)>>,
    events: Mutex<Vec<(String, CalendarEvent)>>,
    profiles: Mutex<HashMap<String, UserProfileContext>>,
    sessions: Mutex<Vec<CoachingSession>>,
    session_messages: Mutex<Vec<SessionMessage>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a couple message for `user_id`.
    pub fn add_message(&self, user_id: &str, message: StoredMessage) {
        self.messages
            .lock()
            .expect("message store poisoned")
            .push((user_id.to_string(), message));
    }

    /// Seeds a calendar event for `user_id`.
    pub fn add_event(&self, user_id: &str, event: CalendarEvent) {
        self.events
            .lock()
            .expect("event store poisoned")
            .push((user_id.to_string(), event));
    }

    /// Sets the profile snapshot for `user_id`.
    pub fn set_profile(&self, user_id: &str, profile: UserProfileContext) {
        self.profiles
            .lock()
            .expect("profile store poisoned")
            .insert(user_id.to_string(), profile);
    }
}

#[async_trait]
impl MessageStore for InMemoryStore {
    async fn recent_messages(
        &self,
        user_id: &str,
        limit: usize,
    ) -> Result<Vec<StoredMessage>, DomainError> {
        let messages = self.messages.lock().expect("message store poisoned");
        let mut matching: Vec<StoredMessage> = messages
            .iter()
            .filter(|(owner, _)| owner == user_id)
            .map(|(_, m)| m.clone())
            .collect();
        matching.sort_by(|a, b| b.sent_at.cmp(&a.sent_at));
        matching.truncate(limit);
        Ok(matching)
    }
}

#[async_trait]
impl CalendarStore for InMemoryStore {
    async fn upcoming_events(
        &self,
        user_id: &str,
        within_days: i64,
    ) -> Result<Vec<CalendarEvent>, DomainError> {
        let now = Utc::now();
        let horizon = now + Duration::days(within_days);
        let events = self.events.lock().expect("event store poisoned");
        let mut matching: Vec<CalendarEvent> = events
            .iter()
            .filter(|(owner, e)| owner == user_id && e.starts_at >= now && e.starts_at <= horizon)
            .map(|(_, e)| e.clone())
            .collect();
        matching.sort_by(|a, b| a.starts_at.cmp(&b.starts_at));
        Ok(matching)
    }
}

#[async_trait]
impl ProfileStore for InMemoryStore {
    async fn profile_context(&self, user_id: &str) -> Result<UserProfileContext, DomainError> {
        Ok(self
            .profiles
            .lock()
            .expect("profile store poisoned")
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl CoachingStore for InMemoryStore {
    async fn create_session(&self, session: CoachingSession) -> Result<(), DomainError> {
        self.sessions
            .lock()
            .expect("session store poisoned")
            .push(session);
        Ok(())
    }

    async fn find_session(
        &self,
        session_id: Uuid,
    ) -> Result<Option<CoachingSession>, DomainError> {
        Ok(self
            .sessions
            .lock()
            .expect("session store poisoned")
            .iter()
            .find(|s| s.id == session_id)
            .cloned())
    }

    async fn append_message(&self, message: SessionMessage) -> Result<(), DomainError> {
        let sessions = self.sessions.lock().expect("session store poisoned");
        if !sessions.iter().any(|s| s.id == message.session_id) {
            return Err(DomainError::not_found(
                "Coaching session",
                &message.session_id.to_string(),
            ));
        }
        drop(sessions);
        self.session_messages
            .lock()
            .expect("session message store poisoned")
            .push(message);
        Ok(())
    }

    async fn session_messages(
        &self,
        session_id: Uuid,
    ) -> Result<Vec<SessionMessage>, DomainError> {
        let mut matching: Vec<SessionMessage> = self
            .session_messages
            .lock()
            .expect("session message store poisoned")
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(matching)
    }
}
