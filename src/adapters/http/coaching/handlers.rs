//! HTTP handlers for coaching endpoints.
//!
//! The generate endpoint is stateless: the client carries the history. The
//! session endpoints persist through the coaching store, and appending a user
//! message also produces and persists the coach's reply before responding,
//! so the session transcript a follow-up read sees is always complete.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::CoachDialogueEngine;
use crate::domain::coaching::{CoachingSession, ConversationTurn, SessionMessage};
use crate::domain::UserProfileContext;
use crate::ports::{CoachingStore, ProfileStore};

use super::dto::{
    CreateMessageRequest, CreateSessionRequest, GenerateRequest, GenerateResponse, MessageView,
    SessionView,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;

/// Shared state for coaching endpoints.
#[derive(Clone)]
pub struct CoachingAppState {
    pub engine: Arc<CoachDialogueEngine>,
    pub coaching_store: Arc<dyn CoachingStore>,
    pub profile_store: Arc<dyn ProfileStore>,
}

impl CoachingAppState {
    pub fn new(
        engine: Arc<CoachDialogueEngine>,
        coaching_store: Arc<dyn CoachingStore>,
        profile_store: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            engine,
            coaching_store,
            profile_store,
        }
    }

    async fn profile_for(&self, user_id: &str) -> UserProfileContext {
        match self.profile_store.profile_context(user_id).await {
            Ok(profile) => profile,
            Err(err) => {
                tracing::warn!(error = %err, "profile lookup failed, coaching without context");
                UserProfileContext::default()
            }
        }
    }
}

/// POST /api/coaching/generate-response - one coach reply, no persistence.
///
/// Always 200 with a usable reply; `error` carries "not configured" when the
/// process has no provider credential and the fixed fallback was used.
///
/// # Errors
/// - 400: empty message
/// - 401: no valid session
pub async fn generate_response(
    State(state): State<CoachingAppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<GenerateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message must not be empty"));
    }

    if !body.ai_mode {
        let message = state.engine.rule_based_reply(&body.message);
        return Ok((StatusCode::OK, Json(GenerateResponse { message, error: None })));
    }

    let history: Vec<ConversationTurn> = body
        .conversation_history
        .into_iter()
        .map(|entry| entry.into_turn())
        .collect();
    let profile = state.profile_for(&user.id).await;

    let error = (!state.engine.is_gateway_configured()).then(|| "not configured".to_string());
    let message = state
        .engine
        .next_utterance(&body.message, &history, &profile)
        .await;

    Ok((StatusCode::OK, Json(GenerateResponse { message, error })))
}

/// POST /api/coaching/sessions - start a coaching session.
pub async fn create_session(
    State(state): State<CoachingAppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let title = body
        .title
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Coaching session".to_string());
    let session = CoachingSession::new(&user.id, title);
    let view = SessionView::from(&session);

    state.coaching_store.create_session(session).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// GET /api/coaching/sessions/{id}/messages - full session transcript.
///
/// # Errors
/// - 400: malformed session id
/// - 403: session belongs to someone else
/// - 404: unknown session
pub async fn list_messages(
    State(state): State<CoachingAppState>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = parse_session_id(&session_id)?;
    let _session = owned_session(&state, &user.id, session_id).await?;

    let messages = state.coaching_store.session_messages(session_id).await?;
    let views: Vec<MessageView> = messages.iter().map(MessageView::from).collect();
    Ok((StatusCode::OK, Json(views)))
}

/// POST /api/coaching/sessions/{id}/messages - append a message.
///
/// Appending a user message also generates and persists the coach's reply as
/// a second message in the same session; the created user message is what
/// comes back.
///
/// # Errors
/// - 400: malformed id or empty content
/// - 403: session belongs to someone else
/// - 404: unknown session
pub async fn create_message(
    State(state): State<CoachingAppState>,
    RequireAuth(user): RequireAuth,
    Path(session_id): Path<String>,
    Json(body): Json<CreateMessageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.content.trim().is_empty() {
        return Err(ApiError::bad_request("Message content must not be empty"));
    }
    let session_id = parse_session_id(&session_id)?;
    let _session = owned_session(&state, &user.id, session_id).await?;

    // History is read before the append so the new message is the "latest"
    // input rather than duplicated inside the transcript.
    let history: Vec<ConversationTurn> = state
        .coaching_store
        .session_messages(session_id)
        .await?
        .iter()
        .map(|m| m.as_turn())
        .collect();

    let message = SessionMessage::new(session_id, body.content.clone(), body.is_user_message);
    let view = MessageView::from(&message);
    state.coaching_store.append_message(message).await?;

    if body.is_user_message {
        let profile = state.profile_for(&user.id).await;
        let reply = state
            .engine
            .next_utterance(&body.content, &history, &profile)
            .await;
        state
            .coaching_store
            .append_message(SessionMessage::new(session_id, reply, false))
            .await?;
    }

    Ok((StatusCode::CREATED, Json(view)))
}

fn parse_session_id(raw: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid session ID format"))
}

async fn owned_session(
    state: &CoachingAppState,
    user_id: &str,
    session_id: Uuid,
) -> Result<CoachingSession, ApiError> {
    let session = state
        .coaching_store
        .find_session(session_id)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound("Coaching session".to_string(), session_id.to_string())
        })?;
    if session.user_id != user_id {
        return Err(ApiError::Forbidden(
            "Session belongs to another user".to_string(),
        ));
    }
    Ok(session)
}
