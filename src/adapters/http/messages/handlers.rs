//! HTTP handlers for message refinement.
//!
//! Gateway failures never fail these endpoints: refinement is best-effort and
//! degraded results come back 200 with the original text and an `error`
//! classification. Only local input validation answers 4xx.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::MessageRefiner;
use crate::domain::refinement::RefinementRequest;
use crate::domain::vibe;
use crate::ports::ProfileStore;

use super::dto::{RefineAllRequest, RefineAllResponse, RefineRequest, RefineResponse};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;

/// Shared state for message endpoints.
#[derive(Clone)]
pub struct MessagesAppState {
    pub refiner: Arc<MessageRefiner>,
    pub profile_store: Arc<dyn ProfileStore>,
}

impl MessagesAppState {
    pub fn new(refiner: Arc<MessageRefiner>, profile_store: Arc<dyn ProfileStore>) -> Self {
        Self {
            refiner,
            profile_store,
        }
    }

    /// Builds the refinement request from the body and the caller's profile
    /// snapshot; aliases come from the profile, not the client.
    async fn refinement_request(
        &self,
        user_id: &str,
        original_text: String,
        vibe_id: Option<String>,
    ) -> RefinementRequest {
        let (sender_alias, recipient_alias) =
            match self.profile_store.profile_context(user_id).await {
                Ok(profile) => (profile.self_alias, profile.partner_alias),
                Err(err) => {
                    tracing::warn!(error = %err, "profile lookup failed, refining without aliases");
                    (None, None)
                }
            };
        RefinementRequest {
            original_text,
            vibe_id,
            sender_alias,
            recipient_alias,
        }
    }
}

/// POST /api/messages/refine - rewrite one message in one vibe.
///
/// # Errors
/// - 400: empty message or unknown vibe id
/// - 401: no valid session
pub async fn refine_message(
    State(state): State<MessagesAppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<RefineRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message must not be empty"));
    }
    if vibe::find(&body.vibe).is_none() {
        return Err(ApiError::bad_request(format!("Unknown vibe: {}", body.vibe)));
    }

    let request = state
        .refinement_request(&user.id, body.message, Some(body.vibe))
        .await;
    let result = state
        .refiner
        .refine_one(
            &request.original_text,
            request.vibe_id.as_deref().unwrap_or_default(),
            &request.alias_context(),
        )
        .await;

    Ok((StatusCode::OK, Json(RefineResponse::from(result))))
}

/// POST /api/messages/refine-all-vibes - rewrite one message in every vibe.
///
/// One gateway call regardless of catalog size; the response map always
/// carries every vibe id.
///
/// # Errors
/// - 400: empty message
/// - 401: no valid session
pub async fn refine_all_vibes(
    State(state): State<MessagesAppState>,
    RequireAuth(user): RequireAuth,
    Json(body): Json<RefineAllRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if body.message.trim().is_empty() {
        return Err(ApiError::bad_request("Message must not be empty"));
    }

    let request = state
        .refinement_request(&user.id, body.message, None)
        .await;
    let result = state
        .refiner
        .refine_all(&request.original_text, &request.alias_context())
        .await;

    Ok((StatusCode::OK, Json(RefineAllResponse::from(result))))
}
