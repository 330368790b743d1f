//! HTTP handler for the relationship radar.
//!
//! Insights are computed fresh per call - nothing is cached server-side
//! beyond the request.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::radar::CALENDAR_HORIZON_DAYS;
use crate::application::RelationshipRadar;
use crate::ports::{CalendarStore, MessageStore, ProfileStore};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::RequireAuth;

/// Messages fetched for the tone analysis.
const RECENT_MESSAGE_LIMIT: usize = 10;

/// Shared state for the radar endpoint.
#[derive(Clone)]
pub struct RadarAppState {
    pub radar: Arc<RelationshipRadar>,
    pub message_store: Arc<dyn MessageStore>,
    pub calendar_store: Arc<dyn CalendarStore>,
    pub profile_store: Arc<dyn ProfileStore>,
}

impl RadarAppState {
    pub fn new(
        radar: Arc<RelationshipRadar>,
        message_store: Arc<dyn MessageStore>,
        calendar_store: Arc<dyn CalendarStore>,
        profile_store: Arc<dyn ProfileStore>,
    ) -> Self {
        Self {
            radar,
            message_store,
            calendar_store,
            profile_store,
        }
    }
}

/// GET /api/relationship-radar - the current insight list.
///
/// Never empty: with no data or total AI failure a single onboarding insight
/// comes back.
///
/// # Errors
/// - 401: no valid session
/// - 500: store failure
pub async fn get_insights(
    State(state): State<RadarAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let (profile, messages, events) = tokio::try_join!(
        state.profile_store.profile_context(&user.id),
        state.message_store.recent_messages(&user.id, RECENT_MESSAGE_LIMIT),
        state.calendar_store.upcoming_events(&user.id, CALENDAR_HORIZON_DAYS),
    )?;

    let insights = state.radar.generate_insights(&profile, &messages, &events).await;
    Ok((StatusCode::OK, Json(insights)))
}
