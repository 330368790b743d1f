//! Axum routes for coaching endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    create_message, create_session, generate_response, list_messages, CoachingAppState,
};

/// Routes under /api/coaching.
pub fn coaching_routes() -> Router<CoachingAppState> {
    Router::new()
        .route("/coaching/generate-response", post(generate_response))
        .route("/coaching/sessions", post(create_session))
        .route(
            "/coaching/sessions/:session_id/messages",
            get(list_messages).post(create_message),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coaching_routes_build() {
        let _routes = coaching_routes();
    }
}
