//! Axum routes for message refinement endpoints.

use axum::routing::post;
use axum::Router;

use super::handlers::{refine_all_vibes, refine_message, MessagesAppState};

/// Routes under /api/messages.
pub fn messages_routes() -> Router<MessagesAppState> {
    Router::new()
        .route("/messages/refine", post(refine_message))
        .route("/messages/refine-all-vibes", post(refine_all_vibes))
}
