//! HTTP adapters - axum routers, handlers, and DTOs.
//!
//! Each feature is split into `dto` / `handlers` / `routes` submodules;
//! [`api_router`] assembles them under `/api` behind the session middleware.

pub mod coaching;
pub mod error;
pub mod messages;
pub mod middleware;
pub mod radar;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use self::coaching::CoachingAppState;
use self::messages::MessagesAppState;
use self::middleware::{auth_middleware, AuthState};
use self::radar::RadarAppState;

/// Liveness payload reported at /api/health.
#[derive(Clone)]
struct HealthState {
    ai_configured: bool,
}

async fn health(State(state): State<HealthState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "aiConfigured": state.ai_configured,
    }))
}

/// Assembles the full /api router.
///
/// `ai_configured` reports whether a provider credential was found at
/// startup; the endpoints work either way, degraded per their fallbacks.
pub fn api_router(
    messages: MessagesAppState,
    coaching: CoachingAppState,
    radar: RadarAppState,
    validator: AuthState,
    ai_configured: bool,
) -> Router {
    let api = Router::new()
        .merge(messages::messages_routes().with_state(messages))
        .merge(coaching::coaching_routes().with_state(coaching))
        .merge(radar::radar_routes().with_state(radar))
        .route(
            "/health",
            get(health).with_state(HealthState { ai_configured }),
        )
        .layer(axum::middleware::from_fn_with_state(
            validator,
            auth_middleware,
        ));

    Router::new().nest("/api", api)
}
