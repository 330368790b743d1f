//! Harmony API server entrypoint.
//!
//! Wires configuration, the text-generation gateway, stores, and the axum
//! router, then serves until ctrl-c. Without an API key the process still
//! starts and every AI endpoint answers with its fallback content.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use harmony::adapters::ai::{OpenAiGateway, OpenAiGatewayConfig, UnconfiguredGateway};
use harmony::adapters::auth::MockSessionValidator;
use harmony::adapters::http::api_router;
use harmony::adapters::http::coaching::CoachingAppState;
use harmony::adapters::http::messages::MessagesAppState;
use harmony::adapters::http::middleware::AuthState;
use harmony::adapters::http::radar::RadarAppState;
use harmony::adapters::store::InMemoryStore;
use harmony::application::{CoachDialogueEngine, MessageRefiner, RelationshipRadar};
use harmony::config::AppConfig;
use harmony::ports::TextGenerationGateway;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let gateway = build_gateway(&config);
    let ai_configured = gateway.is_configured();
    if !ai_configured {
        tracing::warn!("no AI credential found; serving fallback content only");
    }

    let store = Arc::new(InMemoryStore::new());
    let validator: AuthState = if config.is_production() {
        Arc::new(MockSessionValidator::new())
    } else {
        // Fixed development session so local clients can authenticate.
        Arc::new(MockSessionValidator::new().with_user("dev-token", "dev-user", "Dev User"))
    };

    let refiner = Arc::new(MessageRefiner::new(gateway.clone()));
    let engine = Arc::new(CoachDialogueEngine::new(gateway.clone()));
    let radar = Arc::new(RelationshipRadar::new(gateway));

    let app = api_router(
        MessagesAppState::new(refiner, store.clone()),
        CoachingAppState::new(engine, store.clone(), store.clone()),
        RadarAppState::new(radar, store.clone(), store.clone(), store),
        validator,
        ai_configured,
    )
    .layer(TraceLayer::new_for_http())
    .layer(TimeoutLayer::new(config.server.request_timeout()))
    .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, environment = ?config.server.environment, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Picks the gateway once at startup; missing credentials select the stub
/// that reports every request as unconfigured.
fn build_gateway(config: &AppConfig) -> Arc<dyn TextGenerationGateway> {
    if config.ai.has_credential() {
        let api_key = config.ai.api_key.clone().unwrap_or_default();
        let gateway_config = OpenAiGatewayConfig::new(api_key)
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(config.ai.timeout());
        tracing::info!(model = %config.ai.model, "AI gateway configured");
        Arc::new(OpenAiGateway::new(gateway_config))
    } else {
        Arc::new(UnconfiguredGateway)
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = config.server.cors_origins_list();
    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parsed))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    tracing::info!("shutdown signal received");
}
