//! HTTP server implementation using Axum.

use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use healthagent_core::config::HealthAgentConfig;
use healthagent_knowledge::KnowledgeBase;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use super::db::GatewayDb;

/// Local frontend dev servers, always allowed alongside the configured origin.
pub const DEV_ORIGINS: &[&str] = &["http://localhost:5173", "http://127.0.0.1:5173"];

/// Shared state for the gateway server.
pub struct AppState {
    pub config: HealthAgentConfig,
    pub db: Arc<GatewayDb>,
    /// Read-only corpus, built before the server starts.
    pub knowledge: Arc<KnowledgeBase>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: HealthAgentConfig, db: GatewayDb, knowledge: KnowledgeBase) -> Self {
        Self {
            config,
            db: Arc::new(db),
            knowledge: Arc::new(knowledge),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Configured origin plus the dev origins, deduplicated, in that order.
pub fn allowed_origins(configured: &str) -> Vec<HeaderValue> {
    let mut origins: Vec<HeaderValue> = Vec::new();
    for origin in std::iter::once(configured).chain(DEV_ORIGINS.iter().copied()) {
        let origin = origin.trim();
        if origin.is_empty() {
            continue;
        }
        match origin.parse::<HeaderValue>() {
            Ok(v) if !origins.contains(&v) => origins.push(v),
            Ok(_) => {}
            Err(_) => tracing::warn!("Ignoring invalid CORS origin {origin:?}"),
        }
    }
    origins
}

fn cors_layer(config: &HealthAgentConfig) -> CorsLayer {
    // Wildcards are rejected alongside credentials, so mirror the preflight.
    CorsLayer::new()
        .allow_origin(allowed_origins(&config.server.allowed_origin))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}

/// Build the Axum router with all routes.
pub fn build_router(state: AppState) -> Router {
    build_router_from_arc(Arc::new(state))
}

pub fn build_router_from_arc(shared: Arc<AppState>) -> Router {
    let cors = cors_layer(&shared.config);

    Router::new()
        .route("/", get(super::routes::root))
        .route("/health", get(super::routes::health_check))
        // Quiz sessions
        .route("/session/start", post(super::routes::start_session))
        .route("/session/end", post(super::routes::end_session))
        .route("/session/{session_id}/answers", get(super::routes::list_answers))
        .route("/answer", post(super::routes::post_answer))
        // Chat + knowledge
        .route("/chat", post(super::routes::chat))
        .route("/knowledge/search", post(super::routes::knowledge_search))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

/// Open the session store, load the corpus and serve until shutdown.
pub async fn start(config: HealthAgentConfig) -> anyhow::Result<()> {
    let db = GatewayDb::open_with_fallback(&config.database)?;

    let knowledge = KnowledgeBase::from_config(&config.knowledge)?;
    tracing::info!("Knowledge base: {} documents", knowledge.len());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, db, knowledge);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HealthAgent API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}
