//! API server: shared state, router assembly and the serve loop.

use crate::accounts::AccountDirectory;
use crate::api::resources::{
    ExperienceViewSet, MessageViewSet, ProfileViewSet, ProjectViewSet, SkillViewSet,
    TechnologyViewSet,
};
use crate::api::viewset::viewset_routes;
use crate::config::Config;
use crate::lifecycle::{PortfolioClients, PortfolioSystem};
use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// State shared by every handler.
pub struct AppState {
    pub config: Config,
    pub accounts: Arc<AccountDirectory>,
    pub clients: PortfolioClients,
}

impl AppState {
    pub fn new(config: Config, accounts: Arc<AccountDirectory>, clients: PortfolioClients) -> Self {
        Self {
            config,
            accounts,
            clients,
        }
    }
}

/// Builds the full router: resources under the API prefix, `/health` outside it.
pub fn router(state: Arc<AppState>) -> Router {
    let mut api = Router::new()
        .merge(viewset_routes::<ProfileViewSet>())
        .merge(viewset_routes::<ProjectViewSet>())
        .merge(viewset_routes::<SkillViewSet>())
        .merge(viewset_routes::<ExperienceViewSet>())
        .merge(viewset_routes::<MessageViewSet>());
    if state.config.expose_technologies {
        api = api.merge(viewset_routes::<TechnologyViewSet>());
    }

    let prefix = state.config.api_prefix.clone();
    let routes = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(&prefix, api)
    };

    let cors = build_cors_layer(&state.config.cors_allowed_origins);
    Router::new()
        .route("/health", get(health))
        .merge(routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

fn build_cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600));

    if allowed_origins.is_empty() {
        return cors;
    }
    if allowed_origins.len() == 1 && allowed_origins[0] == "*" {
        return cors.allow_origin(Any);
    }
    if allowed_origins.iter().any(|origin| origin == "*") {
        tracing::error!(
            origins = ?allowed_origins,
            "Invalid CORS config: '*' must be the only allowed origin"
        );
        return cors;
    }

    let mut allowed = Vec::new();
    for origin in allowed_origins {
        match HeaderValue::from_str(origin) {
            Ok(value) => allowed.push(value),
            Err(_) => tracing::error!(origin = %origin, "Invalid CORS origin"),
        }
    }
    if allowed.is_empty() {
        tracing::warn!("All configured CORS origins were invalid; disabling CORS");
        cors
    } else {
        tracing::info!(origins = ?allowed_origins, "CORS configured");
        cors.allow_origin(AllowOrigin::list(allowed))
    }
}

/// Starts the actors, serves until Ctrl-C, then stops the actors.
///
/// # Errors
///
/// Returns an error if the listener cannot bind, the server fails, or an actor task
/// panicked during shutdown.
pub async fn serve(config: Config) -> Result<()> {
    let accounts = Arc::new(config.account_directory());
    if accounts.is_empty() {
        tracing::warn!("No accounts configured; every write except contact messages will be rejected");
    }

    let system = PortfolioSystem::new(config.actor_buffer, accounts.clone());
    let addr = SocketAddr::new(config.http_host, config.http_port);
    let state = Arc::new(AppState::new(config, accounts, system.clients.clone()));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    tracing::info!(%addr, "Starting portfolio API server");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

    system.shutdown().await.context("actor shutdown failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// Router over a fresh in-memory system, for tests.
///
/// The returned system keeps the actors alive; drop the router before shutting it down.
pub fn test_router(config: Config) -> (Router, PortfolioSystem) {
    let accounts = Arc::new(config.account_directory());
    let system = PortfolioSystem::new(config.actor_buffer, accounts.clone());
    let state = Arc::new(AppState::new(config, accounts, system.clients.clone()));
    (router(state), system)
}
