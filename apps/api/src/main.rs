mod config;
mod errors;
mod llm_client;
mod models;
mod pipeline;
mod routes;
mod screening;
mod search;
mod sources;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first; a malformed PORT or fetch limit stops startup
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Scout API v{}", env!("CARGO_PKG_VERSION"));

    if config.adzuna_app_id.is_none() || config.adzuna_app_key.is_none() {
        warn!("No default Adzuna credentials configured; requests must supply their own");
    }
    if config.openai_api_key.is_none() {
        warn!("No default OpenAI key configured; LLM checks need a per-request key");
    }
    info!(
        "Search provider: {} ({}), LLM model: {}, fetch limit: {}",
        config.adzuna_base_url, config.adzuna_country, config.openai_model, config.fetch_limit
    );

    // Shared HTTP pool for Adzuna and OpenAI; per-call timeouts are set by each client
    let http = reqwest::Client::builder()
        .build()
        .context("Failed to build HTTP client")?;

    let state = AppState {
        http,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        // TODO: restrict CORS origins once the display layer has a fixed host
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
