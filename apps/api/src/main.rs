mod analysis;
mod builder;
mod catalog;
mod config;
mod errors;
mod llm_client;
mod resources;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resources::youtube::{DisabledVideoSearch, VideoSearch, YouTubeClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails fast without an LLM key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillSync API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(&config)?;
    info!(
        "LLM client initialized (model: {}, base: {})",
        llm.model(),
        config.llm_base_url
    );

    // Initialize video search (disabled without a YouTube key)
    let videos: Arc<dyn VideoSearch> = match &config.youtube_api_key {
        Some(key) => {
            info!("YouTube search enabled");
            Arc::new(YouTubeClient::new(key.clone(), &config.youtube_api_base)?)
        }
        None => {
            warn!("YOUTUBE_API_KEY not set; video lookups disabled, learning resources will use the LLM");
            Arc::new(DisabledVideoSearch)
        }
    };

    let state = AppState { llm, videos };

    // Build router
    let app = build_router(state, config.max_upload_bytes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
