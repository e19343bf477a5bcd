mod analysis;
mod config;
mod errors;
mod layout;
mod llm_client;
mod models;
mod render;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{GeminiBackend, TokioPacer};
use crate::config::Config;
use crate::layout::PageSize;
use crate::llm_client::GeminiClient;
use crate::render::ChromeRasterizer;
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting eFP Report API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize Gemini client
    let client = GeminiClient::new(config.gemini_api_key.clone(), &config.gemini_base_url)?;
    info!(
        "Gemini client initialized (text: {}, image: {})",
        llm_client::TEXT_MODEL,
        llm_client::IMAGE_MODEL
    );

    info!(
        "Remote calls paced at {}ms; exporting to A4 as {}",
        config.call_interval.as_millis(),
        render::artifact_file_name(&config.report_basename)
    );

    let state = AppState {
        session: SessionStore::new(),
        backend: Arc::new(GeminiBackend::new(client)),
        pacer: Arc::new(TokioPacer::new(config.call_interval)),
        rasterizer: Arc::new(ChromeRasterizer::new(config.chrome_executable.clone())),
        page: PageSize::A4_MM,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
