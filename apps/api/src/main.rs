mod analysis;
mod ats;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::{CvAnalyst, DisabledAnalyst, GeminiAnalyst};
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Checker API v{}", env!("CARGO_PKG_VERSION"));

    let analyst = build_analyst(&config)?;

    info!(
        "Upload limit: {} bytes (pdf, doc, docx)",
        config.max_upload_bytes
    );

    let state = AppState {
        config: config.clone(),
        analyst,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Picks the AI backend: Gemini when a key is configured, disabled otherwise.
fn build_analyst(config: &Config) -> Result<Arc<dyn CvAnalyst>> {
    match &config.gemini_api_key {
        Some(key) => {
            let client = GeminiClient::new(key.clone(), config.gemini_model.clone())?;
            info!("Gemini client initialized (model: {})", client.model());
            Ok(Arc::new(GeminiAnalyst(client)))
        }
        None => {
            warn!("GEMINI_API_KEY not set; AI analysis disabled, ATS scoring only");
            Ok(Arc::new(DisabledAnalyst))
        }
    }
}
