mod config;
mod document;
mod errors;
mod generation;
mod llm_client;
mod models;
mod routes;
mod state;
mod storage;
mod templates;

use anyhow::Result;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::OllamaClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting docsmith v{}", env!("CARGO_PKG_VERSION"));

    storage::ensure_output_dir(&config.output_dir).await?;
    info!("Writing documents to {}", config.output_dir.display());

    let generator = OllamaClient::new(&config.ollama_url, &config.ollama_model)?;
    info!(
        "Ollama client initialized (url: {}, model: {})",
        config.ollama_url, config.ollama_model
    );

    let state = AppState {
        generator: Arc::new(generator),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // HOST may be a name such as "localhost", so let tokio resolve it.
    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
