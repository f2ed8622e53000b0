use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use wordfuel::config::Config;
use wordfuel::gemini::GeminiClient;
use wordfuel::pipeline::{ContentTables, Pipeline};
use wordfuel::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wordfuel=info".parse()?),
        )
        .init();

    info!("Starting WordFuel text service");

    // Load configuration from environment
    let config = Config::from_env()?;
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY not set, every request will be served from sample texts");
    }

    let tables = Arc::new(ContentTables::builtin()?);
    let provider = GeminiClient::new(&config)?;
    let pipeline = Pipeline::new(provider, tables).with_temperature(config.generation_temperature);

    let app = server::router(Arc::new(pipeline));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on http://{}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await
        .context("HTTP server failed")?;

    Ok(())
}
