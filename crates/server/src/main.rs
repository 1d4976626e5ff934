//! newsdesk server entry point.
//!
//! Boots the HTTP front-end for the news research pipeline.
//! Logs are JSON on stderr.

use anyhow::Result;
use newsdesk_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;
mod state;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;
    let state = state::AppState::from_config(&config)?;
    let app = routes::router(state, &config.allowed_origins);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Starting newsdesk server");

    axum::serve(listener, app).await?;

    Ok(())
}
