//! simple-dex server entry point.
//!
//! Deploys the pool from environment configuration and starts the Axum
//! HTTP server with REST and WebSocket endpoints.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use simple_dex::api;
use simple_dex::app_state::AppState;
use simple_dex::config::DexConfig;
use simple_dex::domain::EventBus;
use simple_dex::service::DexService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let config = DexConfig::from_env()?;
    tracing::info!(addr = %config.listen_addr, "starting simple-dex");

    let event_bus = EventBus::new(config.event_bus_capacity);
    let dex_service =
        DexService::from_config(&config, event_bus).context("failed to deploy pool")?;
    let app = api::build_app(AppState::new(dex_service), config.request_timeout);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
