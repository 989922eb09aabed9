use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use console_reference_core::app_state::build_app_state;
use console_reference_core::config::AppConfig;
use console_reference_core::core::client::http_reference_client::HttpReferenceClient;
use console_reference_core::domain::reference::reference_store::LoadOptions;
use console_reference_core::logging::init_tracing;
use console_reference_core::routes::app_router;
use console_reference_core::scheduler::spawn_reference_refresh;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(&config.log_dir)?;

    info!("Starting reference service (backend: {})", config.api_base_url);

    let client = Arc::new(HttpReferenceClient::from_config(&config)?);
    let state = build_app_state(config.clone(), client);

    for reference_type in &config.preload {
        if let Err(e) = state.registry.load_with(*reference_type, LoadOptions::lazy()).await {
            error!(%reference_type, "preload failed: {e}");
        }
    }

    let _refresh = spawn_reference_refresh(state.registry.clone(), config.refresh_interval_secs);

    let app = app_router().with_state(state);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}
