//! FlowGuard server
//!
//! Serves the capture UI and the capture/flows API.

use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use flowguard::config::load_env_filter;
use flowguard::{create_router, AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env, then initialize logging with its RUST_LOG
    tracing_subscriber::registry()
        .with(load_env_filter(None, "flowguard=debug,tower_http=debug"))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    tracing::info!("FlowGuard starting...");
    tracing::info!("Runtime dir: {}", config.runtime_dir.display());
    tracing::info!("Artifacts: {}/{}_*", config.output_dir.display(), config.artifact_prefix);

    std::fs::create_dir_all(&config.runtime_dir)
        .with_context(|| format!("Failed to create {}", config.runtime_dir.display()))?;

    // Artifacts load once, here
    let port = config.port;
    let state = AppState::new(config);
    if state.artifacts.is_none() {
        tracing::warn!("Running without a model: every flow will be labelled UNKNOWN");
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
