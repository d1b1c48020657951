//! FlowGuard
//!
//! Captures traffic, extracts flow features and classifies the flows with a
//! pre-trained model, then serves the latest predictions to a web UI.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        FLOWGUARD                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  POST /api/start_capture                                    │
//! │        │                                                    │
//! │        ▼                                                    │
//! │  ┌───────────┐   ┌──────────────┐   ┌────────────────────┐ │
//! │  │  capture  │──▶│   extract    │──▶│     classify       │ │
//! │  │ (tcpdump) │   │(cicflowmeter)│   │ scaler → gb model  │ │
//! │  └───────────┘   └──────────────┘   └─────────┬──────────┘ │
//! │                                               ▼            │
//! │                                      last flows (state)    │
//! │                                               │            │
//! │  GET /api/flows ◀─────────────────────────────┘            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod flows;
pub mod handlers;
pub mod model;
pub mod models;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use parking_lot::RwLock;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
};

pub use config::Config;
pub use error::{AppError, AppResult};

use flows::FlowRecord;
use model::{ArtifactBundle, ArtifactStatus};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when the artifacts failed to load
    pub artifacts: Option<Arc<ArtifactBundle>>,
    pub artifact_status: Arc<ArtifactStatus>,
    /// Result of the most recent cycle, replaced wholesale
    pub last_flows: Arc<RwLock<Vec<FlowRecord>>>,
    /// Serializes pipeline cycles
    pub run_lock: Arc<tokio::sync::Mutex<()>>,
}

impl AppState {
    /// Load artifacts for `config` and start with an empty result
    pub fn new(config: Config) -> Self {
        let (artifacts, status) = model::artifacts::load_or_degrade(&config.artifact_paths());
        Self {
            config: Arc::new(config),
            artifacts,
            artifact_status: Arc::new(status),
            last_flows: Arc::new(RwLock::new(Vec::new())),
            run_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir();

    // Single-page UI
    let ui_routes = Router::new()
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(&static_dir));

    let api_routes = Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/start_capture", post(handlers::capture::start_capture))
        .route("/api/flows", get(handlers::flows::list))
        .route("/api/model", get(handlers::model::status));

    Router::new()
        .merge(ui_routes)
        .merge(api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
