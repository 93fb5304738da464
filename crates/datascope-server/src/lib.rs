//! HTTP server for the tabular data analysis service.
//!
//! Exposes two endpoints:
//! - `POST /upload`: multipart file upload, returns cleaning report,
//!   analysis, chart specs and interpretations in one response
//! - `GET /health`: unconditional health check

mod config;
mod error;
mod handlers;
mod loader;
mod types;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use datascope_processing::AnalysisConfig;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{ALLOWED_EXTENSIONS, StagingConfig, sanitize_filename};
pub use error::ApiError;
pub use handlers::{health_check, upload};
pub use types::{HealthResponse, UploadResponse};

/// Accept uploads up to 64 MiB; axum's default body cap is far too small
/// for real spreadsheets.
const UPLOAD_BODY_LIMIT: usize = 64 * 1024 * 1024;

/// Server state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Where uploads are staged before parsing.
    pub staging: StagingConfig,
    /// Knobs for the cleaning/analysis pipeline.
    pub analysis: AnalysisConfig,
}

impl AppState {
    /// Create state with default staging and analysis configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            staging: StagingConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }

    /// Create state with an explicit staging directory.
    #[must_use]
    pub fn with_staging(staging: StagingConfig) -> Self {
        Self {
            staging,
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the API router with all endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Upload and analyze
        .route("/upload", post(upload))
        // Middleware
        .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the API server.
pub async fn start_server(addr: &str, state: AppState) -> Result<(), std::io::Error> {
    tracing::info!("Starting data analysis server on {}", addr);

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await
}
