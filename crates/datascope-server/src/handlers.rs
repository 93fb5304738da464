//! HTTP request handlers.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use std::path::Path;
use tracing::{info, warn};

use crate::AppState;
use crate::config::{StagingConfig, sanitize_filename};
use crate::error::ApiError;
use crate::loader::read_dataset;
use crate::types::{HealthResponse, UploadResponse};
use datascope_processing::{
    AnalysisConfig, AnalysisReport, ChartBuilder, ChartSpec, CleaningPipeline, DataAnalyzer,
    Interpreter,
};

/// Health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "data-analysis".to_string(),
    })
}

/// Handle a tabular file upload: stage, parse, clean, analyze, interpret.
///
/// Validation happens before any disk write, so a rejected upload leaves
/// nothing behind in the staging directory.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    // Pull the `file` field out of the multipart body
    let mut file_part: Option<(String, axum::body::Bytes)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
            file_part = Some((filename, bytes));
            break;
        }
    }

    let (filename, bytes) = file_part.ok_or(ApiError::MissingFile)?;
    if filename.is_empty() {
        return Err(ApiError::EmptyFilename);
    }
    if !StagingConfig::allowed_file(&filename) {
        return Err(ApiError::UnsupportedExtension);
    }

    // The extension exists: allowed_file just accepted it
    let extension = StagingConfig::extension(&filename).unwrap_or_default();

    info!("Upload accepted: '{}' ({} bytes)", filename, bytes.len());

    // Stage the upload under a collision-safe name
    tokio::fs::create_dir_all(&state.staging.staging_dir)
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
    let staged = state.staging.staged_path(&filename);
    tokio::fs::write(&staged, &bytes)
        .await
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;

    // The pipeline is CPU-bound and synchronous; run it on the blocking pool
    let analysis_config = state.analysis.clone();
    let staged_for_task = staged.clone();
    let processed = tokio::task::spawn_blocking(move || {
        process_dataset(&staged_for_task, &extension, &analysis_config)
    })
    .await
    .map_err(|e| ApiError::Internal(anyhow::anyhow!("processing task panicked: {}", e)))??;

    // Clean up the staged copy; a parse failure above intentionally leaves
    // it behind, matching the request lifecycle contract
    if let Err(e) = tokio::fs::remove_file(&staged).await {
        warn!("Failed to remove staged file {:?}: {}", staged, e);
    }

    info!(
        "Upload processed: '{}' -> shape {:?}, {} charts",
        filename,
        processed.analysis.shape,
        processed.visualizations.len()
    );

    Ok(Json(UploadResponse {
        success: true,
        filename: sanitize_filename(&filename),
        cleaning_report: processed.cleaning_report,
        analysis: processed.analysis,
        visualizations: processed.visualizations,
        interpretations: processed.interpretations,
    }))
}

/// Output of one synchronous processing run.
struct ProcessedUpload {
    cleaning_report: Vec<String>,
    analysis: AnalysisReport,
    visualizations: Vec<ChartSpec>,
    interpretations: Vec<String>,
}

/// Run the full pipeline over one staged file.
fn process_dataset(
    path: &Path,
    extension: &str,
    config: &AnalysisConfig,
) -> Result<ProcessedUpload, ApiError> {
    let df = read_dataset(path, extension).map_err(|e| ApiError::UnreadableFile(e.to_string()))?;

    let outcome = CleaningPipeline::new(config.clone())
        .clean(df)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
    let analysis = DataAnalyzer::analyze(&outcome.df, config)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
    let visualizations = ChartBuilder::build_charts(&outcome.df, &analysis, config)
        .map_err(|e| ApiError::Internal(anyhow::Error::new(e)))?;
    let interpretations = Interpreter::interpret(&analysis, config);

    Ok(ProcessedUpload {
        cleaning_report: outcome.report,
        analysis,
        visualizations,
        interpretations,
    })
}
