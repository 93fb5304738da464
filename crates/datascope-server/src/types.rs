//! API response types

use datascope_processing::{AnalysisReport, ChartSpec};
use serde::{Deserialize, Serialize};

/// Successful upload response.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// Always true on a 200 response.
    pub success: bool,
    /// Sanitized name the upload was staged under (without the uuid prefix).
    pub filename: String,
    /// Ordered descriptions of the cleaning changes made.
    pub cleaning_report: Vec<String>,
    /// Full statistical analysis of the cleaned dataset.
    pub analysis: AnalysisReport,
    /// Declarative chart specifications.
    pub visualizations: Vec<ChartSpec>,
    /// Ordered natural-language observations.
    pub interpretations: Vec<String>,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service identifier.
    pub service: String,
}
