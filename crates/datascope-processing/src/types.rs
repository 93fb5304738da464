use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericColumnSummary {
    pub column: String,
    /// Number of non-null values the statistics were computed over.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// A single value/count pair from a categorical summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Top values of one categorical column, ordered by descending count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalColumnSummary {
    pub column: String,
    pub top_values: Vec<ValueCount>,
}

/// Pairwise Pearson correlation matrix over the numeric columns.
///
/// `values[i][j]` is the correlation between `columns[i]` and `columns[j]`.
/// The diagonal is 1.0; a zero-variance column correlates 0.0 with everything.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Look up the correlation of a named column pair, if both exist.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.values[i][j])
    }
}

/// Full analysis output for one cleaned dataset.
///
/// Sections whose iteration order is significant (`numeric_summary`,
/// `categorical_summary`, `correlations`) are ordered sequences in column
/// order; order-insensitive sections are plain maps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// (rows, columns)
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    /// Per-column storage dtype name.
    pub dtypes: HashMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_summary: Option<Vec<NumericColumnSummary>>,
    /// Per-column null count, computed after cleaning.
    pub missing_values: HashMap<String, usize>,
    pub categorical_summary: Vec<CategoricalColumnSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlations: Option<CorrelationMatrix>,
}

impl AnalysisReport {
    /// Total missing values across all columns.
    pub fn total_missing(&self) -> usize {
        self.missing_values.values().sum()
    }
}

/// A declarative description of a single chart.
///
/// `data` is a self-contained JSON value describing axes, mark and values;
/// a rendering client needs nothing else to draw the chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSpec {
    #[serde(rename = "type")]
    pub chart_type: ChartType,
    pub title: String,
    pub data: serde_json::Value,
}

/// Chart kinds emitted by the chart builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartType {
    Histogram,
    Heatmap,
    Bar,
    Scatter,
}

impl ChartType {
    /// Get a human-readable display name for the chart type.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Histogram => "Histogram",
            Self::Heatmap => "Heatmap",
            Self::Bar => "Bar Chart",
            Self::Scatter => "Scatter Plot",
        }
    }
}

/// Result of running the cleaning pipeline over one dataset.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub df: polars::prelude::DataFrame,
    /// Ordered human-readable descriptions of the changes made.
    pub report: Vec<String>,
}
