//! Natural-language interpretation of an analysis.
//!
//! Produces sentences in a fixed narrative order: dataset overview,
//! missing values, numeric columns, categorical columns, correlations.

use crate::config::AnalysisConfig;
use crate::types::AnalysisReport;

/// Converts an [`AnalysisReport`] into an ordered list of observations.
pub struct Interpreter;

impl Interpreter {
    /// Generate the interpretation sentences for one analysis.
    pub fn interpret(analysis: &AnalysisReport, config: &AnalysisConfig) -> Vec<String> {
        let mut interpretations = Vec::new();

        // 1. Dataset overview
        interpretations.push(format!(
            "Dataset contains {} rows and {} columns.",
            analysis.shape.0, analysis.shape.1
        ));

        // 2. Missing values
        let total_missing = analysis.total_missing();
        if total_missing > 0 {
            interpretations.push(format!(
                "Found {} missing values across the dataset.",
                total_missing
            ));
        } else {
            interpretations.push("No missing values found in the dataset.".to_string());
        }

        // 3. Numeric columns
        if let Some(numeric_summary) = &analysis.numeric_summary {
            let names: Vec<&str> = numeric_summary.iter().map(|s| s.column.as_str()).collect();
            interpretations.push(format!(
                "Dataset contains {} numeric columns: {}",
                names.len(),
                names.join(", ")
            ));

            for summary in numeric_summary {
                interpretations.push(format!(
                    "Column '{}' has mean {:.2} and standard deviation {:.2}",
                    summary.column, summary.mean, summary.std
                ));
            }
        }

        // 4. Categorical columns
        if !analysis.categorical_summary.is_empty() {
            let names: Vec<&str> = analysis
                .categorical_summary
                .iter()
                .map(|s| s.column.as_str())
                .collect();
            interpretations.push(format!(
                "Dataset contains {} categorical columns: {}",
                names.len(),
                names.join(", ")
            ));

            for summary in &analysis.categorical_summary {
                // Top values are ordered by descending count, so the first
                // entry is the first maximum in iteration order
                if let Some(top) = summary.top_values.first() {
                    interpretations.push(format!(
                        "Most common value in '{}' is '{}' with {} occurrences",
                        summary.column, top.value, top.count
                    ));
                }
            }
        }

        // 5. Correlations
        if let Some(matrix) = &analysis.correlations {
            let mut strong_correlations = Vec::new();
            for i in 0..matrix.columns.len() {
                for j in (i + 1)..matrix.columns.len() {
                    let r = matrix.values[i][j];
                    if r.abs() > config.strong_correlation_threshold {
                        strong_correlations.push(format!(
                            "{} and {} (r={:.2})",
                            matrix.columns[i], matrix.columns[j], r
                        ));
                    }
                }
            }

            if strong_correlations.is_empty() {
                interpretations.push(
                    "No strong correlations (>0.7) found between numeric variables.".to_string(),
                );
            } else {
                interpretations.push(format!(
                    "Strong correlations found between: {}",
                    strong_correlations.join(", ")
                ));
            }
        }

        interpretations
    }
}
