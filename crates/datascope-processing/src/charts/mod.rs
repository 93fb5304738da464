//! Declarative chart specifications.
//!
//! Builds renderer-agnostic chart payloads from the cleaned dataset and its
//! analysis. Column selection is prefix-based (first N in column order),
//! and every `data` payload is self-contained: a client can draw the chart
//! without access to the dataset.

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::types::{AnalysisReport, ChartSpec, ChartType};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use serde_json::json;
use tracing::debug;

/// Builder for chart specifications.
pub struct ChartBuilder;

impl ChartBuilder {
    /// Emit chart specs for a cleaned dataset.
    ///
    /// Order: histograms for the first numeric columns, a correlation
    /// heatmap, bar charts for the first eligible categorical columns, and
    /// one scatter plot for the first two numeric columns.
    pub fn build_charts(
        df: &DataFrame,
        analysis: &AnalysisReport,
        config: &AnalysisConfig,
    ) -> Result<Vec<ChartSpec>> {
        let mut charts = Vec::new();

        let numeric_cols: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.as_materialized_series().dtype()))
            .map(|col| col.name().to_string())
            .collect();

        // 1. Distribution histograms for the first numeric columns
        for col_name in numeric_cols.iter().take(config.histogram_column_limit) {
            charts.push(Self::histogram_spec(df, col_name)?);
        }

        // 2. Correlation heatmap
        if let Some(matrix) = &analysis.correlations {
            charts.push(ChartSpec {
                chart_type: ChartType::Heatmap,
                title: "Correlation Heatmap".to_string(),
                data: json!({
                    "x": matrix.columns,
                    "y": matrix.columns,
                    "values": matrix.values,
                }),
            });
        }

        // 3. Bar charts for the first eligible categorical columns
        for summary in analysis
            .categorical_summary
            .iter()
            .take(config.bar_chart_column_limit)
        {
            let labels: Vec<&str> = summary
                .top_values
                .iter()
                .map(|vc| vc.value.as_str())
                .collect();
            let counts: Vec<usize> = summary.top_values.iter().map(|vc| vc.count).collect();

            charts.push(ChartSpec {
                chart_type: ChartType::Bar,
                title: format!("Top Categories in {}", summary.column),
                data: json!({
                    "x_label": summary.column,
                    "y_label": "Count",
                    "labels": labels,
                    "counts": counts,
                }),
            });
        }

        // 4. Scatter plot for the first two numeric columns
        if numeric_cols.len() >= 2 {
            charts.push(Self::scatter_spec(df, &numeric_cols[0], &numeric_cols[1])?);
        }

        debug!("Built {} chart specs", charts.len());
        Ok(charts)
    }

    fn histogram_spec(df: &DataFrame, col_name: &str) -> Result<ChartSpec> {
        let values = numeric_column_values(df, col_name)?;

        Ok(ChartSpec {
            chart_type: ChartType::Histogram,
            title: format!("Distribution of {}", col_name),
            data: json!({
                "x_label": col_name,
                "y_label": "Frequency",
                "values": values,
            }),
        })
    }

    fn scatter_spec(df: &DataFrame, x_col: &str, y_col: &str) -> Result<ChartSpec> {
        let x = numeric_column_values(df, x_col)?;
        let y = numeric_column_values(df, y_col)?;

        Ok(ChartSpec {
            chart_type: ChartType::Scatter,
            title: format!("{} vs {}", x_col, y_col),
            data: json!({
                "x_label": x_col,
                "y_label": y_col,
                "x": x,
                "y": y,
            }),
        })
    }
}

/// Non-null values of a numeric column as f64, in row order.
fn numeric_column_values(df: &DataFrame, col_name: &str) -> Result<Vec<f64>> {
    let series = df.column(col_name)?.as_materialized_series();
    let casted = series.cast(&DataType::Float64)?;
    let ca = casted.f64()?;
    Ok(ca.into_iter().flatten().collect())
}
