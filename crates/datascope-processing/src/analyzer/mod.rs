//! Dataset analysis module.
//!
//! Computes the descriptive statistics for a cleaned dataset: shape,
//! per-column dtypes, numeric summaries, missing-value counts, categorical
//! top values, and the pairwise Pearson correlation matrix.

mod statistics;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::types::{
    AnalysisReport, CategoricalColumnSummary, CorrelationMatrix, NumericColumnSummary, ValueCount,
};
use crate::utils::{DtypeCategory, is_numeric_dtype, series_dtype_category, value_counts_desc};
use polars::prelude::*;
use statistics::{column_f64_values, mean, pearson_pairwise, quantile_sorted, sample_std};
use std::collections::HashMap;
use tracing::debug;

/// Analyzer producing an [`AnalysisReport`] from a cleaned dataset.
pub struct DataAnalyzer;

impl DataAnalyzer {
    /// Compute the full analysis for a dataset.
    ///
    /// All statistics are computed once per call; nothing is cached.
    pub fn analyze(df: &DataFrame, config: &AnalysisConfig) -> Result<AnalysisReport> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut dtypes = HashMap::new();
        let mut missing_values = HashMap::new();
        for col in df.get_columns() {
            let series = col.as_materialized_series();
            dtypes.insert(col.name().to_string(), format!("{:?}", series.dtype()));
            missing_values.insert(col.name().to_string(), series.null_count());
        }

        let numeric_cols: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|col| is_numeric_dtype(col.as_materialized_series().dtype()))
            .map(|col| col.name().to_string())
            .collect();

        let numeric_summary = if numeric_cols.is_empty() {
            None
        } else {
            Some(Self::summarize_numeric_columns(df, &numeric_cols)?)
        };

        let categorical_summary = Self::summarize_categorical_columns(df, config)?;

        let correlations = if numeric_cols.len() > 1 {
            Some(Self::correlation_matrix(df, &numeric_cols)?)
        } else {
            None
        };

        debug!(
            "Analyzed dataset: shape {:?}, {} numeric, {} categorical",
            df.shape(),
            numeric_cols.len(),
            categorical_summary.len()
        );

        Ok(AnalysisReport {
            shape: df.shape(),
            columns,
            dtypes,
            numeric_summary,
            missing_values,
            categorical_summary,
            correlations,
        })
    }

    /// Descriptive statistics for every numeric column, in column order.
    fn summarize_numeric_columns(
        df: &DataFrame,
        numeric_cols: &[String],
    ) -> Result<Vec<NumericColumnSummary>> {
        let mut summaries = Vec::with_capacity(numeric_cols.len());

        for col_name in numeric_cols {
            let series = df
                .column(col_name)
                .map_err(|_| AnalysisError::ColumnNotFound(col_name.clone()))?
                .as_materialized_series();

            let mut values: Vec<f64> = column_f64_values(series)?
                .into_iter()
                .flatten()
                .collect();
            if values.is_empty() {
                continue;
            }
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            summaries.push(NumericColumnSummary {
                column: col_name.clone(),
                count: values.len(),
                mean: mean(&values),
                std: sample_std(&values),
                min: values[0],
                q25: quantile_sorted(&values, 0.25),
                median: quantile_sorted(&values, 0.5),
                q75: quantile_sorted(&values, 0.75),
                max: values[values.len() - 1],
            });
        }

        Ok(summaries)
    }

    /// Top values for every text column with a reasonable number of
    /// categories, in column order.
    fn summarize_categorical_columns(
        df: &DataFrame,
        config: &AnalysisConfig,
    ) -> Result<Vec<CategoricalColumnSummary>> {
        let mut summaries = Vec::new();

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            if series_dtype_category(series) != DtypeCategory::Text {
                continue;
            }

            let unique_count = series.n_unique()?;
            if unique_count > config.categorical_unique_limit {
                continue;
            }

            let top_values: Vec<ValueCount> = value_counts_desc(series)
                .into_iter()
                .take(config.top_value_count)
                .map(|(value, count)| ValueCount { value, count })
                .collect();

            summaries.push(CategoricalColumnSummary {
                column: col.name().to_string(),
                top_values,
            });
        }

        Ok(summaries)
    }

    /// Full pairwise Pearson correlation matrix over the numeric columns.
    fn correlation_matrix(df: &DataFrame, numeric_cols: &[String]) -> Result<CorrelationMatrix> {
        let mut column_values: Vec<Vec<Option<f64>>> = Vec::with_capacity(numeric_cols.len());
        for col_name in numeric_cols {
            let series = df
                .column(col_name)
                .map_err(|_| AnalysisError::ColumnNotFound(col_name.clone()))?
                .as_materialized_series();
            column_values.push(column_f64_values(series)?);
        }

        let n = numeric_cols.len();
        let mut values = vec![vec![0.0; n]; n];
        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = pearson_pairwise(&column_values[i], &column_values[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix {
            columns: numeric_cols.to_vec(),
            values,
        })
    }
}
