//! Cleaning pipeline.
//!
//! Orchestrates the cleaning stages in a fixed order and accumulates a
//! human-readable report of the changes made:
//!
//! 1. drop rows that are entirely missing
//! 2. drop columns that are entirely missing
//! 3. impute remaining missing values
//! 4. remove duplicate rows
//! 5. coerce column types
//!
//! A stage contributes a report entry only when it changed something, and
//! no stage may fail the pipeline as a whole.

use crate::cleaner::{DataCleaner, TypeCoercer};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::imputers::StatisticalImputer;
use crate::types::CleaningOutcome;
use crate::utils::total_null_count;
use polars::prelude::*;
use tracing::{debug, info};

/// The cleaning pipeline.
pub struct CleaningPipeline {
    config: AnalysisConfig,
    cleaner: DataCleaner,
    coercer: TypeCoercer,
}

impl CleaningPipeline {
    /// Create a pipeline with the given configuration.
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            cleaner: DataCleaner,
            coercer: TypeCoercer,
        }
    }

    /// Clean a dataset, returning the cleaned frame and the report.
    pub fn clean(&self, df: DataFrame) -> Result<CleaningOutcome> {
        info!("Starting cleaning pipeline on shape {:?}", df.shape());
        let mut report = Vec::new();

        // 1 + 2. Remove completely empty rows and columns
        let initial_shape = df.shape();
        let df = self.cleaner.drop_empty_rows(df)?;
        let mut df = self.cleaner.drop_empty_columns(df)?;
        if df.shape() != initial_shape {
            report.push(format!(
                "Removed empty rows/columns. Shape changed from {:?} to {:?}",
                initial_shape,
                df.shape()
            ));
        }

        // 3. Impute missing values
        let missing_before = total_null_count(&df);
        if missing_before > 0 {
            let (_, fill_steps) =
                StatisticalImputer::impute_missing(&mut df, &self.config.categorical_fill_value)
                    .map_err(|e| AnalysisError::CleaningFailed(e.to_string()))?;
            for step in &fill_steps {
                debug!("  {}", step);
            }
            let missing_after = total_null_count(&df);
            report.push(format!(
                "Filled {} missing values",
                missing_before - missing_after
            ));
        }

        // 4. Remove duplicate rows
        let (df, duplicates_removed) = self.cleaner.remove_duplicates(df)?;
        if duplicates_removed > 0 {
            report.push(format!("Removed {} duplicate rows", duplicates_removed));
        }

        // 5. Coerce column types
        let (df, coercion_steps) = self.coercer.coerce_columns(df)?;
        report.extend(coercion_steps);

        info!(
            "Cleaning pipeline finished: shape {:?}, {} report entries",
            df.shape(),
            report.len()
        );

        Ok(CleaningOutcome { df, report })
    }
}

impl Default for CleaningPipeline {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}
