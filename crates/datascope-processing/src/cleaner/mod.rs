//! Data cleaning module.
//!
//! This module provides functionality for:
//! - Removing rows that are entirely missing
//! - Removing columns that are entirely missing
//! - Removing exact-duplicate rows
//! - Best-effort type coercion

mod coercion;

pub use coercion::{CoercionOutcome, TypeCoercer};

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Structural cleaning operations on a dataset.
pub struct DataCleaner;

impl DataCleaner {
    /// Remove rows where every column is null.
    pub fn drop_empty_rows(&self, df: DataFrame) -> Result<DataFrame> {
        if df.height() == 0 || df.width() == 0 {
            return Ok(df);
        }

        // Accumulate null counts per row across all columns
        let mut null_counts = Series::new("nulls".into(), vec![0u32; df.height()]);
        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let null_mask = series.is_null();
            if let Ok(null_int) = null_mask.cast(&DataType::UInt32)
                && let Ok(sum) = &null_counts + &null_int
            {
                null_counts = sum;
            }
        }

        let null_counts_f64 = null_counts.cast(&DataType::Float64)?;
        let total_cols = df.width() as f64;
        let null_pct = &null_counts_f64 / total_cols;

        // Keep rows with at least one non-null value
        let mask = null_pct.lt(1.0)?;
        let filtered = df.filter(&mask)?;

        let removed = df.height() - filtered.height();
        if removed > 0 {
            debug!("Removed {} fully-missing rows", removed);
        }

        Ok(filtered)
    }

    /// Remove columns where every row is null.
    pub fn drop_empty_columns(&self, df: DataFrame) -> Result<DataFrame> {
        if df.height() == 0 || df.width() == 0 {
            return Ok(df);
        }

        let empty_cols: Vec<String> = df
            .get_columns()
            .iter()
            .filter(|col| col.null_count() == df.height())
            .map(|col| col.name().to_string())
            .collect();

        if empty_cols.is_empty() {
            return Ok(df);
        }

        debug!("Removing {} fully-missing columns: {:?}", empty_cols.len(), empty_cols);

        let cols_ref: Vec<PlSmallStr> = empty_cols.iter().map(|s| s.as_str().into()).collect();
        Ok(df.drop_many(cols_ref))
    }

    /// Remove rows that are exact duplicates of an earlier row.
    ///
    /// Keeps the first occurrence and preserves the original row order.
    /// Null cells in the same position compare equal, so two rows that are
    /// missing the same fields count as duplicates of each other.
    ///
    /// Returns the deduplicated frame and the number of rows removed.
    pub fn remove_duplicates(&self, df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        let deduped = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = before - deduped.height();

        if removed > 0 {
            debug!("Removed {} duplicate rows", removed);
        }

        Ok((deduped, removed))
    }
}
