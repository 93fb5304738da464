//! Best-effort type coercion for text columns.
//!
//! Each string column is tried as numeric first, then as temporal; if
//! neither succeeds the column stays text. The decision is returned as an
//! explicit [`CoercionOutcome`] per column and a failed attempt never
//! raises, so one stubborn column cannot block the rest of the dataset.

use crate::error::Result;
use crate::utils::parse_numeric_string;
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use tracing::{debug, warn};

// Date pattern regexes - compiled once at startup
static DATE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").expect("Invalid regex: YYYY-MM-DD"),
        Regex::new(r"^\d{1,2}[-/]\d{1,2}[-/]\d{4}$").expect("Invalid regex: MM-DD-YYYY"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}\s\d{2}:\d{2}:\d{2}").expect("Invalid regex: datetime"),
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}").expect("Invalid regex: ISO"),
    ]
});

/// Datetime string formats tried in order.
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Date-only string formats tried in order.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Per-column result of a coercion attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionOutcome {
    /// Every non-null value parsed as a number; column is now Float64.
    Numeric,
    /// Every non-null value parsed as a date/datetime; column is now
    /// millisecond Datetime.
    Temporal,
    /// Column was left as text.
    Text,
}

/// Type coercer for converting text columns to their natural types.
pub struct TypeCoercer;

impl TypeCoercer {
    /// Attempt coercion of every string column in the frame.
    ///
    /// Returns the (possibly modified) frame and one step description per
    /// column that was actually converted.
    pub fn coerce_columns(&self, df: DataFrame) -> Result<(DataFrame, Vec<String>)> {
        let mut df = df;
        let mut steps = Vec::new();

        let col_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for col_name in &col_names {
            match self.coerce_single_column(&mut df, col_name) {
                Ok(CoercionOutcome::Numeric) => {
                    debug!("Converted '{}' to numeric", col_name);
                    steps.push(format!("Converted '{}' to numeric", col_name));
                }
                Ok(CoercionOutcome::Temporal) => {
                    debug!("Converted '{}' to datetime", col_name);
                    steps.push(format!("Converted '{}' to datetime", col_name));
                }
                Ok(CoercionOutcome::Text) => {}
                Err(e) => {
                    // A stubborn column never blocks the others
                    warn!("Coercion attempt failed for '{}': {}", col_name, e);
                }
            }
        }

        Ok((df, steps))
    }

    /// Attempt coercion of one column, replacing it in place on success.
    pub fn coerce_single_column(
        &self,
        df: &mut DataFrame,
        col_name: &str,
    ) -> Result<CoercionOutcome> {
        let col = df.column(col_name)?;
        let series = col.as_materialized_series().clone();

        if series.dtype() != &DataType::String {
            return Ok(CoercionOutcome::Text);
        }
        if series.drop_nulls().is_empty() {
            return Ok(CoercionOutcome::Text);
        }

        if let Some(numeric) = string_to_numeric(&series)? {
            df.replace(col_name, numeric)?;
            return Ok(CoercionOutcome::Numeric);
        }

        if let Some(temporal) = string_to_datetime(&series)? {
            df.replace(col_name, temporal)?;
            return Ok(CoercionOutcome::Temporal);
        }

        Ok(CoercionOutcome::Text)
    }
}

/// Convert a string series to Float64 if every non-null value parses.
///
/// Tolerates surrounding whitespace, thousands separators, currency symbols
/// and percent signs. Returns `None` as soon as one value fails.
pub(crate) fn string_to_numeric(series: &Series) -> Result<Option<Series>> {
    let str_series = series.str()?;
    let mut result_vec: Vec<Option<f64>> = Vec::with_capacity(str_series.len());

    for opt_val in str_series.into_iter() {
        match opt_val {
            Some(val) => match parse_numeric_string(val) {
                Some(parsed) => result_vec.push(Some(parsed)),
                None => return Ok(None),
            },
            None => result_vec.push(None),
        }
    }

    Ok(Some(Series::new(series.name().clone(), result_vec)))
}

/// Convert a string series to a millisecond Datetime if every non-null
/// value parses as a date or datetime. Returns `None` on the first failure.
pub(crate) fn string_to_datetime(series: &Series) -> Result<Option<Series>> {
    let str_series = series.str()?;
    let mut timestamps: Vec<Option<i64>> = Vec::with_capacity(str_series.len());

    for opt_val in str_series.into_iter() {
        match opt_val {
            Some(val) => match parse_temporal_millis(val) {
                Some(millis) => timestamps.push(Some(millis)),
                None => return Ok(None),
            },
            None => timestamps.push(None),
        }
    }

    let timestamp_series = Series::new(series.name().clone(), timestamps);
    let datetime = timestamp_series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    Ok(Some(datetime))
}

/// Parse one date/datetime string to epoch milliseconds.
///
/// The value must match one of the known date shapes before chrono parsing
/// is attempted, so plain numbers never count as timestamps.
pub(crate) fn parse_temporal_millis(s: &str) -> Option<i64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }

    if !DATE_PATTERNS.iter().any(|p| p.is_match(trimmed)) {
        return None;
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            let dt = date.and_hms_opt(0, 0, 0)?;
            return Some(dt.and_utc().timestamp_millis());
        }
    }

    None
}
