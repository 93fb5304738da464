//! Shared utilities for the analysis pipeline.
//!
//! This module contains common helper functions used across multiple modules
//! to reduce code duplication and ensure consistency.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for analysis purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Temporal,
    /// String/text type
    Text,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_temporal_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_temporal_dtype(dtype) {
        DtypeCategory::Temporal
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::Text
    } else {
        DtypeCategory::Other
    }
}

/// Get the dtype category of a Series.
pub fn series_dtype_category(series: &Series) -> DtypeCategory {
    get_dtype_category(series.dtype())
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Clean a string for numeric parsing by removing formatting characters.
///
/// # Example
///
/// ```rust,ignore
/// use datascope_processing::utils::clean_numeric_string;
///
/// assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
/// assert_eq!(clean_numeric_string("  42%  "), "42");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Try to parse a string as a numeric value (f64).
///
/// Handles common formatting like currency symbols, percentages, and thousands separators.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Check if a string can be parsed as a numeric value.
pub fn is_numeric_string(s: &str) -> bool {
    parse_numeric_string(s).is_some()
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Count the occurrences of each distinct value in a string Series.
///
/// Returns `(value, count)` pairs ordered by descending count; ties keep the
/// order of first appearance in the data.
pub fn value_counts_desc(series: &Series) -> Vec<(String, usize)> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return Vec::new();
    }

    let Ok(str_series) = non_null.cast(&DataType::String) else {
        return Vec::new();
    };
    let Ok(str_chunked) = str_series.str() else {
        return Vec::new();
    };

    let mut counts: std::collections::HashMap<String, (usize, usize)> =
        std::collections::HashMap::new();
    for (idx, val) in str_chunked.into_iter().flatten().enumerate() {
        let entry = counts.entry(val.to_string()).or_insert((0, idx));
        entry.0 += 1;
    }

    let mut pairs: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(val, (count, first_idx))| (val, count, first_idx))
        .collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    pairs.into_iter().map(|(val, count, _)| (val, count)).collect()
}

/// Calculate the mode (most frequent value) of a string Series.
pub fn string_mode(series: &Series) -> Option<String> {
    value_counts_desc(series).into_iter().next().map(|(val, _)| val)
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a numeric Series with a specific value.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let mask = series.is_null();
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        if mask.get(i).unwrap_or(false) {
            result_vec.push(Some(fill_value));
        } else {
            let val = series.get(i)?;
            result_vec.push(Some(val.try_extract::<f64>()?));
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let str_chunked = series.str()?;
    let len = series.len();
    let mut result_vec = Vec::with_capacity(len);

    for i in 0..len {
        match str_chunked.get(i) {
            Some(val) => result_vec.push(Some(val.to_string())),
            None => result_vec.push(Some(fill_value.to_string())),
        }
    }

    Ok(Series::new(series.name().clone(), result_vec))
}

/// Total null count across every column of a DataFrame.
pub fn total_null_count(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}

// =============================================================================
// Tests
// =============================================================================
