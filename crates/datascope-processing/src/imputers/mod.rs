//! Statistical imputation for missing values.
//!
//! Numeric columns are filled with their median, text columns with their
//! mode, and text columns without a mode fall back to a fixed constant.
//! Each statistic is computed once over the non-missing values, then
//! applied; filled values never feed back into another column's statistic.

use crate::error::Result;
use crate::utils::{
    DtypeCategory, fill_numeric_nulls, fill_string_nulls, series_dtype_category, string_mode,
};
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing values in every column of the frame.
    ///
    /// Returns the total number of values filled and one step description
    /// per column touched.
    pub fn impute_missing(
        df: &mut DataFrame,
        fallback_value: &str,
    ) -> Result<(usize, Vec<String>)> {
        let mut steps = Vec::new();
        let mut filled_total = 0usize;

        let col_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for col_name in &col_names {
            let (null_count, category) = {
                let series = df.column(col_name)?.as_materialized_series();
                (series.null_count(), series_dtype_category(series))
            };

            if null_count == 0 {
                continue;
            }

            match category {
                DtypeCategory::Numeric => {
                    filled_total +=
                        Self::apply_numeric_median(df, col_name, &mut steps)?;
                }
                DtypeCategory::Text => {
                    filled_total +=
                        Self::apply_mode_imputation(df, col_name, fallback_value, &mut steps)?;
                }
                _ => {
                    debug!("Skipping imputation for '{}' ({:?})", col_name, category);
                }
            }
        }

        Ok((filled_total, steps))
    }

    /// Apply median imputation to one numeric column.
    ///
    /// Returns the number of values filled (zero when the column has no
    /// non-missing values to take a median from).
    pub fn apply_numeric_median(
        df: &mut DataFrame,
        col_name: &str,
        steps: &mut Vec<String>,
    ) -> Result<usize> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let missing = series.null_count();
        if missing == 0 {
            return Ok(0);
        }

        let Some(median_val) = series.median() else {
            debug!("No median available for '{}', column left as-is", col_name);
            return Ok(0);
        };

        let filled = fill_numeric_nulls(&series, median_val)?;
        df.replace(col_name, filled)?;

        steps.push(format!(
            "Filled '{}' with median: {:.2}",
            col_name, median_val
        ));

        Ok(missing)
    }

    /// Apply mode imputation to one text column, falling back to a fixed
    /// constant when the column has no non-missing values.
    ///
    /// Returns the number of values filled.
    pub fn apply_mode_imputation(
        df: &mut DataFrame,
        col_name: &str,
        fallback_value: &str,
        steps: &mut Vec<String>,
    ) -> Result<usize> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let missing = series.null_count();
        if missing == 0 {
            return Ok(0);
        }

        match string_mode(&series) {
            Some(mode_val) => {
                let filled = fill_string_nulls(&series, &mode_val)?;
                df.replace(col_name, filled)?;
                steps.push(format!("Filled '{}' with mode: '{}'", col_name, mode_val));
            }
            None => {
                let filled = fill_string_nulls(&series, fallback_value)?;
                df.replace(col_name, filled)?;
                steps.push(format!(
                    "Filled '{}' with constant value: '{}'",
                    col_name, fallback_value
                ));
            }
        }

        Ok(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // apply_numeric_median() tests
    // ========================================================================

    #[test]
    fn test_apply_numeric_median_basic() {
        let mut df = df![
            "values" => [Some(1.0), None, Some(3.0), None, Some(5.0)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let filled =
            StatisticalImputer::apply_numeric_median(&mut df, "values", &mut steps).unwrap();

        let values = df.column("values").unwrap();
        assert_eq!(values.null_count(), 0);
        assert_eq!(filled, 2);

        // Median of [1, 3, 5] = 3
        let imputed_1 = values.get(1).unwrap().try_extract::<f64>().unwrap();
        let imputed_3 = values.get(3).unwrap().try_extract::<f64>().unwrap();
        assert_eq!(imputed_1, 3.0);
        assert_eq!(imputed_3, 3.0);

        assert!(steps[0].contains("median"));
        assert!(steps[0].contains("3.00"));
    }

    #[test]
    fn test_apply_numeric_median_no_nulls_is_noop() {
        let mut df = df![
            "values" => [1.0, 2.0, 3.0],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let filled =
            StatisticalImputer::apply_numeric_median(&mut df, "values", &mut steps).unwrap();

        assert_eq!(filled, 0);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_apply_numeric_median_even_count_interpolates() {
        let mut df = df![
            "values" => [Some(1.0), None, Some(3.0)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_numeric_median(&mut df, "values", &mut steps).unwrap();

        // Median of [1, 3] = 2
        let values = df.column("values").unwrap();
        assert_eq!(values.get(1).unwrap().try_extract::<f64>().unwrap(), 2.0);
    }

    #[test]
    fn test_apply_numeric_median_all_nulls() {
        let mut df = df![
            "values" => [Option::<f64>::None, None, None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        // Should not panic; no median exists, so nothing is filled
        let filled =
            StatisticalImputer::apply_numeric_median(&mut df, "values", &mut steps).unwrap();
        assert_eq!(filled, 0);
        assert!(steps.is_empty());
    }

    // ========================================================================
    // apply_mode_imputation() tests
    // ========================================================================

    #[test]
    fn test_apply_mode_imputation_basic() {
        let mut df = df![
            "category" => [Some("A"), Some("B"), Some("A"), None, Some("A")],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let filled =
            StatisticalImputer::apply_mode_imputation(&mut df, "category", "Unknown", &mut steps)
                .unwrap();

        let category = df.column("category").unwrap();
        assert_eq!(category.null_count(), 0);
        assert_eq!(filled, 1);
        // Mode is "A" (appears 3 times)
        assert!(category.get(3).unwrap().to_string().contains("A"));
        assert!(steps[0].contains("mode"));
    }

    #[test]
    fn test_apply_mode_imputation_tie_keeps_first_seen() {
        let mut df = df![
            "category" => [Some("A"), Some("B"), None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_mode_imputation(&mut df, "category", "Unknown", &mut steps)
            .unwrap();

        let category = df.column("category").unwrap();
        assert_eq!(category.null_count(), 0);
        // Tie between "A" and "B"; "A" was seen first
        assert!(category.get(2).unwrap().to_string().contains("A"));
    }

    #[test]
    fn test_apply_mode_imputation_fallback_constant() {
        let mut df = df![
            "category" => [Option::<&str>::None, None, None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let filled =
            StatisticalImputer::apply_mode_imputation(&mut df, "category", "Unknown", &mut steps)
                .unwrap();

        let category = df.column("category").unwrap();
        assert_eq!(category.null_count(), 0);
        assert_eq!(filled, 3);
        assert!(category.get(0).unwrap().to_string().contains("Unknown"));
        assert!(steps[0].contains("constant"));
    }

    // ========================================================================
    // impute_missing() tests
    // ========================================================================

    #[test]
    fn test_impute_missing_mixed_columns() {
        let mut df = df![
            "age" => [Some(30.0), None, Some(40.0)],
            "city" => [Some("Oslo"), Some("Oslo"), None],
            "full" => [1, 2, 3],
        ]
        .unwrap();

        let (filled, steps) = StatisticalImputer::impute_missing(&mut df, "Unknown").unwrap();

        assert_eq!(filled, 2);
        assert_eq!(steps.len(), 2);
        assert_eq!(df.column("age").unwrap().null_count(), 0);
        assert_eq!(df.column("city").unwrap().null_count(), 0);

        // Median of [30, 40] = 35
        assert_eq!(
            df.column("age").unwrap().get(1).unwrap().try_extract::<f64>().unwrap(),
            35.0
        );
    }

    #[test]
    fn test_impute_missing_clean_frame_is_noop() {
        let mut df = df![
            "a" => [1.0, 2.0],
            "b" => ["x", "y"],
        ]
        .unwrap();

        let (filled, steps) = StatisticalImputer::impute_missing(&mut df, "Unknown").unwrap();

        assert_eq!(filled, 0);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_impute_missing_statistic_computed_before_fill() {
        // The median must come from the pre-fill values only
        let mut df = df![
            "v" => [Some(10.0), None, None, Some(20.0)],
        ]
        .unwrap();

        let (filled, _) = StatisticalImputer::impute_missing(&mut df, "Unknown").unwrap();

        assert_eq!(filled, 2);
        let v = df.column("v").unwrap();
        // Both gaps get the same median of [10, 20]
        assert_eq!(v.get(1).unwrap().try_extract::<f64>().unwrap(), 15.0);
        assert_eq!(v.get(2).unwrap().try_extract::<f64>().unwrap(), 15.0);
    }
}
