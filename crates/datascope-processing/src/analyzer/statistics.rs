//! Statistical helper functions for dataset analysis.

use crate::error::Result;
use polars::prelude::*;

/// Collect a numeric series as `Option<f64>` values, preserving positions.
pub(crate) fn column_f64_values(series: &Series) -> Result<Vec<Option<f64>>> {
    let casted = series.cast(&DataType::Float64)?;
    let ca = casted.f64()?;
    Ok(ca.into_iter().collect())
}

/// Arithmetic mean of a slice. Zero for an empty slice.
pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator). Zero when n <= 1.
pub(crate) fn sample_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let m = mean(values);
    let variance: f64 = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Quantile of a pre-sorted slice using linear interpolation.
///
/// `q` must be in [0, 1]; the slice must be non-empty and ascending.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.len() == 1 {
        return sorted[0];
    }

    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }

    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Pearson correlation coefficient over paired observations.
///
/// Returns 0.0 when either side has zero variance or fewer than two pairs;
/// correlation is undefined there and 0.0 keeps the matrix total.
pub(crate) fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }

    let mx = mean(&x[..n]);
    let my = mean(&y[..n]);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mx;
        let dy = y[i] - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return 0.0;
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

/// Pearson correlation over positionally paired optional values.
///
/// Rows where either side is missing are excluded.
pub(crate) fn pearson_pairwise(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let mut xs = Vec::with_capacity(x.len());
    let mut ys = Vec::with_capacity(y.len());

    for (a, b) in x.iter().zip(y.iter()) {
        if let (Some(a), Some(b)) = (a, b) {
            xs.push(*a);
            ys.push(*b);
        }
    }

    pearson(&xs, &ys)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== mean / sample_std tests ====================

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), 3.0);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_sample_std_basic() {
        // Values: 1, 2, 3, 4, 5
        // Mean = 3, Variance = 10/4 = 2.5, Std = sqrt(2.5) ≈ 1.58
        let std = sample_std(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((std - 1.58).abs() < 0.01);
    }

    #[test]
    fn test_sample_std_single_value() {
        assert_eq!(sample_std(&[5.0]), 0.0);
    }

    #[test]
    fn test_sample_std_identical_values() {
        assert_eq!(sample_std(&[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    // ==================== quantile_sorted tests ====================

    #[test]
    fn test_quantile_sorted_median_odd() {
        assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0], 0.5), 2.0);
    }

    #[test]
    fn test_quantile_sorted_median_even_interpolates() {
        assert_eq!(quantile_sorted(&[1.0, 3.0], 0.5), 2.0);
    }

    #[test]
    fn test_quantile_sorted_quartiles() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_sorted(&sorted, 0.25), 2.0);
        assert_eq!(quantile_sorted(&sorted, 0.75), 4.0);
        assert_eq!(quantile_sorted(&sorted, 0.0), 1.0);
        assert_eq!(quantile_sorted(&sorted, 1.0), 5.0);
    }

    #[test]
    fn test_quantile_sorted_interpolation() {
        // q25 of [1, 2, 3, 4]: pos = 0.75 -> 1 + 0.75 * (2 - 1) = 1.75
        assert_eq!(quantile_sorted(&[1.0, 2.0, 3.0, 4.0], 0.25), 1.75);
    }

    #[test]
    fn test_quantile_sorted_single_value() {
        assert_eq!(quantile_sorted(&[42.0], 0.5), 42.0);
    }

    // ==================== pearson tests ====================

    #[test]
    fn test_pearson_perfect_positive() {
        let r = pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]);
        assert!((r - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        assert!((r + 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_pearson_zero_variance() {
        assert_eq!(pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]), 0.0);
    }

    #[test]
    fn test_pearson_too_few_pairs() {
        assert_eq!(pearson(&[1.0], &[2.0]), 0.0);
        assert_eq!(pearson(&[], &[]), 0.0);
    }

    #[test]
    fn test_pearson_pairwise_skips_missing() {
        let x = [Some(1.0), None, Some(2.0), Some(3.0)];
        let y = [Some(3.0), Some(9.0), Some(2.0), Some(1.0)];
        let r = pearson_pairwise(&x, &y);
        // Pairs used: (1,3), (2,2), (3,1) -> perfectly anti-correlated
        assert!((r + 1.0).abs() < 1e-10);
    }

    // ==================== column_f64_values tests ====================

    #[test]
    fn test_column_f64_values_preserves_positions() {
        let series = Series::new("v".into(), &[Some(1i64), None, Some(3)]);
        let values = column_f64_values(&series).unwrap();
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
    }
}
