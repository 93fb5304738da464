//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use serde::{Deserialize, Serialize};

/// Configuration for cleaning, analysis and chart building.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use datascope_processing::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .categorical_unique_limit(30)
///     .strong_correlation_threshold(0.8)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Maximum number of distinct values for a text column to be summarised
    /// as categorical. Default: 20
    pub categorical_unique_limit: usize,

    /// Number of top values reported per categorical column.
    /// Default: 10
    pub top_value_count: usize,

    /// Maximum number of numeric columns that get a histogram chart.
    /// Default: 5
    pub histogram_column_limit: usize,

    /// Maximum number of categorical columns that get a bar chart.
    /// Default: 3
    pub bar_chart_column_limit: usize,

    /// Absolute correlation above which a pair counts as strongly correlated.
    /// Default: 0.7
    pub strong_correlation_threshold: f64,

    /// Constant used to fill text columns that have no mode.
    /// Default: "Unknown"
    pub categorical_fill_value: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            categorical_unique_limit: 20,
            top_value_count: 10,
            histogram_column_limit: 5,
            bar_chart_column_limit: 3,
            strong_correlation_threshold: 0.7,
            categorical_fill_value: "Unknown".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=1.0).contains(&self.strong_correlation_threshold)
            || self.strong_correlation_threshold == 0.0
        {
            return Err(ConfigValidationError::InvalidThreshold {
                field: "strong_correlation_threshold".to_string(),
                value: self.strong_correlation_threshold,
            });
        }

        if self.top_value_count == 0 {
            return Err(ConfigValidationError::InvalidLimit {
                field: "top_value_count".to_string(),
            });
        }

        if self.categorical_unique_limit == 0 {
            return Err(ConfigValidationError::InvalidLimit {
                field: "categorical_unique_limit".to_string(),
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid threshold for '{field}': {value} (must be in (0.0, 1.0])")]
    InvalidThreshold { field: String, value: f64 },

    #[error("Invalid limit for '{field}': must be at least 1")]
    InvalidLimit { field: String },
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    categorical_unique_limit: Option<usize>,
    top_value_count: Option<usize>,
    histogram_column_limit: Option<usize>,
    bar_chart_column_limit: Option<usize>,
    strong_correlation_threshold: Option<f64>,
    categorical_fill_value: Option<String>,
}

impl AnalysisConfigBuilder {
    /// Set the distinct-value limit for categorical summaries.
    pub fn categorical_unique_limit(mut self, limit: usize) -> Self {
        self.categorical_unique_limit = Some(limit);
        self
    }

    /// Set the number of top values reported per categorical column.
    pub fn top_value_count(mut self, count: usize) -> Self {
        self.top_value_count = Some(count);
        self
    }

    /// Set the maximum number of histogram charts.
    pub fn histogram_column_limit(mut self, limit: usize) -> Self {
        self.histogram_column_limit = Some(limit);
        self
    }

    /// Set the maximum number of bar charts.
    pub fn bar_chart_column_limit(mut self, limit: usize) -> Self {
        self.bar_chart_column_limit = Some(limit);
        self
    }

    /// Set the strong-correlation threshold.
    ///
    /// # Arguments
    /// * `threshold` - Value in (0.0, 1.0] (e.g., 0.7 = |r| > 0.7)
    pub fn strong_correlation_threshold(mut self, threshold: f64) -> Self {
        self.strong_correlation_threshold = Some(threshold);
        self
    }

    /// Set the fill constant for text columns without a mode.
    pub fn categorical_fill_value(mut self, value: impl Into<String>) -> Self {
        self.categorical_fill_value = Some(value.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            categorical_unique_limit: self.categorical_unique_limit.unwrap_or(20),
            top_value_count: self.top_value_count.unwrap_or(10),
            histogram_column_limit: self.histogram_column_limit.unwrap_or(5),
            bar_chart_column_limit: self.bar_chart_column_limit.unwrap_or(3),
            strong_correlation_threshold: self.strong_correlation_threshold.unwrap_or(0.7),
            categorical_fill_value: self
                .categorical_fill_value
                .unwrap_or_else(|| "Unknown".to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}
