//! Tabular Data Analysis Library
//!
//! Cleaning, descriptive statistics, chart payloads and natural-language
//! interpretation for in-memory tabular datasets, built on Polars.
//!
//! # Overview
//!
//! This library provides the request-scoped processing behind a data
//! analysis upload service:
//!
//! - **Cleaning Pipeline**: empty row/column removal, median/mode
//!   imputation, stable deduplication, best-effort type coercion
//! - **Analyzer**: shape, dtypes, numeric summaries, missing-value counts,
//!   categorical top values, pairwise Pearson correlations
//! - **Chart Builder**: declarative histogram/heatmap/bar/scatter payloads
//! - **Interpreter**: ordered natural-language observations
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use datascope_processing::{
//!     AnalysisConfig, ChartBuilder, CleaningPipeline, DataAnalyzer, Interpreter,
//! };
//! use polars::prelude::*;
//!
//! let df = CsvReader::from_path("data.csv")?.finish()?;
//!
//! let config = AnalysisConfig::default();
//! let outcome = CleaningPipeline::new(config.clone()).clean(df)?;
//! let analysis = DataAnalyzer::analyze(&outcome.df, &config)?;
//! let charts = ChartBuilder::build_charts(&outcome.df, &analysis, &config)?;
//! let sentences = Interpreter::interpret(&analysis, &config);
//!
//! for entry in &outcome.report {
//!     println!("{}", entry);
//! }
//! for sentence in &sentences {
//!     println!("{}", sentence);
//! }
//! ```

pub mod analyzer;
pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod interpret;
pub mod pipeline;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use analyzer::DataAnalyzer;
pub use charts::ChartBuilder;
pub use cleaner::{CoercionOutcome, DataCleaner, TypeCoercer};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use interpret::Interpreter;
pub use pipeline::CleaningPipeline;
pub use types::{
    AnalysisReport, CategoricalColumnSummary, ChartSpec, ChartType, CleaningOutcome,
    CorrelationMatrix, NumericColumnSummary, ValueCount,
};
pub use utils::{
    DtypeCategory, clean_numeric_string, fill_numeric_nulls, fill_string_nulls,
    get_dtype_category, is_numeric_dtype, parse_numeric_string, string_mode,
};
