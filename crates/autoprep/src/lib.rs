//! Column Classification and Feature Preprocessing Library
//!
//! Turns a raw CSV table into a machine-learning-ready numeric table, built
//! with Rust and Polars.
//!
//! # Overview
//!
//! Every column is classified by semantic type and sent to a type-specific
//! processor:
//!
//! - **Identifiers** pass through unchanged
//! - **Dates** are normalized to [0, 1] across the column's time span
//! - **Numeric** columns are standardized (continuous) or min-max scaled (discrete)
//! - **Text** is cleaned and expanded into TF-IDF feature columns
//!
//! Before classification, null markers (`NULL`, `NONE`) become missing values;
//! before processing, exact-duplicate rows are removed.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use autoprep::{Pipeline, PipelineConfig, load_csv};
//! use std::path::Path;
//!
//! let df = load_csv(Path::new("data.csv"))?;
//!
//! let output = Pipeline::builder()
//!     .config(PipelineConfig::default())
//!     .build()?
//!     .process(df)?;
//!
//! for profile in &output.profiles {
//!     println!("{}: {:?}", profile.name, profile.classification());
//! }
//! println!("Removed {} duplicates", output.summary.duplicates_removed);
//! ```
//!
//! # Classification
//!
//! Rules are tried in a fixed order, see [`profiler::PRECEDENCE`]:
//! identifier, date, numeric, then text. A column with no values is text.
//! The thresholds are configurable:
//!
//! ```rust,ignore
//! use autoprep::config::*;
//!
//! let config = PipelineConfig::builder()
//!     .discrete_unique_threshold(5)
//!     .numeric_imputation(NumericImputation::Mean)
//!     .text_min_df(3)
//!     .null_markers(["NULL", "NONE", "?"])
//!     .build()?;
//! ```
//!
//! # Language Resources
//!
//! Stopwords and the lemmatizer are built once per process and shared
//! through [`LanguageResources::shared`]. Pass custom resources with
//! [`PipelineBuilder::language_resources`].

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod pipeline;
pub mod processors;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::DataCleaner;
pub use config::{
    ClassifierSettings, ConfigValidationError, NumericImputation, PipelineConfig,
    PipelineConfigBuilder, TfidfSettings,
};
pub use error::{PreprocessingError, Result as PreprocessingResult, ResultExt};
pub use imputers::StatisticalImputer;
pub use pipeline::{
    ClosureProgressReporter, ColumnExecutor, Pipeline, PipelineBuilder, PreprocessingStage,
    ProgressReporter, ProgressUpdate,
};
pub use processors::{
    DateProcessor, LanguageResources, NumericProcessor, TextFeatures, TextProcessor,
};
pub use profiler::{ColumnClassifier, DataProfiler, PRECEDENCE};
pub use reporting::{PipelineReport, ReportGenerator};
pub use types::{
    Classification, ColumnProfile, ColumnRole, DatasetAnalysis, NumericRole, PipelineOutput,
    PipelineSummary, ProcessedColumnGroup, SemanticType, VocabularyReport,
};
pub use utils::{load_csv, parse_datetime, parse_numeric_value};
