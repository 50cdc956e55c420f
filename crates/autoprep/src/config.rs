//! Configuration types for the preprocessing pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup. The classification and TF-IDF
//! thresholds are calibration points with the defaults observed in practice,
//! not semantic guarantees.

use crate::utils::DEFAULT_NULL_MARKERS;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Strategy for imputing missing numeric values before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum NumericImputation {
    /// Use the median of non-null values
    #[default]
    Median,
    /// Use the mean of non-null values
    Mean,
    /// Use a constant value (0.0)
    Zero,
}

/// Thresholds used by the column classifier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifierSettings {
    /// Minimum `unique / rows` ratio for a token column to count as an identifier.
    pub id_unique_ratio: f64,
    /// Numeric columns with fewer distinct values than this are discrete.
    pub discrete_unique_threshold: usize,
    /// Integral columns with `unique / present` at or below this ratio are discrete.
    pub discrete_integer_ratio: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            id_unique_ratio: 0.95,
            discrete_unique_threshold: 10,
            discrete_integer_ratio: 0.05,
        }
    }
}

/// Vocabulary limits for the TF-IDF vectorizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TfidfSettings {
    /// Minimum number of documents a term must appear in.
    pub min_df: usize,
    /// Maximum share of documents a term may appear in (0.0 - 1.0].
    pub max_df: f64,
    /// Upper bound on the number of retained terms.
    pub max_features: usize,
}

impl Default for TfidfSettings {
    fn default() -> Self {
        Self {
            min_df: 2,
            max_df: 0.95,
            max_features: 100,
        }
    }
}

/// Configuration for the preprocessing pipeline.
///
/// Use [`PipelineConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use autoprep::config::{PipelineConfig, NumericImputation};
///
/// let config = PipelineConfig::builder()
///     .discrete_unique_threshold(5)
///     .numeric_imputation(NumericImputation::Mean)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Literal cell values treated as missing.
    /// Default: ["NULL", "NONE"]
    pub null_markers: Vec<String>,

    /// Whether to remove exact duplicate rows.
    /// Default: true
    pub remove_duplicates: bool,

    /// Minimum `unique / rows` ratio for content-based identifier detection.
    /// Default: 0.95
    pub id_unique_ratio: f64,

    /// Numeric columns with fewer distinct values than this are discrete.
    /// Default: 10
    pub discrete_unique_threshold: usize,

    /// Integral numeric columns whose `unique / present` ratio is at or
    /// below this value are discrete.
    /// Default: 0.05
    pub discrete_integer_ratio: f64,

    /// Strategy for imputing missing numeric values.
    /// Default: Median
    pub numeric_imputation: NumericImputation,

    /// Minimum document frequency (absolute count) of a TF-IDF term.
    /// Default: 2
    pub text_min_df: usize,

    /// Maximum document frequency (share of documents) of a TF-IDF term.
    /// Default: 0.95
    pub text_max_df: f64,

    /// Maximum number of TF-IDF features per text column.
    /// Default: 100
    pub text_max_features: usize,

    /// Output directory for processed data and reports.
    /// Default: "output"
    pub output_dir: PathBuf,

    /// Output file name prefix; a timestamp is appended.
    /// Default: "processed_data"
    pub output_name: String,

    /// Whether to write the processed table to `output_dir`.
    /// Default: false
    pub save_to_disk: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        let classifier = ClassifierSettings::default();
        let tfidf = TfidfSettings::default();
        Self {
            null_markers: default_null_markers(),
            remove_duplicates: true,
            id_unique_ratio: classifier.id_unique_ratio,
            discrete_unique_threshold: classifier.discrete_unique_threshold,
            discrete_integer_ratio: classifier.discrete_integer_ratio,
            numeric_imputation: NumericImputation::default(),
            text_min_df: tfidf.min_df,
            text_max_df: tfidf.max_df,
            text_max_features: tfidf.max_features,
            output_dir: PathBuf::from("output"),
            output_name: "processed_data".to_string(),
            save_to_disk: false,
        }
    }
}

fn default_null_markers() -> Vec<String> {
    DEFAULT_NULL_MARKERS.iter().map(|m| m.to_string()).collect()
}

impl PipelineConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder::default()
    }

    /// Classifier thresholds carried by this configuration.
    pub fn classifier_settings(&self) -> ClassifierSettings {
        ClassifierSettings {
            id_unique_ratio: self.id_unique_ratio,
            discrete_unique_threshold: self.discrete_unique_threshold,
            discrete_integer_ratio: self.discrete_integer_ratio,
        }
    }

    /// TF-IDF limits carried by this configuration.
    pub fn tfidf_settings(&self) -> TfidfSettings {
        TfidfSettings {
            min_df: self.text_min_df,
            max_df: self.text_max_df,
            max_features: self.text_max_features,
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(self.id_unique_ratio > 0.0 && self.id_unique_ratio <= 1.0) {
            return Err(ConfigValidationError::InvalidRatio {
                field: "id_unique_ratio".to_string(),
                value: self.id_unique_ratio,
            });
        }

        if !(0.0..=1.0).contains(&self.discrete_integer_ratio) {
            return Err(ConfigValidationError::InvalidRatio {
                field: "discrete_integer_ratio".to_string(),
                value: self.discrete_integer_ratio,
            });
        }

        if !(self.text_max_df > 0.0 && self.text_max_df <= 1.0) {
            return Err(ConfigValidationError::InvalidRatio {
                field: "text_max_df".to_string(),
                value: self.text_max_df,
            });
        }

        if self.discrete_unique_threshold == 0 {
            return Err(ConfigValidationError::ZeroCount(
                "discrete_unique_threshold".to_string(),
            ));
        }

        if self.text_min_df == 0 {
            return Err(ConfigValidationError::ZeroCount("text_min_df".to_string()));
        }

        if self.text_max_features == 0 {
            return Err(ConfigValidationError::ZeroCount(
                "text_max_features".to_string(),
            ));
        }

        if self.output_name.trim().is_empty() {
            return Err(ConfigValidationError::EmptyOutputName);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid ratio for '{field}': {value} (must be within 0.0 and 1.0)")]
    InvalidRatio { field: String, value: f64 },

    #[error("'{0}' must be at least 1")]
    ZeroCount(String),

    #[error("Output name must not be empty")]
    EmptyOutputName,
}

impl From<ConfigValidationError> for crate::error::PreprocessingError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::PreprocessingError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`PipelineConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct PipelineConfigBuilder {
    null_markers: Option<Vec<String>>,
    remove_duplicates: Option<bool>,
    id_unique_ratio: Option<f64>,
    discrete_unique_threshold: Option<usize>,
    discrete_integer_ratio: Option<f64>,
    numeric_imputation: Option<NumericImputation>,
    text_min_df: Option<usize>,
    text_max_df: Option<f64>,
    text_max_features: Option<usize>,
    output_dir: Option<PathBuf>,
    output_name: Option<String>,
    save_to_disk: Option<bool>,
}

impl PipelineConfigBuilder {
    /// Replace the literal values treated as missing.
    pub fn null_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.null_markers = Some(markers.into_iter().map(Into::into).collect());
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Set the uniqueness ratio for content-based identifier detection.
    pub fn id_unique_ratio(mut self, ratio: f64) -> Self {
        self.id_unique_ratio = Some(ratio);
        self
    }

    /// Set the distinct-value count below which numeric columns are discrete.
    pub fn discrete_unique_threshold(mut self, threshold: usize) -> Self {
        self.discrete_unique_threshold = Some(threshold);
        self
    }

    /// Set the cardinality ratio under which integral columns are discrete.
    pub fn discrete_integer_ratio(mut self, ratio: f64) -> Self {
        self.discrete_integer_ratio = Some(ratio);
        self
    }

    /// Set the numeric imputation strategy.
    pub fn numeric_imputation(mut self, strategy: NumericImputation) -> Self {
        self.numeric_imputation = Some(strategy);
        self
    }

    /// Set the minimum document count for TF-IDF terms.
    pub fn text_min_df(mut self, min_df: usize) -> Self {
        self.text_min_df = Some(min_df);
        self
    }

    /// Set the maximum document share for TF-IDF terms.
    pub fn text_max_df(mut self, max_df: f64) -> Self {
        self.text_max_df = Some(max_df);
        self
    }

    /// Set the maximum number of TF-IDF features per column.
    pub fn text_max_features(mut self, max_features: usize) -> Self {
        self.text_max_features = Some(max_features);
        self
    }

    /// Set the output directory for processed data and reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the output file name prefix.
    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.output_name = Some(name.into());
        self
    }

    /// Enable or disable writing the processed table to disk.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `PipelineConfig` or an error if validation fails.
    pub fn build(self) -> Result<PipelineConfig, ConfigValidationError> {
        let defaults = PipelineConfig::default();
        let config = PipelineConfig {
            null_markers: self.null_markers.unwrap_or(defaults.null_markers),
            remove_duplicates: self.remove_duplicates.unwrap_or(defaults.remove_duplicates),
            id_unique_ratio: self.id_unique_ratio.unwrap_or(defaults.id_unique_ratio),
            discrete_unique_threshold: self
                .discrete_unique_threshold
                .unwrap_or(defaults.discrete_unique_threshold),
            discrete_integer_ratio: self
                .discrete_integer_ratio
                .unwrap_or(defaults.discrete_integer_ratio),
            numeric_imputation: self.numeric_imputation.unwrap_or_default(),
            text_min_df: self.text_min_df.unwrap_or(defaults.text_min_df),
            text_max_df: self.text_max_df.unwrap_or(defaults.text_max_df),
            text_max_features: self.text_max_features.unwrap_or(defaults.text_max_features),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            output_name: self.output_name.unwrap_or(defaults.output_name),
            save_to_disk: self.save_to_disk.unwrap_or(defaults.save_to_disk),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.null_markers, vec!["NULL", "NONE"]);
        assert!(config.remove_duplicates);
        assert_eq!(config.discrete_unique_threshold, 10);
        assert_eq!(config.text_min_df, 2);
        assert_eq!(config.text_max_df, 0.95);
        assert_eq!(config.text_max_features, 100);
        assert_eq!(config.numeric_imputation, NumericImputation::Median);
        assert!(!config.save_to_disk);
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = PipelineConfig::builder().build().unwrap();
        let default = PipelineConfig::default();
        assert_eq!(built.classifier_settings(), default.classifier_settings());
        assert_eq!(built.tfidf_settings(), default.tfidf_settings());
        assert_eq!(built.output_name, "processed_data");
    }

    #[test]
    fn test_builder_custom_values() {
        let config = PipelineConfig::builder()
            .null_markers(["n/a"])
            .remove_duplicates(false)
            .discrete_unique_threshold(4)
            .numeric_imputation(NumericImputation::Zero)
            .text_min_df(1)
            .text_max_df(1.0)
            .text_max_features(20)
            .output_name("features")
            .build()
            .unwrap();

        assert_eq!(config.null_markers, vec!["n/a"]);
        assert!(!config.remove_duplicates);
        assert_eq!(config.discrete_unique_threshold, 4);
        assert_eq!(config.numeric_imputation, NumericImputation::Zero);
        assert_eq!(
            config.tfidf_settings(),
            TfidfSettings {
                min_df: 1,
                max_df: 1.0,
                max_features: 20
            }
        );
        assert_eq!(config.output_name, "features");
    }

    #[test]
    fn test_validation_invalid_max_df() {
        let result = PipelineConfig::builder().text_max_df(0.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidRatio { .. }
        ));
    }

    #[test]
    fn test_validation_invalid_id_ratio() {
        let result = PipelineConfig::builder().id_unique_ratio(1.5).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_zero_counts() {
        assert!(matches!(
            PipelineConfig::builder().text_min_df(0).build().unwrap_err(),
            ConfigValidationError::ZeroCount(_)
        ));
        assert!(matches!(
            PipelineConfig::builder()
                .discrete_unique_threshold(0)
                .build()
                .unwrap_err(),
            ConfigValidationError::ZeroCount(_)
        ));
    }

    #[test]
    fn test_validation_empty_output_name() {
        let result = PipelineConfig::builder().output_name("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyOutputName
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: PipelineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.null_markers, deserialized.null_markers);
        assert_eq!(config.numeric_imputation, deserialized.numeric_imputation);
        assert_eq!(config.tfidf_settings(), deserialized.tfidf_settings());
    }

    #[test]
    fn test_pipeline_config_from_json() {
        let json = r#"{
            "null_markers": ["NULL", "?"],
            "remove_duplicates": false,
            "id_unique_ratio": 0.9,
            "discrete_unique_threshold": 5,
            "discrete_integer_ratio": 0.1,
            "numeric_imputation": "Mean",
            "text_min_df": 3,
            "text_max_df": 0.8,
            "text_max_features": 50,
            "output_dir": "custom_output",
            "output_name": "my_dataset",
            "save_to_disk": true
        }"#;

        let config: PipelineConfig =
            serde_json::from_str(json).expect("Should deserialize from frontend JSON");

        assert_eq!(config.null_markers, vec!["NULL", "?"]);
        assert!(!config.remove_duplicates);
        assert_eq!(config.numeric_imputation, NumericImputation::Mean);
        assert_eq!(config.classifier_settings().discrete_unique_threshold, 5);
        assert_eq!(config.tfidf_settings().max_features, 50);
        assert_eq!(config.output_dir.to_str().unwrap(), "custom_output");
        assert!(config.save_to_disk);
        assert!(config.validate().is_ok());
    }
}
