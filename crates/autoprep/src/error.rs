//! Custom error types for the preprocessing pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Degenerate
//! columns (zero variance, zero range, empty vocabulary) are not errors: the
//! processors define an output for them.
//!
//! Errors are serializable so that a front end can display them as
//! `{code, message}` pairs.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the preprocessing pipeline.
#[derive(Error, Debug)]
pub enum PreprocessingError {
    /// A cell could not be converted to the type implied by its column's classification.
    #[error("Failed to parse value '{value}' in column '{column}' as {expected}")]
    Parse {
        column: String,
        value: String,
        expected: &'static str,
    },

    /// The input table has no rows or no columns.
    #[error("Input table is empty ({rows} rows x {columns} columns)")]
    EmptyInput { rows: usize, columns: usize },

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A column failed to process for a reason other than a parse failure.
    #[error("Failed to process column '{column}': {source}")]
    ColumnFailed {
        column: String,
        #[source]
        source: Box<PreprocessingError>,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PreprocessingError>,
    },
}

impl PreprocessingError {
    /// Create a parse error for a cell of `column`.
    pub fn parse(column: impl Into<String>, value: impl Into<String>, expected: &'static str) -> Self {
        PreprocessingError::Parse {
            column: column.into(),
            value: value.into(),
            expected,
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PreprocessingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Attribute the error to `column`, unless it already names one.
    pub fn in_column(self, column: impl Into<String>) -> Self {
        if self.column().is_some() {
            return self;
        }
        PreprocessingError::ColumnFailed {
            column: column.into(),
            source: Box::new(self),
        }
    }

    /// The column this error is attributed to, if any.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Parse { column, .. } | Self::ColumnFailed { column, .. } => Some(column.as_str()),
            Self::ColumnNotFound(column) => Some(column.as_str()),
            Self::WithContext { source, .. } => source.column(),
            _ => None,
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "PARSE_ERROR",
            Self::EmptyInput { .. } => "EMPTY_INPUT",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::ColumnFailed { source, .. } => source.error_code(),
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error was caused by the input data rather than the environment.
    pub fn is_data_error(&self) -> bool {
        match self {
            Self::Parse { .. }
            | Self::EmptyInput { .. }
            | Self::ColumnNotFound(_) => true,
            Self::ColumnFailed { source, .. } | Self::WithContext { source, .. } => {
                source.is_data_error()
            }
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for PreprocessingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("PreprocessingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for preprocessing operations.
pub type Result<T> = std::result::Result<T, PreprocessingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| PreprocessingError::Polars(e).with_context(context))
    }
}
