//! Data profiling module for dataset analysis.
//!
//! This module provides the column classifier and the per-column profile:
//! - Semantic type inference with explicit precedence (ID, Date, Numeric, Text)
//! - Numeric role detection (continuous or discrete)
//! - Missing and unique value counts

mod role_inference;
mod type_inference;

pub use type_inference::{ColumnClassifier, PRECEDENCE};

use crate::config::ClassifierSettings;
use crate::error::{Result, ResultExt};
use crate::types::ColumnProfile;
use crate::utils::string_cells;
use polars::prelude::*;
use tracing::debug;

/// Data profiler for analyzing dataset structure.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column of a string-typed dataset, in column order.
    pub fn profile_dataset(
        df: &DataFrame,
        settings: &ClassifierSettings,
    ) -> Result<Vec<ColumnProfile>> {
        let classifier = ColumnClassifier::new(*settings);

        df.get_columns()
            .iter()
            .map(|col| Self::profile_column(&classifier, col.as_materialized_series()))
            .collect()
    }

    fn profile_column(classifier: &ColumnClassifier, series: &Series) -> Result<ColumnProfile> {
        let col_name = series.name().as_str();
        let cells = string_cells(series)
            .context(format!("Failed to read column '{}' as text", col_name))?;

        let classification = classifier.classify_values(col_name, &cells);
        let missing_count = series.null_count();
        let unique_count = series
            .drop_nulls()
            .n_unique()
            .context(format!("Failed to count distinct values of '{}'", col_name))?;

        debug!(
            "Column '{}': {} (missing: {}, unique: {})",
            col_name, classification, missing_count, unique_count
        );

        Ok(ColumnProfile::new(
            col_name,
            classification,
            missing_count,
            unique_count,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnRole, SemanticType};

    #[test]
    fn test_profile_dataset() {
        let df = df! {
            "id" => &["1", "2", "1"],
            "name" => &["Apple product", "Apple product", "Apple product"],
            "price" => &[Some("10"), None, Some("10")],
            "joined" => &["2020-01-01", "2021-01-01", "2020-01-01"],
        }
        .unwrap();

        let profiles = DataProfiler::profile_dataset(&df, &ClassifierSettings::default()).unwrap();
        assert_eq!(profiles.len(), 4);

        assert_eq!(profiles[0].name, "id");
        assert_eq!(profiles[0].data_type, SemanticType::Id);
        assert_eq!(profiles[0].role, Some(ColumnRole::Id));
        assert_eq!(profiles[0].unique_count, 2);

        assert_eq!(profiles[1].data_type, SemanticType::Text);
        assert_eq!(profiles[1].role, None);

        assert_eq!(profiles[2].data_type, SemanticType::Numeric);
        assert_eq!(profiles[2].role, Some(ColumnRole::Discrete));
        assert_eq!(profiles[2].missing_count, 1);
        assert_eq!(profiles[2].unique_count, 1);

        assert_eq!(profiles[3].data_type, SemanticType::Date);
    }

    #[test]
    fn test_profile_counts_exclude_missing_from_unique() {
        let df = df! {
            "empty" => &[None::<&str>, None, None],
            "mixed" => &[Some("a"), None, Some("b")],
        }
        .unwrap();

        let profiles = DataProfiler::profile_dataset(&df, &ClassifierSettings::default()).unwrap();
        assert_eq!((profiles[0].missing_count, profiles[0].unique_count), (3, 0));
        assert_eq!((profiles[1].missing_count, profiles[1].unique_count), (1, 2));
    }

    #[test]
    fn test_profile_requires_string_columns() {
        let df = df! { "x" => &[1i64, 2, 3] }.unwrap();
        assert!(DataProfiler::profile_dataset(&df, &ClassifierSettings::default()).is_err());
    }
}
