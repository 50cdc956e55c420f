use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// Column classification
// ============================================================================

/// Top-level column kind, determining which processor applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SemanticType {
    #[serde(rename = "ID")]
    Id,
    Date,
    Text,
    Numeric,
}

impl SemanticType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Date => "Date",
            Self::Text => "Text",
            Self::Numeric => "Numeric",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Scaling policy of a numeric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumericRole {
    /// Standardized to zero mean and unit variance.
    Continuous,
    /// Min-max scaled to [0, 1].
    Discrete,
}

/// Reported role of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnRole {
    #[serde(rename = "ID")]
    Id,
    Continuous,
    Discrete,
}

impl ColumnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Continuous => "Continuous",
            Self::Discrete => "Discrete",
        }
    }
}

impl From<NumericRole> for ColumnRole {
    fn from(role: NumericRole) -> Self {
        match role {
            NumericRole::Continuous => ColumnRole::Continuous,
            NumericRole::Discrete => ColumnRole::Discrete,
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Outcome of classifying one column: the `(role, dataType)` pair as a
/// single tagged value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Identifier,
    Date,
    Numeric(NumericRole),
    Text,
}

impl Classification {
    pub fn data_type(&self) -> SemanticType {
        match self {
            Self::Identifier => SemanticType::Id,
            Self::Date => SemanticType::Date,
            Self::Numeric(_) => SemanticType::Numeric,
            Self::Text => SemanticType::Text,
        }
    }

    /// Role of the column; Date and Text columns have none.
    pub fn role(&self) -> Option<ColumnRole> {
        match self {
            Self::Identifier => Some(ColumnRole::Id),
            Self::Numeric(role) => Some((*role).into()),
            Self::Date | Self::Text => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.role() {
            Some(role) if self.data_type() == SemanticType::Numeric => {
                write!(f, "{} ({})", self.data_type(), role)
            }
            _ => write!(f, "{}", self.data_type()),
        }
    }
}

/// Per-column profile reported to callers and used for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub role: Option<ColumnRole>,
    pub data_type: SemanticType,
    pub missing_count: usize,
    pub unique_count: usize,
}

impl ColumnProfile {
    pub fn new(
        name: impl Into<String>,
        classification: Classification,
        missing_count: usize,
        unique_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            role: classification.role(),
            data_type: classification.data_type(),
            missing_count,
            unique_count,
        }
    }

    /// Rebuild the classification this profile was created from.
    ///
    /// A numeric profile without a role is treated as continuous.
    pub fn classification(&self) -> Classification {
        match self.data_type {
            SemanticType::Id => Classification::Identifier,
            SemanticType::Date => Classification::Date,
            SemanticType::Text => Classification::Text,
            SemanticType::Numeric => match self.role {
                Some(ColumnRole::Discrete) => Classification::Numeric(NumericRole::Discrete),
                _ => Classification::Numeric(NumericRole::Continuous),
            },
        }
    }
}

// ============================================================================
// Processing outputs
// ============================================================================

/// Vocabulary statistics of one processed text column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyReport {
    pub column: String,
    /// Distinct whitespace-separated words in the cleaned corpus.
    pub original_unique_words: usize,
    /// Number of TF-IDF feature columns produced.
    pub selected_feature_count: usize,
}

/// Output of processing a single source column.
#[derive(Debug, Clone)]
pub struct ProcessedColumnGroup {
    pub source: String,
    pub columns: Vec<Series>,
    pub vocabulary: Option<VocabularyReport>,
}

impl ProcessedColumnGroup {
    /// A group holding exactly one column.
    pub fn single(source: impl Into<String>, column: Series) -> Self {
        Self {
            source: source.into(),
            columns: vec![column],
            vocabulary: None,
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|s| s.name().to_string()).collect()
    }
}

/// Row and column counts of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub initial_rows: usize,
    pub final_rows: usize,
    pub initial_columns: usize,
    pub final_columns: usize,
    pub duplicates_removed: usize,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
}

impl PipelineSummary {
    /// Percentage of input rows removed as duplicates.
    pub fn duplicate_percentage(&self) -> f64 {
        if self.initial_rows == 0 {
            0.0
        } else {
            (self.duplicates_removed as f64 / self.initial_rows as f64) * 100.0
        }
    }
}

/// Column analysis of a dataset without processing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    pub rows: usize,
    pub columns: usize,
    /// Rows that deduplication would remove.
    pub duplicate_rows: usize,
    pub profiles: Vec<ColumnProfile>,
}

/// Everything produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The machine-learning-ready table.
    pub data: DataFrame,
    pub profiles: Vec<ColumnProfile>,
    pub summary: PipelineSummary,
    /// One entry per text column, in column order.
    pub vocabulary: Vec<VocabularyReport>,
    /// Where the table was written, when persisting is enabled.
    pub output_path: Option<PathBuf>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_role_and_type() {
        assert_eq!(Classification::Identifier.role(), Some(ColumnRole::Id));
        assert_eq!(Classification::Identifier.data_type(), SemanticType::Id);
        assert_eq!(
            Classification::Numeric(NumericRole::Discrete).role(),
            Some(ColumnRole::Discrete)
        );
        assert_eq!(Classification::Date.role(), None);
        assert_eq!(Classification::Text.role(), None);
    }

    #[test]
    fn test_profile_classification_round_trip() {
        for classification in [
            Classification::Identifier,
            Classification::Date,
            Classification::Text,
            Classification::Numeric(NumericRole::Continuous),
            Classification::Numeric(NumericRole::Discrete),
        ] {
            let profile = ColumnProfile::new("c", classification, 0, 0);
            assert_eq!(profile.classification(), classification);
        }
    }

    #[test]
    fn test_profile_serializes_report_fields() {
        let profile = ColumnProfile::new("id", Classification::Identifier, 1, 2);
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "id");
        assert_eq!(json["role"], "ID");
        assert_eq!(json["data_type"], "ID");
        assert_eq!(json["missing_count"], 1);
        assert_eq!(json["unique_count"], 2);

        let text = ColumnProfile::new("notes", Classification::Text, 0, 3);
        let json = serde_json::to_value(&text).unwrap();
        assert!(json["role"].is_null());
    }

    #[test]
    fn test_classification_display() {
        assert_eq!(
            Classification::Numeric(NumericRole::Continuous).to_string(),
            "Numeric (Continuous)"
        );
        assert_eq!(Classification::Date.to_string(), "Date");
    }

    #[test]
    fn test_summary_duplicate_percentage() {
        let summary = PipelineSummary {
            initial_rows: 4,
            duplicates_removed: 1,
            ..Default::default()
        };
        assert_eq!(summary.duplicate_percentage(), 25.0);
        assert_eq!(PipelineSummary::default().duplicate_percentage(), 0.0);
    }

    #[test]
    fn test_single_group() {
        let group = ProcessedColumnGroup::single("id", Series::new("id".into(), &["1", "2"]));
        assert_eq!(group.width(), 1);
        assert_eq!(group.column_names(), vec!["id"]);
        assert!(group.vocabulary.is_none());
    }
}
