//! Type inference logic for column analysis.
//!
//! Classification is a pure function of the column name and its cells. The
//! rules are tried in [`PRECEDENCE`] order and the first match wins.

use crate::config::ClassifierSettings;
use crate::error::Result;
use crate::types::{Classification, SemanticType};
use crate::utils::{is_date_value, is_numeric_value, parse_numeric_value, string_cells};
use polars::prelude::*;
use std::collections::HashSet;

use super::role_inference::{has_id_like_name, infer_numeric_role};

/// Order in which the semantic types are tested. `Text` always matches.
pub const PRECEDENCE: [SemanticType; 4] = [
    SemanticType::Id,
    SemanticType::Date,
    SemanticType::Numeric,
    SemanticType::Text,
];

/// Decides the `(role, dataType)` pair of a column.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnClassifier {
    settings: ClassifierSettings,
}

impl ColumnClassifier {
    pub fn new(settings: ClassifierSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClassifierSettings {
        &self.settings
    }

    /// Classify a string column.
    pub fn classify(&self, col_name: &str, series: &Series) -> Result<Classification> {
        let cells = string_cells(series)?;
        Ok(self.classify_values(col_name, &cells))
    }

    /// Classify a column from its cells; `None` is a missing cell.
    pub fn classify_values(&self, col_name: &str, values: &[Option<&str>]) -> Classification {
        let present: Vec<&str> = values.iter().flatten().copied().collect();

        // Nothing to inspect
        if present.is_empty() {
            return Classification::Text;
        }

        for semantic_type in PRECEDENCE {
            match semantic_type {
                SemanticType::Id => {
                    if self.is_identifier(col_name, &present, values.len()) {
                        return Classification::Identifier;
                    }
                }
                SemanticType::Date => {
                    if present.iter().all(|v| is_date_value(v)) {
                        return Classification::Date;
                    }
                }
                SemanticType::Numeric => {
                    if let Some(numbers) = parse_all_numeric(&present) {
                        return Classification::Numeric(infer_numeric_role(
                            &numbers,
                            &self.settings,
                        ));
                    }
                }
                SemanticType::Text => return Classification::Text,
            }
        }

        Classification::Text
    }

    /// Identifier by name, or by near-unique single-token codes.
    fn is_identifier(&self, col_name: &str, present: &[&str], total_rows: usize) -> bool {
        if has_id_like_name(col_name) {
            return true;
        }

        if present.len() < 2 {
            return false;
        }

        let token_like = present.iter().all(|v| {
            !v.is_empty()
                && !v.chars().any(char::is_whitespace)
                && !is_numeric_value(v)
                && !is_date_value(v)
        });
        if !token_like {
            return false;
        }

        let unique_count = present.iter().collect::<HashSet<_>>().len();
        unique_count as f64 / total_rows as f64 >= self.settings.id_unique_ratio
    }
}

/// Parse every value as a number; `None` if any value fails.
fn parse_all_numeric(values: &[&str]) -> Option<Vec<f64>> {
    values.iter().map(|v| parse_numeric_value(v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NumericRole;

    fn classify(name: &str, values: &[Option<&str>]) -> Classification {
        ColumnClassifier::default().classify_values(name, values)
    }

    fn present<'a>(values: &[&'a str]) -> Vec<Option<&'a str>> {
        values.iter().map(|v| Some(*v)).collect()
    }

    // ==================== precedence tests ====================

    #[test]
    fn test_precedence_order() {
        assert_eq!(
            PRECEDENCE,
            [
                SemanticType::Id,
                SemanticType::Date,
                SemanticType::Numeric,
                SemanticType::Text
            ]
        );
    }

    #[test]
    fn test_id_name_beats_numeric_content() {
        let values = present(&["1", "2", "3"]);
        assert_eq!(classify("id", &values), Classification::Identifier);
        assert_eq!(classify("customerID", &values), Classification::Identifier);
    }

    #[test]
    fn test_id_name_beats_date_content() {
        let values = present(&["2020-01-01", "2021-01-01"]);
        assert_eq!(classify("event_id", &values), Classification::Identifier);
        assert_eq!(classify("event", &values), Classification::Date);
    }

    #[test]
    fn test_all_missing_is_text() {
        assert_eq!(classify("notes", &[None, None]), Classification::Text);
        assert_eq!(classify("user_id", &[None, None]), Classification::Text);
        assert_eq!(classify("empty", &[]), Classification::Text);
    }

    // ==================== identifier tests ====================

    #[test]
    fn test_unique_codes_are_identifiers() {
        let values = present(&["AB-1001", "AB-1002", "AB-1003", "AB-1004"]);
        assert_eq!(classify("sku", &values), Classification::Identifier);
    }

    #[test]
    fn test_repeated_codes_are_not_identifiers() {
        let values = present(&["red", "blue", "red", "green"]);
        assert_eq!(classify("color", &values), Classification::Text);
    }

    #[test]
    fn test_unique_phrases_are_not_identifiers() {
        let values = present(&["hello world", "good bye"]);
        assert_eq!(classify("greeting", &values), Classification::Text);
    }

    #[test]
    fn test_single_value_is_not_content_identifier() {
        assert_eq!(classify("code", &present(&["X1"])), Classification::Text);
    }

    #[test]
    fn test_unique_ratio_counts_missing_rows() {
        // Calibration point: 0.95 unique ratio over all rows.
        let values = vec![Some("a1"), Some("b2"), None, None];
        assert_eq!(classify("code", &values), Classification::Text);
    }

    // ==================== date tests ====================

    #[test]
    fn test_date_column() {
        let values = vec![Some("2020-01-01"), None, Some("2021-06-15")];
        assert_eq!(classify("joined", &values), Classification::Date);
    }

    #[test]
    fn test_one_bad_date_falls_back_to_text() {
        let values = present(&["2020-01-01", "2020-01-01", "soon"]);
        assert_eq!(classify("joined", &values), Classification::Text);
    }

    #[test]
    fn test_year_numbers_are_not_dates() {
        let values = present(&["2019", "2020", "2021"]);
        assert_eq!(
            classify("year", &values),
            Classification::Numeric(NumericRole::Discrete)
        );
    }

    // ==================== numeric tests ====================

    #[test]
    fn test_numeric_discrete() {
        let values = present(&["10", "20", "10"]);
        assert_eq!(
            classify("price", &values),
            Classification::Numeric(NumericRole::Discrete)
        );
    }

    #[test]
    fn test_numeric_continuous() {
        let owned: Vec<String> = (0..30).map(|i| format!("{}.25", i)).collect();
        let values: Vec<Option<&str>> = owned.iter().map(|s| Some(s.as_str())).collect();
        assert_eq!(
            classify("weight", &values),
            Classification::Numeric(NumericRole::Continuous)
        );
    }

    #[test]
    fn test_numeric_tolerates_whitespace_and_missing() {
        let values = vec![Some(" 1.5"), None, Some("2.5 ")];
        assert_eq!(classify("x", &values).data_type(), SemanticType::Numeric);
    }

    #[test]
    fn test_mixed_numeric_and_text_is_text() {
        let values = present(&["1", "2", "three", "4"]);
        assert_eq!(classify("amount", &values), Classification::Text);
    }

    // ==================== purity tests ====================

    #[test]
    fn test_classify_is_pure() {
        let classifier = ColumnClassifier::default();
        let values = present(&["10", "x", "2020-01-01"]);
        let first = classifier.classify_values("mixed", &values);
        for _ in 0..5 {
            assert_eq!(classifier.classify_values("mixed", &values), first);
        }
    }

    #[test]
    fn test_classify_series() {
        let series = Series::new("price".into(), &[Some("1"), None, Some("3")]);
        let classification = ColumnClassifier::default()
            .classify("price", &series)
            .unwrap();
        assert_eq!(classification, Classification::Numeric(NumericRole::Discrete));
    }
}
