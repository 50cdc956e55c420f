//! Text column feature extraction.
//!
//! Cells are cleaned (lowercase, numbers spelled out, punctuation and
//! stopwords removed, nouns lemmatized) and then vectorized with TF-IDF. Each
//! retained term becomes one `{column}_{term}` feature column.

mod cleaning;
mod lemmatizer;
mod numbers;
mod resources;
mod tfidf;

pub use cleaning::{clean_text, tokenize};
pub use lemmatizer::Lemmatizer;
pub use numbers::{digits_to_words, number_to_words};
pub use resources::LanguageResources;
pub use tfidf::{TfidfMatrix, TfidfVectorizer};

use crate::config::TfidfSettings;
use crate::error::Result;
use crate::types::VocabularyReport;
use crate::utils::string_cells;
use polars::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Feature columns and vocabulary statistics of one text column.
#[derive(Debug, Clone)]
pub struct TextFeatures {
    pub columns: Vec<Series>,
    pub report: VocabularyReport,
}

/// Turns free-text columns into TF-IDF features.
#[derive(Debug, Clone)]
pub struct TextProcessor {
    resources: Arc<LanguageResources>,
    settings: TfidfSettings,
}

impl TextProcessor {
    pub fn new(resources: Arc<LanguageResources>, settings: TfidfSettings) -> Self {
        Self {
            resources,
            settings,
        }
    }

    /// Clean a single cell.
    pub fn clean_text(&self, text: &str) -> String {
        clean_text(text, &self.resources)
    }

    /// Clean every cell; missing cells become empty strings.
    pub fn clean_column(&self, series: &Series) -> Result<Vec<String>> {
        Ok(string_cells(series)?
            .into_iter()
            .map(|cell| cell.map(|text| self.clean_text(text)).unwrap_or_default())
            .collect())
    }

    /// Clean and vectorize a text column.
    pub fn process(&self, series: &Series) -> Result<TextFeatures> {
        let name = series.name().as_str();
        let cleaned = self.clean_column(series)?;

        let original_unique_words = cleaned
            .iter()
            .flat_map(|doc| doc.split_whitespace())
            .collect::<HashSet<_>>()
            .len();
        let max_features = original_unique_words.min(self.settings.max_features);

        let matrix = TfidfVectorizer::new(self.settings)
            .with_max_features(max_features)
            .fit_transform(&cleaned);

        let columns: Vec<Series> = matrix
            .terms
            .iter()
            .enumerate()
            .map(|(j, term)| Series::new(format!("{}_{}", name, term).into(), matrix.column(j)))
            .collect();

        let report = VocabularyReport {
            column: name.to_string(),
            original_unique_words,
            selected_feature_count: columns.len(),
        };

        info!(
            "TF-IDF transformation for column '{}': {} original unique words, {} selected features",
            name, report.original_unique_words, report.selected_feature_count
        );
        if columns.is_empty() {
            debug!("Column '{}': no term passed the document frequency filters", name);
        }

        Ok(TextFeatures { columns, report })
    }
}
