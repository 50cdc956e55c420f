//! Bag-of-words TF-IDF vectorization.
//!
//! Terms are runs of two or more word characters. Weights are raw counts
//! times the smoothed inverse document frequency `ln((1 + n) / (1 + df)) + 1`,
//! and every row is L2-normalized.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashMap};

use crate::config::TfidfSettings;

static TERM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\w\w+\b").expect("Invalid regex: term pattern"));

/// Fitted vocabulary and the weighted document-term matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct TfidfMatrix {
    /// Retained terms in alphabetical order.
    pub terms: Vec<String>,
    /// `idf[j]` belongs to `terms[j]`.
    pub idf: Vec<f64>,
    /// One row per document, one value per term.
    pub rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    fn empty(n_docs: usize) -> Self {
        Self {
            terms: Vec::new(),
            idf: Vec::new(),
            rows: vec![Vec::new(); n_docs],
        }
    }

    /// Values of the `j`-th term across all documents.
    pub fn column(&self, j: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[j]).collect()
    }
}

/// Document-frequency filtered TF-IDF vectorizer.
#[derive(Debug, Clone, Copy)]
pub struct TfidfVectorizer {
    min_df: usize,
    max_df: f64,
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(settings: TfidfSettings) -> Self {
        Self {
            min_df: settings.min_df,
            max_df: settings.max_df,
            max_features: settings.max_features,
        }
    }

    /// Cap the vocabulary at `max_features` terms.
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Extract the terms of one document, lowercased.
    pub fn terms(document: &str) -> Vec<String> {
        TERM_PATTERN
            .find_iter(document)
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }

    /// Learn the vocabulary from `documents` and weight them.
    ///
    /// Yields a matrix without terms when nothing survives the document
    /// frequency filters.
    pub fn fit_transform<S: AsRef<str>>(&self, documents: &[S]) -> TfidfMatrix {
        let n_docs = documents.len();
        let max_doc_count = self.max_df * n_docs as f64;
        if n_docs == 0 || self.max_features == 0 || max_doc_count < self.min_df as f64 {
            return TfidfMatrix::empty(n_docs);
        }

        let counts: Vec<HashMap<String, usize>> = documents
            .iter()
            .map(|doc| {
                let mut tf = HashMap::new();
                for term in Self::terms(doc.as_ref()) {
                    *tf.entry(term).or_insert(0) += 1;
                }
                tf
            })
            .collect();

        // term -> (document frequency, total count), ordered by term
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for tf in &counts {
            for (term, count) in tf {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count;
            }
        }

        let mut eligible: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .filter(|(_, (df, _))| *df >= self.min_df && (*df as f64) <= max_doc_count)
            .map(|(term, (df, total))| (term, df, total))
            .collect();

        if eligible.len() > self.max_features {
            // Stable sort keeps alphabetical order among equal totals
            eligible.sort_by(|a, b| b.2.cmp(&a.2));
            eligible.truncate(self.max_features);
            eligible.sort_by(|a, b| a.0.cmp(b.0));
        }

        if eligible.is_empty() {
            return TfidfMatrix::empty(n_docs);
        }

        let terms: Vec<String> = eligible.iter().map(|(term, _, _)| term.to_string()).collect();
        let idf: Vec<f64> = eligible
            .iter()
            .map(|(_, df, _)| ((1.0 + n_docs as f64) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|tf| {
                let mut row: Vec<f64> = terms
                    .iter()
                    .zip(&idf)
                    .map(|(term, w)| tf.get(term).copied().unwrap_or(0) as f64 * w)
                    .collect();
                let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
                if norm > 0.0 {
                    row.iter_mut().for_each(|v| *v /= norm);
                }
                row
            })
            .collect();

        TfidfMatrix { terms, idf, rows }
    }
}
