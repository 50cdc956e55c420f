//! Per-column processing and output assembly.
//!
//! Columns are processed independently as an ordered map, then
//! concatenated in their original order.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::processors::{DateProcessor, LanguageResources, NumericProcessor, TextProcessor};
use crate::types::{Classification, ColumnProfile, ProcessedColumnGroup};
use polars::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Dispatches each column to the processor selected by its profile.
#[derive(Debug, Clone)]
pub struct ColumnExecutor {
    numeric: NumericProcessor,
    date: DateProcessor,
    text: TextProcessor,
}

impl ColumnExecutor {
    pub fn new(config: &PipelineConfig, resources: Arc<LanguageResources>) -> Self {
        Self {
            numeric: NumericProcessor::new(config.numeric_imputation),
            date: DateProcessor::new(),
            text: TextProcessor::new(resources, config.tfidf_settings()),
        }
    }

    /// Process one column. Identifiers pass through unchanged.
    pub fn process_column(
        &self,
        series: &Series,
        profile: &ColumnProfile,
    ) -> Result<ProcessedColumnGroup> {
        let name = series.name().to_string();
        let group = match profile.classification() {
            Classification::Identifier => ProcessedColumnGroup::single(name, series.clone()),
            Classification::Date => ProcessedColumnGroup::single(name, self.date.process(series)?),
            Classification::Numeric(role) => {
                ProcessedColumnGroup::single(name, self.numeric.process(series, role)?)
            }
            Classification::Text => {
                let features = self.text.process(series)?;
                ProcessedColumnGroup {
                    source: name,
                    columns: features.columns,
                    vocabulary: Some(features.report),
                }
            }
        };
        Ok(group)
    }

    /// Process every column in order, stopping at the first failure.
    ///
    /// `profiles[i]` must describe the `i`-th column of `df`. `on_column` is
    /// called before each column with its index.
    pub fn process_all<F>(
        &self,
        df: &DataFrame,
        profiles: &[ColumnProfile],
        on_column: F,
    ) -> Result<Vec<ProcessedColumnGroup>>
    where
        F: Fn(usize, &str),
    {
        df.get_columns()
            .iter()
            .zip(profiles)
            .enumerate()
            .map(|(i, (col, profile))| {
                let series = col.as_materialized_series();
                on_column(i, series.name().as_str());
                let group = self
                    .process_column(series, profile)
                    .map_err(|e| e.in_column(series.name().as_str()))?;
                debug!(
                    "Column '{}' ({}) -> {} output column(s)",
                    group.source,
                    profile.classification(),
                    group.width()
                );
                Ok(group)
            })
            .collect()
    }

    /// Concatenate processed groups into one table of `height` rows, in group order.
    ///
    /// A name already taken by an earlier column gets the first free
    /// `_1`, `_2`, ... suffix. With no columns at all the table still keeps
    /// its row count.
    pub fn assemble(groups: Vec<ProcessedColumnGroup>, height: usize) -> Result<DataFrame> {
        let mut seen = HashSet::new();
        let mut columns = Vec::new();

        for group in groups {
            for mut series in group.columns {
                let name = series.name().to_string();
                if !seen.insert(name.clone()) {
                    let renamed = (1..)
                        .map(|k| format!("{}_{}", name, k))
                        .find(|candidate| !seen.contains(candidate))
                        .unwrap_or_default();
                    warn!(
                        "Column '{}': output name '{}' already taken, renamed to '{}'",
                        group.source, name, renamed
                    );
                    seen.insert(renamed.clone());
                    series.rename(renamed.into());
                }
                columns.push(Column::from(series));
            }
        }

        if columns.is_empty() {
            return Ok(DataFrame::empty_with_height(height));
        }
        Ok(DataFrame::new(columns)?)
    }
}
