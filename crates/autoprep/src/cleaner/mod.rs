//! Data cleaning module for preprocessing datasets.
//!
//! This module provides functionality for:
//! - Normalizing every column to text and mapping null markers to missing
//! - Removing exact-duplicate rows while preserving row order

use crate::error::Result;
use crate::utils::{is_null_marker, string_cells};
use polars::prelude::*;
use tracing::debug;

/// Data cleaner for the row- and cell-level cleaning steps.
pub struct DataCleaner;

impl DataCleaner {
    /// Cast every column to text and replace null-marker cells with missing.
    ///
    /// Markers match whole cells exactly; every other token is kept as is.
    pub fn normalize_null_markers(df: &DataFrame, markers: &[String]) -> Result<DataFrame> {
        let mut columns = Vec::with_capacity(df.width());
        let mut replaced_total = 0usize;

        for col in df.get_columns() {
            let series = col.as_materialized_series().cast(&DataType::String)?;
            let cells = string_cells(&series)?;

            let mut replaced = 0usize;
            let normalized: Vec<Option<&str>> = cells
                .into_iter()
                .map(|cell| match cell {
                    Some(value) if is_null_marker(value, markers) => {
                        replaced += 1;
                        None
                    }
                    other => other,
                })
                .collect();

            if replaced > 0 {
                debug!("Column '{}': {} null markers replaced", series.name(), replaced);
            }
            replaced_total += replaced;

            columns.push(Column::from(Series::new(series.name().clone(), normalized)));
        }

        debug!("Replaced {} null marker cells in total", replaced_total);
        Ok(DataFrame::new(columns)?)
    }

    /// Remove exact-duplicate rows, keeping the first occurrence in order.
    ///
    /// Rows are compared cell by cell; a missing cell equals another missing
    /// cell. Returns the deduplicated frame and the number of rows removed.
    pub fn remove_duplicates(df: &DataFrame) -> Result<(DataFrame, usize)> {
        let height = df.height();
        if height == 0 || df.width() == 0 {
            return Ok((df.clone(), 0));
        }

        let deduplicated = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let removed = height - deduplicated.height();
        if removed == 0 {
            return Ok((df.clone(), 0));
        }
        debug!("Removed {} duplicate rows", removed);

        Ok((deduplicated, removed))
    }
}
