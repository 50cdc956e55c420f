//! Shared utilities for the preprocessing pipeline.
//!
//! This module contains the cell-level parsing helpers used by both the
//! classifier and the processors, so that a column classified as numeric or
//! date is parsed by the processor with exactly the same grammar.

use crate::error::{Result, ResultExt};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;

// =============================================================================
// Missing Value Utilities
// =============================================================================

/// Null markers replaced with a missing value when no configuration is given.
pub const DEFAULT_NULL_MARKERS: [&str; 2] = ["NULL", "NONE"];

/// Check if a cell is one of the configured null markers (exact match).
pub fn is_null_marker(value: &str, markers: &[String]) -> bool {
    markers.iter().any(|marker| marker == value)
}

// =============================================================================
// Numeric Parsing Utilities
// =============================================================================

/// Parse a cell as a finite number.
///
/// Only surrounding whitespace is tolerated; currency symbols, thousands
/// separators, `NaN` and infinities are rejected.
pub fn parse_numeric_value(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Check if a cell can be parsed as a finite number.
pub fn is_numeric_value(s: &str) -> bool {
    parse_numeric_value(s).is_some()
}

/// Check if a parsed number has no fractional part.
#[inline]
pub fn is_integral(value: f64) -> bool {
    value.fract() == 0.0
}

// =============================================================================
// Date Parsing Utilities
// =============================================================================

const DATETIME_FORMATS: [&str; 11] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S", // US
    "%m/%d/%Y %H:%M",
    "%d-%b-%Y %H:%M:%S", // 15-Jan-2024 10:30:00
    "%d-%b-%Y %H:%M",
];

const DATE_FORMATS: [&str; 11] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",  // US first: 01/15/2024
    "%d/%m/%Y",  // European: 15/01/2024
    "%d-%m-%Y",  // 15-01-2024
    "%d.%m.%Y",  // German: 15.01.2024
    "%d-%b-%Y",  // 15-Jan-2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
];

/// Parse a cell under the date grammar.
///
/// Values with an explicit offset are converted to UTC; naive values are
/// taken as UTC. Purely numeric strings are never dates.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for fmt in &DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }

    for fmt in &DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Check if a cell parses under the date grammar.
pub fn is_date_value(s: &str) -> bool {
    parse_datetime(s).is_some()
}

/// Milliseconds since the Unix epoch of a naive (UTC) timestamp.
#[inline]
pub fn timestamp_millis(dt: &NaiveDateTime) -> i64 {
    dt.and_utc().timestamp_millis()
}

// =============================================================================
// Series Utilities
// =============================================================================

/// Borrow the cells of a string Series.
pub fn string_cells(series: &Series) -> PolarsResult<Vec<Option<&str>>> {
    Ok(series.str()?.into_iter().collect())
}

// =============================================================================
// I/O Utilities
// =============================================================================

/// Load a CSV file with a header row, reading every column as text.
///
/// Empty fields are missing. No schema inference is done so that cells
/// reach the classifier exactly as written.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .context(format!("Failed to load CSV '{}'", path.display()))
}

// =============================================================================
// Tests
// =============================================================================
