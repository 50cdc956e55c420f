//! Date column normalization.

use crate::config::NumericImputation;
use crate::error::{PreprocessingError, Result};
use crate::imputers::StatisticalImputer;
use crate::utils::{parse_datetime, string_cells, timestamp_millis};
use polars::prelude::*;
use tracing::warn;

use super::numeric::{is_degenerate, min_max_scale};

/// Maps dates to their position within the column's time span.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateProcessor;

impl DateProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Parse every cell as a timestamp and scale to [0, 1].
    ///
    /// Missing cells take the median timestamp. A cell outside the date
    /// grammar fails the whole column.
    pub fn process(&self, series: &Series) -> Result<Series> {
        let name = series.name();
        let timestamps = string_cells(series)?
            .into_iter()
            .map(|cell| match cell {
                None => Ok(None),
                Some(raw) => parse_datetime(raw)
                    .map(|dt| Some(timestamp_millis(&dt) as f64))
                    .ok_or_else(|| PreprocessingError::parse(name.as_str(), raw, "date")),
            })
            .collect::<Result<Vec<Option<f64>>>>()?;

        let imputed = StatisticalImputer::impute(&timestamps, NumericImputation::Median);
        if imputed.filled > 0 {
            warn!(
                "Column '{}': imputed {} missing dates with the median timestamp",
                name, imputed.filled
            );
        }

        let scaled = min_max_scale(&imputed.values);
        if is_degenerate(&scaled) {
            warn!("Column '{}': every date is the same instant, mapped to zeros", name);
        }
        Ok(Series::new(name.clone(), scaled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values_of(series: &Series) -> Vec<f64> {
        series.f64().unwrap().into_no_null_iter().collect()
    }

    #[test]
    fn test_two_dates_scale_to_zero_and_one() {
        let series = Series::new("joined".into(), &["2020-01-01", "2021-01-01"]);
        let out = DateProcessor::new().process(&series).unwrap();
        assert_eq!(out.name().as_str(), "joined");
        assert_eq!(values_of(&out), vec![0.0, 1.0]);
    }

    #[test]
    fn test_mixed_formats_share_one_timeline() {
        let series = Series::new("d".into(), &["2020-01-01", "01/03/2020", "2020-01-02T00:00:00"]);
        let out = values_of(&DateProcessor::new().process(&series).unwrap());
        assert_eq!(out[0], 0.0);
        assert_eq!(out[1], 1.0);
        assert!((out[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_single_distinct_date_is_zero() {
        let series = Series::new("d".into(), &["2022-05-05", "2022-05-05", "2022-05-05"]);
        let out = DateProcessor::new().process(&series).unwrap();
        assert_eq!(values_of(&out), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_missing_dates_take_median() {
        let series = Series::new(
            "d".into(),
            &[Some("2020-01-01"), None, Some("2020-01-03"), Some("2020-01-05")],
        );
        let out = values_of(&DateProcessor::new().process(&series).unwrap());
        assert_eq!(out.len(), 4);
        assert!((out[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unparseable_date_fails_column() {
        let series = Series::new("joined".into(), &["2020-01-01", "someday"]);
        let err = DateProcessor::new().process(&series).unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert_eq!(err.column(), Some("joined"));
    }
}
