//! Statistical imputation methods.
//!
//! Provides median, mean and constant imputation over parsed column values.

use crate::config::NumericImputation;
use polars::prelude::*;

/// A column with every missing value filled.
#[derive(Debug, Clone, PartialEq)]
pub struct Imputed {
    pub values: Vec<f64>,
    /// The value written into missing slots.
    pub fill_value: f64,
    /// Number of slots that were missing.
    pub filled: usize,
}

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Compute the fill value from the non-null values of `series`.
    ///
    /// A column without present values fills with 0.
    pub fn fill_value(series: &Series, strategy: NumericImputation) -> f64 {
        match strategy {
            NumericImputation::Median => series.median().unwrap_or(0.0),
            NumericImputation::Mean => series.mean().unwrap_or(0.0),
            NumericImputation::Zero => 0.0,
        }
    }

    /// Fill every `None` with the statistic of the present values.
    pub fn impute(values: &[Option<f64>], strategy: NumericImputation) -> Imputed {
        let series = Series::new("values".into(), values);
        let fill_value = Self::fill_value(&series, strategy);

        Imputed {
            values: values.iter().map(|v| v.unwrap_or(fill_value)).collect(),
            fill_value,
            filled: series.null_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_imputation() {
        let imputed = StatisticalImputer::impute(
            &[Some(1.0), None, Some(3.0), Some(10.0)],
            NumericImputation::Median,
        );
        assert_eq!(imputed.values, vec![1.0, 3.0, 3.0, 10.0]);
        assert_eq!(imputed.fill_value, 3.0);
        assert_eq!(imputed.filled, 1);
    }

    #[test]
    fn test_mean_imputation() {
        let imputed =
            StatisticalImputer::impute(&[Some(1.0), None, Some(5.0)], NumericImputation::Mean);
        assert_eq!(imputed.values, vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn test_zero_imputation() {
        let imputed =
            StatisticalImputer::impute(&[None, Some(7.0)], NumericImputation::Zero);
        assert_eq!(imputed.values, vec![0.0, 7.0]);
    }

    #[test]
    fn test_no_present_values_fills_zero() {
        let imputed = StatisticalImputer::impute(&[None, None], NumericImputation::Median);
        assert_eq!(imputed.values, vec![0.0, 0.0]);
        assert_eq!(imputed.filled, 2);
    }

    #[test]
    fn test_median_of_even_count_averages_middle_pair() {
        let series = Series::new("x".into(), &[4.0, 1.0, 2.0, 3.0]);
        assert_eq!(
            StatisticalImputer::fill_value(&series, NumericImputation::Median),
            2.5
        );
    }

    #[test]
    fn test_nothing_missing() {
        let imputed = StatisticalImputer::impute(&[Some(2.0)], NumericImputation::Mean);
        assert_eq!(imputed.filled, 0);
        assert_eq!(imputed.values, vec![2.0]);
    }
}
