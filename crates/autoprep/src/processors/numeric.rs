//! Numeric column scaling.

use crate::config::NumericImputation;
use crate::error::{PreprocessingError, Result};
use crate::imputers::StatisticalImputer;
use crate::types::NumericRole;
use crate::utils::{parse_numeric_value, string_cells};
use polars::prelude::*;
use tracing::warn;

/// Rescales numeric columns according to their role.
#[derive(Debug, Clone, Copy, Default)]
pub struct NumericProcessor {
    imputation: NumericImputation,
}

impl NumericProcessor {
    pub fn new(imputation: NumericImputation) -> Self {
        Self { imputation }
    }

    /// Parse, impute and scale a string column.
    ///
    /// `Continuous` columns are standardized, `Discrete` columns are min-max
    /// scaled. The output keeps the column name and row count.
    pub fn process(&self, series: &Series, role: NumericRole) -> Result<Series> {
        let name = series.name();
        let parsed = string_cells(series)?
            .into_iter()
            .map(|cell| match cell {
                None => Ok(None),
                Some(raw) => parse_numeric_value(raw)
                    .map(Some)
                    .ok_or_else(|| PreprocessingError::parse(name.as_str(), raw, "numeric")),
            })
            .collect::<Result<Vec<Option<f64>>>>()?;

        let imputed = StatisticalImputer::impute(&parsed, self.imputation);
        if imputed.filled > 0 {
            warn!(
                "Column '{}': imputed {} missing values with {:?} ({})",
                name, imputed.filled, self.imputation, imputed.fill_value
            );
        }

        let scaled = self.scale(&imputed.values, role);
        if is_degenerate(&scaled) {
            warn!("Column '{}': {:?} column has no spread, mapped to zeros", name, role);
        }

        Ok(Series::new(name.clone(), scaled))
    }

    /// Scale already-parsed values.
    pub fn scale(&self, values: &[f64], role: NumericRole) -> Vec<f64> {
        match role {
            NumericRole::Continuous => standardize(values),
            NumericRole::Discrete => min_max_scale(values),
        }
    }
}

/// Standardize to zero mean and unit sample standard deviation.
///
/// Constant columns and columns with fewer than two values map to zeros.
pub fn standardize(values: &[f64]) -> Vec<f64> {
    // Divide by the largest magnitude first so squared deviations stay finite
    let max_abs = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
    if values.len() < 2 || max_abs == 0.0 || !max_abs.is_finite() {
        return vec![0.0; values.len()];
    }

    let reduced: Vec<f64> = values.iter().map(|v| v / max_abs).collect();
    let ca = Float64Chunked::from_slice("values".into(), &reduced);
    if ca.min() == ca.max() {
        return vec![0.0; values.len()];
    }
    let (Some(mean), Some(std)) = (ca.mean(), ca.std(1)) else {
        return vec![0.0; values.len()];
    };
    if std == 0.0 || !std.is_finite() {
        return vec![0.0; values.len()];
    }
    reduced.iter().map(|v| (v - mean) / std).collect()
}

/// Min-max scale to [0, 1]. A zero range maps to zeros.
pub fn min_max_scale(values: &[f64]) -> Vec<f64> {
    let ca = Float64Chunked::from_slice("values".into(), values);
    let (Some(min), Some(max)) = (ca.min(), ca.max()) else {
        return Vec::new();
    };
    if min == max || !min.is_finite() || !max.is_finite() {
        return vec![0.0; values.len()];
    }

    // Halved operands keep the range finite for values near f64::MAX
    let half_min = min / 2.0;
    let half_range = max / 2.0 - half_min;
    values.iter().map(|v| (v / 2.0 - half_min) / half_range).collect()
}

/// A non-empty output that is zero everywhere.
pub(crate) fn is_degenerate(scaled: &[f64]) -> bool {
    !scaled.is_empty() && scaled.iter().all(|v| *v == 0.0)
}
