//! Imputation module for handling missing values.
//!
//! Numeric and date columns are imputed before scaling so that the processed
//! column keeps one value per row.

mod statistical;

pub use statistical::{Imputed, StatisticalImputer};
