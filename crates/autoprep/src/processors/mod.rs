//! Per-type column processors.
//!
//! Each processor maps one string column to its machine-learning-ready
//! representation without changing the row count:
//! - [`NumericProcessor`]: standardization or min-max scaling
//! - [`DateProcessor`]: timestamp normalization to [0, 1]
//! - [`TextProcessor`]: text cleaning and TF-IDF features

mod date;
mod numeric;
pub mod text;

pub use date::DateProcessor;
pub use numeric::{NumericProcessor, min_max_scale, standardize};
pub use text::{LanguageResources, TextFeatures, TextProcessor};
