//! Pipeline module.
//!
//! This module provides the main preprocessing pipeline and related components.

mod builder;
mod executor;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder};
pub use executor::ColumnExecutor;
pub use progress::{
    ClosureProgressReporter, PreprocessingStage, ProgressReporter, ProgressUpdate,
};
