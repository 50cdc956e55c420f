//! Report generation module.
//!
//! This module saves processed datasets and builds [`PipelineReport`]s for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use autoprep::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report(&output, Some(Path::new("data/train.csv")));
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! let generator = ReportGenerator::new("output", "processed_data");
//! generator.write_report(&report, "train")?;
//! ```

mod generator;

pub use generator::{PipelineReport, ReportGenerator};
