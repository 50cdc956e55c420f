use crate::error::Result;
use crate::types::{ColumnProfile, PipelineOutput, PipelineSummary, VocabularyReport};
use chrono::{Local, NaiveDateTime};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// Report Types
// ============================================================================

/// Report of one pipeline run, for `--json` output and report files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file, when the data came from a file
    pub input_file: Option<String>,
    /// Path to the written dataset, when it was saved
    pub output_file: Option<String>,
    pub summary: PipelineSummary,
    pub profiles: Vec<ColumnProfile>,
    /// One entry per text column
    pub vocabulary: Vec<VocabularyReport>,
}

// ============================================================================
// Report Generator
// ============================================================================

/// Writes processed datasets and reports to an output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
    output_name: String,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            output_name: "processed_data".to_string(),
        }
    }
}

impl ReportGenerator {
    /// Create a new ReportGenerator with custom output settings.
    pub fn new(output_dir: impl Into<PathBuf>, output_name: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            output_name: output_name.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Timestamp-qualified dataset file name, e.g. `processed_data_20240115_103000.csv`.
    pub fn output_file_name(&self, timestamp: &NaiveDateTime) -> String {
        format!(
            "{}_{}.csv",
            self.output_name,
            timestamp.format("%Y%m%d_%H%M%S")
        )
    }

    /// Save the dataset as CSV under a timestamped name.
    pub fn save_dataset(&self, df: &mut DataFrame) -> Result<PathBuf> {
        let file_name = self.output_file_name(&Local::now().naive_local());
        self.save_dataset_as(df, &file_name)
    }

    /// Save the dataset as CSV under `file_name` in the output directory.
    pub fn save_dataset_as(&self, df: &mut DataFrame, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let output_path = self.output_dir.join(file_name);
        let mut file = File::create(&output_path)?;

        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)?;

        info!("Dataset saved: {}", output_path.display());
        Ok(output_path)
    }

    /// Build the report of a finished run.
    pub fn build_report(output: &PipelineOutput, input_file: Option<&Path>) -> PipelineReport {
        PipelineReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.map(|p| p.display().to_string()),
            output_file: output
                .output_path
                .as_ref()
                .map(|p| p.display().to_string()),
            summary: output.summary.clone(),
            profiles: output.profiles.clone(),
            vocabulary: output.vocabulary.clone(),
        }
    }

    /// Write the report as pretty JSON to `{base_name}_report.json`.
    pub fn write_report(&self, report: &PipelineReport, base_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_report.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }
}
