//! Main preprocessing pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the preprocessing workflow.

use crate::cleaner::DataCleaner;
use crate::config::PipelineConfig;
use crate::error::{PreprocessingError, Result};
use crate::pipeline::ColumnExecutor;
use crate::pipeline::progress::{
    ClosureProgressReporter, PreprocessingStage, ProgressReporter, ProgressUpdate,
};
use crate::processors::LanguageResources;
use crate::profiler::DataProfiler;
use crate::reporting::ReportGenerator;
use crate::types::{ColumnProfile, DatasetAnalysis, PipelineOutput, PipelineSummary};
use polars::prelude::*;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// The main preprocessing pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use autoprep::{Pipeline, PipelineConfig};
///
/// let output = Pipeline::builder()
///     .config(PipelineConfig::builder().save_to_disk(true).build()?)
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()?
///     .process(dataframe)?;
///
/// println!("{} -> {} columns", output.summary.initial_columns, output.summary.final_columns);
/// ```
pub struct Pipeline {
    config: PipelineConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    executor: ColumnExecutor,
    reporter: ReportGenerator,
}

// Pipelines can be shared between threads
static_assertions::assert_impl_all!(Pipeline: Send, Sync);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Classify and process every column of `df`.
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for a table without rows or columns, and the
    /// first column failure otherwise. Nothing is persisted on failure.
    pub fn process(&self, df: DataFrame) -> Result<PipelineOutput> {
        self.finish(self.process_internal(df, None))
    }

    /// Like [`process`](Self::process), with caller-supplied profiles in
    /// place of classification. Every column needs a profile.
    pub fn process_with_profiles(
        &self,
        df: DataFrame,
        profiles: &[ColumnProfile],
    ) -> Result<PipelineOutput> {
        self.finish(self.process_internal(df, Some(profiles)))
    }

    /// Classify every column and count duplicates without processing.
    pub fn analyze(&self, df: &DataFrame) -> Result<DatasetAnalysis> {
        Self::ensure_not_empty(df)?;
        let normalized = DataCleaner::normalize_null_markers(df, &self.config.null_markers)?;
        let profiles =
            DataProfiler::profile_dataset(&normalized, &self.config.classifier_settings())?;
        let (_, duplicate_rows) = DataCleaner::remove_duplicates(&normalized)?;

        Ok(DatasetAnalysis {
            rows: df.height(),
            columns: df.width(),
            duplicate_rows,
            profiles,
        })
    }

    fn finish(&self, result: Result<PipelineOutput>) -> Result<PipelineOutput> {
        match result {
            Ok(output) => {
                self.report_progress(ProgressUpdate::complete("Pipeline completed successfully"));
                Ok(output)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn ensure_not_empty(df: &DataFrame) -> Result<()> {
        if df.height() == 0 || df.width() == 0 {
            return Err(PreprocessingError::EmptyInput {
                rows: df.height(),
                columns: df.width(),
            });
        }
        Ok(())
    }

    fn process_internal(
        &self,
        df: DataFrame,
        supplied_profiles: Option<&[ColumnProfile]>,
    ) -> Result<PipelineOutput> {
        let start_time = Instant::now();

        info!("Starting preprocessing pipeline...");
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Initializing,
            0.0,
            "Starting preprocessing pipeline...",
        ));

        // Step 0: Reject empty input
        Self::ensure_not_empty(&df)?;
        let mut summary = PipelineSummary {
            initial_rows: df.height(),
            initial_columns: df.width(),
            ..Default::default()
        };
        info!("Input shape: {} rows x {} columns", df.height(), df.width());

        // Step 1: Null markers
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::NullNormalization,
            0.0,
            "Normalizing null markers...",
        ));
        info!("Step 1: Normalizing null markers {:?}...", self.config.null_markers);
        let df = DataCleaner::normalize_null_markers(&df, &self.config.null_markers)?;

        // Step 2: Classification
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Classification,
            0.0,
            "Classifying columns...",
        ));
        let profiles = match supplied_profiles {
            Some(profiles) => {
                info!("Step 2: Using {} supplied column profiles", profiles.len());
                Self::align_profiles(&df, profiles)?
            }
            None => {
                info!("Step 2: Classifying columns...");
                DataProfiler::profile_dataset(&df, &self.config.classifier_settings())?
            }
        };
        for profile in &profiles {
            debug!(
                "  {}: {} (missing: {}, unique: {})",
                profile.name,
                profile.classification(),
                profile.missing_count,
                profile.unique_count
            );
        }

        // Step 3: Deduplication
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Deduplication,
            0.0,
            "Removing duplicate rows...",
        ));
        let df = if self.config.remove_duplicates {
            info!("Step 3: Removing duplicate rows...");
            let (deduplicated, removed) = DataCleaner::remove_duplicates(&df)?;
            info!("Removed {} duplicate rows", removed);
            summary.duplicates_removed = removed;
            deduplicated
        } else {
            info!("Step 3: Skipping duplicate removal (disabled)");
            df
        };
        summary.final_rows = df.height();

        // Step 4: Per-column processing
        info!("Step 4: Processing {} columns...", df.width());
        let total = df.width();
        let groups = self.executor.process_all(&df, &profiles, |i, name| {
            self.report_progress(ProgressUpdate::with_items(
                PreprocessingStage::ColumnProcessing,
                format!("Column: {}", name),
                i,
                total,
                format!("Processing column '{}'", name),
            ));
        })?;
        let vocabulary = groups.iter().filter_map(|g| g.vocabulary.clone()).collect();

        // Step 5: Concatenate
        self.report_progress(ProgressUpdate::new(
            PreprocessingStage::Assembly,
            0.0,
            "Assembling output table...",
        ));
        info!("Step 5: Assembling output table...");
        let mut data = ColumnExecutor::assemble(groups, df.height())?;
        summary.final_columns = data.width();

        // Step 6: Summary
        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        info!(
            "Processed {} x {} -> {} x {} ({} duplicates removed)",
            summary.initial_rows,
            summary.initial_columns,
            summary.final_rows,
            summary.final_columns,
            summary.duplicates_removed
        );

        // Step 7: Persist
        let output_path = if self.config.save_to_disk {
            self.report_progress(ProgressUpdate::new(
                PreprocessingStage::Saving,
                0.0,
                "Saving output table...",
            ));
            info!("Step 7: Saving output table...");
            Some(self.reporter.save_dataset(&mut data)?)
        } else {
            None
        };

        Ok(PipelineOutput {
            data,
            profiles,
            summary,
            vocabulary,
            output_path,
        })
    }

    /// Order supplied profiles like the columns of `df`.
    fn align_profiles(df: &DataFrame, profiles: &[ColumnProfile]) -> Result<Vec<ColumnProfile>> {
        df.get_column_names()
            .into_iter()
            .map(|name| {
                profiles
                    .iter()
                    .find(|p| p.name == name.as_str())
                    .cloned()
                    .ok_or_else(|| PreprocessingError::ColumnNotFound(name.to_string()))
            })
            .collect()
    }
}

/// Builder for creating a [`Pipeline`] instance.
///
/// Use [`Pipeline::builder()`] to get started.
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<PipelineConfig>,
    language_resources: Option<Arc<LanguageResources>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: PipelineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use these language resources instead of the process-wide English ones.
    pub fn language_resources(mut self, resources: Arc<LanguageResources>) -> Self {
        self.language_resources = Some(resources);
        self
    }

    /// Set a progress reporter for receiving updates during processing.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    ///
    /// For more complex scenarios, use [`progress_reporter`](Self::progress_reporter).
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the pipeline.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the configuration fails validation.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let resources = self
            .language_resources
            .unwrap_or_else(LanguageResources::shared);

        Ok(Pipeline {
            executor: ColumnExecutor::new(&config, resources),
            reporter: ReportGenerator::new(config.output_dir.clone(), config.output_name.clone()),
            progress_reporter: self.progress_reporter,
            config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Classification, NumericRole, SemanticType};
    use std::sync::Mutex;

    fn scenario() -> DataFrame {
        df! {
            "id" => &["1", "2", "1"],
            "name" => &["Apple product", "Apple product", "Apple product"],
            "price" => &["10", "20", "10"],
            "joined" => &["2020-01-01", "2021-01-01", "2020-01-01"],
        }
        .unwrap()
    }

    fn f64_values(df: &DataFrame, name: &str) -> Vec<f64> {
        df.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_no_null_iter()
            .collect()
    }

    #[test]
    fn test_build_default() {
        let pipeline = Pipeline::builder().build().unwrap();
        assert_eq!(pipeline.config(), &PipelineConfig::default());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let config = PipelineConfig {
            text_max_df: 2.0,
            ..Default::default()
        };
        let err = Pipeline::builder().config(config).build().err().unwrap();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_scenario() {
        let output = Pipeline::builder().build().unwrap().process(scenario()).unwrap();

        assert_eq!(output.summary.initial_rows, 3);
        assert_eq!(output.summary.final_rows, 2);
        assert_eq!(output.summary.duplicates_removed, 1);
        assert_eq!(output.summary.initial_columns, 4);
        assert_eq!(output.summary.final_columns, 3);

        let names: Vec<String> = output
            .data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["id", "price", "joined"]);
        assert_eq!(f64_values(&output.data, "price"), vec![0.0, 1.0]);
        assert_eq!(f64_values(&output.data, "joined"), vec![0.0, 1.0]);

        assert_eq!(output.vocabulary.len(), 1);
        assert_eq!(output.vocabulary[0].column, "name");
        assert_eq!(output.vocabulary[0].selected_feature_count, 0);
        assert!(output.output_path.is_none());
    }

    #[test]
    fn test_keep_duplicates() {
        let config = PipelineConfig::builder()
            .remove_duplicates(false)
            .build()
            .unwrap();
        let output = Pipeline::builder()
            .config(config)
            .build()
            .unwrap()
            .process(scenario())
            .unwrap();
        assert_eq!(output.summary.final_rows, 3);
        assert_eq!(output.summary.duplicates_removed, 0);
    }

    #[test]
    fn test_empty_input() {
        let pipeline = Pipeline::builder().build().unwrap();

        let no_rows = DataFrame::new(vec![Column::new("a".into(), Vec::<String>::new())]).unwrap();
        let err = pipeline.process(no_rows).unwrap_err();
        assert!(matches!(err, PreprocessingError::EmptyInput { rows: 0, columns: 1 }));

        let err = pipeline.process(DataFrame::empty()).unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_INPUT");
    }

    #[test]
    fn test_text_only_table_without_features_keeps_row_count() {
        let pipeline = Pipeline::builder().build().unwrap();
        let df = df! { "notes" => &[Some("Apple product"), None, Some("Pear thing")] }.unwrap();

        let output = pipeline.process(df).unwrap();
        assert_eq!(output.summary.final_rows, 3);
        assert_eq!(output.data.height(), 3);
        assert_eq!(output.summary.final_columns, output.data.width());
    }

    #[test]
    fn test_all_missing_column_keeps_row_count() {
        let pipeline = Pipeline::builder().build().unwrap();
        let df = df! { "blank" => &[None::<&str>, None] }.unwrap();

        let output = pipeline.process(df).unwrap();
        assert_eq!(output.data.height(), output.summary.final_rows);
        assert_eq!(output.data.height(), 1);
    }

    #[test]
    fn test_supplied_profiles_override_classification() {
        let pipeline = Pipeline::builder().build().unwrap();
        let mut profiles = pipeline.analyze(&scenario()).unwrap().profiles;
        profiles.retain(|p| p.name != "id");
        profiles.push(ColumnProfile::new(
            "id",
            Classification::Numeric(NumericRole::Discrete),
            0,
            2,
        ));

        let output = pipeline.process_with_profiles(scenario(), &profiles).unwrap();
        assert_eq!(f64_values(&output.data, "id"), vec![0.0, 1.0]);
        assert_eq!(output.profiles[0].name, "id");
        assert_eq!(output.profiles[0].data_type, SemanticType::Numeric);
    }

    #[test]
    fn test_supplied_profiles_must_cover_every_column() {
        let pipeline = Pipeline::builder().build().unwrap();
        let profiles = vec![ColumnProfile::new("id", Classification::Identifier, 0, 2)];
        let err = pipeline.process_with_profiles(scenario(), &profiles).unwrap_err();
        assert!(matches!(err, PreprocessingError::ColumnNotFound(ref c) if c == "name"));
    }

    #[test]
    fn test_supplied_date_profile_on_bad_dates_fails_with_parse_error() {
        let pipeline = Pipeline::builder().build().unwrap();
        let df = df! { "joined" => &["2020-01-01", "later"] }.unwrap();
        let profiles = vec![ColumnProfile::new("joined", Classification::Date, 0, 2)];
        let err = pipeline.process_with_profiles(df, &profiles).unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
        assert_eq!(err.column(), Some("joined"));
    }

    #[test]
    fn test_analyze() {
        let analysis = Pipeline::builder().build().unwrap().analyze(&scenario()).unwrap();
        assert_eq!(analysis.rows, 3);
        assert_eq!(analysis.columns, 4);
        assert_eq!(analysis.duplicate_rows, 1);
        assert_eq!(analysis.profiles[2].data_type, SemanticType::Numeric);
    }

    #[test]
    fn test_progress_updates() {
        let stages = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&stages);
        Pipeline::builder()
            .on_progress(move |update| sink.lock().unwrap().push(update.stage))
            .build()
            .unwrap()
            .process(scenario())
            .unwrap();

        let stages = stages.lock().unwrap();
        assert_eq!(stages.first(), Some(&PreprocessingStage::Initializing));
        assert_eq!(stages.last(), Some(&PreprocessingStage::Complete));
        let columns = stages
            .iter()
            .filter(|s| **s == PreprocessingStage::ColumnProcessing)
            .count();
        assert_eq!(columns, 4);
    }

    #[test]
    fn test_save_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let config = PipelineConfig::builder()
            .output_dir(dir.path())
            .save_to_disk(true)
            .build()
            .unwrap();
        let output = Pipeline::builder()
            .config(config)
            .build()
            .unwrap()
            .process(scenario())
            .unwrap();

        let path = output.output_path.unwrap();
        assert!(path.exists());
        assert!(path.starts_with(dir.path()));
    }
}
