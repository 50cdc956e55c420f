//! CLI entry point for the column preprocessing pipeline.

use anyhow::{Context, Result, anyhow};
use autoprep::{
    DatasetAnalysis, NumericImputation, Pipeline, PipelineConfig, PipelineOutput, PipelineReport,
    ReportGenerator, load_csv,
};
use clap::{Parser, ValueEnum};
use polars::prelude::DataFrame;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// CLI-compatible numeric imputation strategy enum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliNumericImputation {
    /// Use the median of non-null values
    Median,
    /// Use the mean of non-null values
    Mean,
    /// Use zero as the fill value
    Zero,
}

impl From<CliNumericImputation> for NumericImputation {
    fn from(cli: CliNumericImputation) -> Self {
        match cli {
            CliNumericImputation::Median => NumericImputation::Median,
            CliNumericImputation::Mean => NumericImputation::Mean,
            CliNumericImputation::Zero => NumericImputation::Zero,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Column classification and feature preprocessing for CSV datasets",
    long_about = "Classifies every column of a CSV file as identifier, date, numeric or text \
                  and turns it into machine-learning-ready features.\n\n\
                  EXAMPLES:\n  \
                  # Basic usage\n  \
                  autoprep -i data.csv\n\n  \
                  # Custom output directory and name\n  \
                  autoprep -i data.csv -o results/ --output-name features\n\n  \
                  # Preview the column classification without processing\n  \
                  autoprep -i data.csv --dry-run\n\n  \
                  # Treat '?' and 'n/a' as missing\n  \
                  autoprep -i data.csv --null-marker '?' --null-marker n/a"
)]
struct Args {
    /// Path to the CSV file to process
    #[arg(short, long)]
    input: String,

    /// Output directory for results
    #[arg(short, long, default_value = "./output")]
    output: String,

    /// Output file name prefix (a timestamp is appended)
    ///
    /// If not specified, uses "processed_data"
    #[arg(long)]
    output_name: Option<String>,

    /// Preview the column classification without processing
    ///
    /// Shows the dataset shape, column profiles and duplicate count
    #[arg(long)]
    dry_run: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    /// Useful for piping to other tools: `... --json | jq .summary`
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,

    /// Keep exact duplicate rows
    #[arg(long)]
    keep_duplicates: bool,

    /// Numeric columns with fewer distinct values than this are discrete
    #[arg(long, default_value = "10")]
    discrete_threshold: usize,

    /// Maximum number of TF-IDF features per text column
    #[arg(long, default_value = "100")]
    max_features: usize,

    /// Minimum number of rows a TF-IDF term must appear in
    #[arg(long, default_value = "2")]
    min_df: usize,

    /// Maximum share of rows a TF-IDF term may appear in (0.0 - 1.0]
    #[arg(long, default_value = "0.95")]
    max_df: f64,

    /// Strategy for imputing missing numeric values
    #[arg(long, value_enum, default_value = "median")]
    numeric_imputation: CliNumericImputation,

    /// Cell value treated as missing (repeatable; replaces NULL and NONE)
    #[arg(long = "null-marker", value_name = "MARKER")]
    null_markers: Vec<String>,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    if !Path::new(&args.input).exists() {
        return Err(anyhow!("Input file not found: {}", args.input));
    }

    info!("Loading dataset from: {}", args.input);
    let data = load_csv(Path::new(&args.input))?;
    info!("Dataset loaded successfully: {:?}", data.shape());

    let config = build_config(&args)?;
    let pipeline = build_pipeline(&args, config)?;

    if args.dry_run {
        return run_dry_run(&args, &pipeline, &data);
    }

    run_pipeline(&pipeline, &args, data)
}

/// Translate CLI flags into a validated pipeline configuration.
fn build_config(args: &Args) -> Result<PipelineConfig> {
    let mut builder = PipelineConfig::builder()
        .output_dir(&args.output)
        .save_to_disk(true)
        .remove_duplicates(!args.keep_duplicates)
        .discrete_unique_threshold(args.discrete_threshold)
        .text_max_features(args.max_features)
        .text_min_df(args.min_df)
        .text_max_df(args.max_df)
        .numeric_imputation(args.numeric_imputation.into());

    if let Some(ref name) = args.output_name {
        builder = builder.output_name(name);
    }

    if !args.null_markers.is_empty() {
        builder = builder.null_markers(args.null_markers.iter().cloned());
    }

    builder.build().context("Invalid configuration")
}

fn build_pipeline(args: &Args, config: PipelineConfig) -> Result<Pipeline> {
    let mut builder = Pipeline::builder().config(config);

    if !args.quiet && !args.json {
        builder = builder.on_progress(|update| {
            info!(
                "[{:.0}%] {}: {}",
                update.progress * 100.0,
                update.stage.display_name(),
                update.message
            );
        });
    }

    Ok(builder.build()?)
}

/// Run dry-run mode - show the classification without processing
///
/// Note: This function uses `println!` intentionally for user-facing CLI output.
/// Unlike logging (`info!`, `debug!`), this output should always be visible
/// regardless of log level settings since it's the primary purpose of --dry-run.
fn run_dry_run(args: &Args, pipeline: &Pipeline, data: &DataFrame) -> Result<()> {
    let analysis = pipeline.analyze(data)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    println!("\n{}", "=".repeat(80));
    println!("DRY RUN - Preview of column classification");
    println!("{}\n", "=".repeat(80));

    println!("DATASET OVERVIEW");
    println!("{}", "-".repeat(40));
    println!("  File: {}", args.input);
    println!("  Rows: {}", analysis.rows);
    println!("  Columns: {}", analysis.columns);
    println!();

    println!("COLUMN PROFILES");
    println!("{}", "-".repeat(40));
    print_profile_table(&analysis);
    println!();

    println!("DUPLICATES");
    println!("{}", "-".repeat(40));
    if analysis.duplicate_rows == 0 {
        println!("  No duplicate rows found");
    } else if args.keep_duplicates {
        println!(
            "  {} duplicate rows found (kept: --keep-duplicates)",
            analysis.duplicate_rows
        );
    } else {
        println!("  Will remove {} duplicate rows", analysis.duplicate_rows);
    }
    println!();

    println!("{}", "=".repeat(80));
    println!("Run without --dry-run to process the dataset");
    println!("{}", "=".repeat(80));

    Ok(())
}

fn print_profile_table(analysis: &DatasetAnalysis) {
    println!(
        "{:<24} {:<10} {:<12} {:<10} {:<10}",
        "Column", "Type", "Role", "Missing", "Unique"
    );
    println!("{}", "-".repeat(70));

    for profile in &analysis.profiles {
        println!(
            "{:<24} {:<10} {:<12} {:<10} {:<10}",
            truncate_str(&profile.name, 23),
            profile.data_type,
            profile.role.map(|r| r.as_str()).unwrap_or("-"),
            profile.missing_count,
            profile.unique_count
        );
    }
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Run pipeline and print results
fn run_pipeline(pipeline: &Pipeline, args: &Args, data: DataFrame) -> Result<()> {
    info!("{}", "=".repeat(80));
    info!("Starting preprocessing pipeline...");
    info!("{}", "=".repeat(80));

    match pipeline.process(data) {
        Ok(output) => handle_pipeline_output(pipeline, &output, args),
        Err(e) => {
            error!("Pipeline failed: {}", e);
            Err(anyhow!("Pipeline failed: {}", e))
        }
    }
}

/// Handle pipeline output based on CLI flags.
///
/// Output behavior:
/// - Default: Print human-readable summary to stdout
/// - `--json`: Print JSON to stdout only (no logs)
/// - `--emit-report`: Write JSON report to file
fn handle_pipeline_output(pipeline: &Pipeline, output: &PipelineOutput, args: &Args) -> Result<()> {
    let report = ReportGenerator::build_report(output, Some(Path::new(&args.input)));

    if args.emit_report {
        let input_stem = extract_file_stem(&args.input);
        let generator = ReportGenerator::new(
            PathBuf::from(&args.output),
            pipeline.config().output_name.clone(),
        );
        let report_path = generator.write_report(&report, &input_stem)?;
        info!("Report written to: {}", report_path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_human_readable_summary(&report);

    Ok(())
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Print a human-readable summary of the preprocessing results.
///
/// This is the default output when `--json` is not specified.
fn print_human_readable_summary(report: &PipelineReport) {
    let summary = &report.summary;

    println!();
    println!("{}", "=".repeat(80));
    println!("PREPROCESSING COMPLETE");
    println!("{}", "=".repeat(80));
    println!();

    println!(
        "Input:  {} ({} rows x {} columns)",
        report.input_file.as_deref().unwrap_or("-"),
        summary.initial_rows,
        summary.initial_columns
    );
    println!(
        "Output: {} ({} rows x {} columns)",
        report.output_file.as_deref().unwrap_or("(not saved)"),
        summary.final_rows,
        summary.final_columns
    );
    println!();

    println!("Processing Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Duplicates removed: {} ({:.1}%)",
        summary.duplicates_removed,
        summary.duplicate_percentage()
    );
    println!();

    println!("Columns:");
    println!(
        "  {:<24} {:<10} {:<12} {:<10} {:<10}",
        "Column", "Type", "Role", "Missing", "Unique"
    );
    for profile in &report.profiles {
        println!(
            "  {:<24} {:<10} {:<12} {:<10} {:<10}",
            truncate_str(&profile.name, 23),
            profile.data_type,
            profile.role.map(|r| r.as_str()).unwrap_or("-"),
            profile.missing_count,
            profile.unique_count
        );
    }
    println!();

    if !report.vocabulary.is_empty() {
        println!("Text Vocabulary:");
        for vocab in &report.vocabulary {
            println!(
                "  - {}: {} unique words -> {} features",
                vocab.column, vocab.original_unique_words, vocab.selected_feature_count
            );
        }
        println!();
    }

    println!("Use --json for machine-readable output");
    println!("Use --emit-report to save the JSON report");
    println!("{}", "=".repeat(80));
}
