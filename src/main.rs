//! CLI entry point for the Airbnb listing statistics tool.
//!
//! With no arguments it reads the default dataset, writes three summary CSVs
//! and three charts into the default output directory, and prints a
//! confirmation line.

use airbnb_listing_stats::{
    charts::PngRenderer,
    config::{AnalysisConfig, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_DIR},
    pipeline,
};
use anyhow::Result;
use clap::Parser;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "airbnb_listing_stats")]
#[command(about = "Descriptive statistics for Airbnb listing counts", long_about = None)]
struct Cli {
    /// CSV with Year, Borough, Bedroom_Category and Count_of_Rents columns
    #[arg(short, long, default_value = DEFAULT_INPUT_PATH)]
    input: PathBuf,

    /// Directory for summary CSVs and charts (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Number of boroughs in the regional breakdown
    #[arg(short, long, default_value_t = 3)]
    top: usize,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/airbnb_listing_stats.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("airbnb_listing_stats.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = AnalysisConfig::new(cli.input, cli.output_dir).with_top_n(cli.top);

    let report = pipeline::run(&config, &PngRenderer)?;

    info!(
        rows_read = report.rows_read,
        rows_kept = report.rows_kept,
        files = report.files_written.len(),
        "Run finished"
    );
    println!("Analysis completed. Results and visualizations have been saved successfully.");

    Ok(())
}
