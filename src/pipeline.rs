//! The end-to-end run: load, clean, aggregate, chart, export.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::analyzers::types::Summaries;
use crate::analyzers::utility::sum_rents;
use crate::charts::{ChartRenderer, ChartSet};
use crate::config::AnalysisConfig;
use crate::output::{print_json, write_summary};
use crate::parser::load_listings;

/// What a successful run read and wrote.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub total_rents: u64,
    pub top_boroughs: Vec<String>,
    /// Charts first, then summary tables, in write order.
    pub files_written: Vec<PathBuf>,
}

/// Runs every step in order. The first failure aborts the run; files written
/// before it are left in place.
#[tracing::instrument(skip_all, fields(input = %config.input_path.display(), output_dir = %config.output_dir.display()))]
pub fn run<R: ChartRenderer>(config: &AnalysisConfig, renderer: &R) -> Result<RunReport> {
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let listings = load_listings(&config.input_path)?;
    let summaries = Summaries::from_listings(&listings.records, config.top_n)?;
    let total_rents = sum_rents(&listings.records)?;

    info!(
        years = summaries.years.len(),
        total_rents,
        top_boroughs = ?summaries.top_boroughs,
        "Aggregation complete"
    );
    print_json(&summaries)?;

    let paths = config.outputs();
    let charts = ChartSet::from_summaries(&summaries);

    renderer.render_line(&charts.total_trend, &paths.total_listings_png)?;
    renderer.render_line(&charts.room_type_trend, &paths.room_type_png)?;
    renderer.render_bar(&charts.top_boroughs, &paths.top_boroughs_png)?;

    write_summary(&paths.total_listings_csv, &summaries.yearly)?;
    write_summary(&paths.room_type_csv, &summaries.room_types)?;
    write_summary(&paths.top_regions_csv, &summaries.top_regions)?;

    Ok(RunReport {
        rows_read: listings.rows_read,
        rows_kept: listings.records.len(),
        total_rents,
        top_boroughs: summaries.top_boroughs,
        files_written: vec![
            paths.total_listings_png,
            paths.room_type_png,
            paths.top_boroughs_png,
            paths.total_listings_csv,
            paths.room_type_csv,
            paths.top_regions_csv,
        ],
    })
}
