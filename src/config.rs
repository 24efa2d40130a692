//! Run configuration and the fixed output layout.

use std::path::{Path, PathBuf};

use crate::analyzers::aggregate::DEFAULT_TOP_BOROUGHS;

pub const DEFAULT_INPUT_PATH: &str = "./data/combined_bedroom_category_long.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "./descriptive statistics";

pub const TOTAL_LISTINGS_CSV: &str = "total_listings_summary.csv";
pub const ROOM_TYPE_CSV: &str = "adjusted_room_type_summary.csv";
pub const TOP_REGIONS_CSV: &str = "top_regions_summary.csv";
pub const TOTAL_LISTINGS_PNG: &str = "total_listings_trend.png";
pub const ROOM_TYPE_PNG: &str = "adjusted_room_type_trend.png";
pub const TOP_BOROUGHS_PNG: &str = "top_boroughs_room_type.png";

/// Where to read listings from, where to write results, and how many
/// boroughs the regional breakdown keeps.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            input_path: PathBuf::from(DEFAULT_INPUT_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            top_n: DEFAULT_TOP_BOROUGHS,
        }
    }
}

impl AnalysisConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        AnalysisConfig {
            input_path: input_path.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    pub fn outputs(&self) -> OutputPaths {
        OutputPaths::new(&self.output_dir)
    }
}

/// The six output files, all directly under the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub total_listings_csv: PathBuf,
    pub room_type_csv: PathBuf,
    pub top_regions_csv: PathBuf,
    pub total_listings_png: PathBuf,
    pub room_type_png: PathBuf,
    pub top_boroughs_png: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: &Path) -> Self {
        OutputPaths {
            total_listings_csv: dir.join(TOTAL_LISTINGS_CSV),
            room_type_csv: dir.join(ROOM_TYPE_CSV),
            top_regions_csv: dir.join(TOP_REGIONS_CSV),
            total_listings_png: dir.join(TOTAL_LISTINGS_PNG),
            room_type_png: dir.join(ROOM_TYPE_PNG),
            top_boroughs_png: dir.join(TOP_BOROUGHS_PNG),
        }
    }
}
