//! Chart descriptions built from the summary tables, and the renderer seam.
//!
//! [`ChartSet::from_summaries`] turns the aggregates into plain
//! [`LineChart`] / [`BarChart`] values. A [`ChartRenderer`] draws them;
//! [`PngRenderer`] does so with `plotters`.

mod png;

pub use png::PngRenderer;

use anyhow::Result;
use plotters::style::RGBColor;
use std::path::Path;

use crate::analyzers::types::Summaries;
use crate::stats::RoomType;

/// Shift applied per borough ordinal so grouped bars don't overlap.
pub const BAR_OFFSET_STEP: f64 = 0.1;

/// Colour of the single yearly-total line.
pub const TOTAL_LINE_COLOR: RGBColor = RGBColor(0, 0, 255);

/// Ten-colour cycle for multi-series charts.
pub const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

pub fn series_color(idx: usize) -> RGBColor {
    SERIES_COLORS[idx % SERIES_COLORS.len()]
}

/// One line of a [`LineChart`]: `(year, total)` points in year order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub label: Option<String>,
    pub points: Vec<(i32, u64)>,
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: &'static str,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    pub size: (u32, u32),
    /// Sorted distinct years, used as x ticks.
    pub years: Vec<i32>,
    pub legend_title: Option<&'static str>,
    pub lines: Vec<TrendLine>,
}

/// One bar series of a [`BarChart`]: `(x position, total)` bars.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroup {
    pub label: String,
    pub bars: Vec<(f64, u64)>,
    pub color: RGBColor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    pub size: (u32, u32),
    pub years: Vec<i32>,
    pub legend_title: Option<&'static str>,
    pub bar_width: f64,
    pub groups: Vec<BarGroup>,
}

impl LineChart {
    pub fn max_value(&self) -> u64 {
        self.lines
            .iter()
            .flat_map(|l| l.points.iter().map(|&(_, v)| v))
            .max()
            .unwrap_or(0)
    }
}

impl BarChart {
    pub fn max_value(&self) -> u64 {
        self.groups
            .iter()
            .flat_map(|g| g.bars.iter().map(|&(_, v)| v))
            .max()
            .unwrap_or(0)
    }

    /// Rightmost bar position, if there are any bars.
    pub fn max_x(&self) -> Option<f64> {
        self.groups
            .iter()
            .flat_map(|g| g.bars.iter().map(|&(x, _)| x))
            .reduce(f64::max)
    }
}

/// Draws chart descriptions to image files.
pub trait ChartRenderer {
    fn render_line(&self, chart: &LineChart, path: &Path) -> Result<()>;
    fn render_bar(&self, chart: &BarChart, path: &Path) -> Result<()>;
}

/// The three charts the pipeline produces.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub total_trend: LineChart,
    pub room_type_trend: LineChart,
    pub top_boroughs: BarChart,
}

impl ChartSet {
    pub fn from_summaries(summaries: &Summaries) -> Self {
        ChartSet {
            total_trend: total_trend_chart(summaries),
            room_type_trend: room_type_chart(summaries),
            top_boroughs: top_boroughs_chart(summaries),
        }
    }
}

fn total_trend_chart(summaries: &Summaries) -> LineChart {
    LineChart {
        title: "Total Airbnb Listings Change Over Years",
        x_desc: "Year",
        y_desc: "Total Listings",
        size: (1000, 600),
        years: summaries.years.clone(),
        legend_title: None,
        lines: vec![TrendLine {
            label: None,
            points: summaries
                .yearly
                .iter()
                .map(|t| (t.year, t.total_rents))
                .collect(),
            color: TOTAL_LINE_COLOR,
        }],
    }
}

fn room_type_chart(summaries: &Summaries) -> LineChart {
    let lines = room_types_in_order(summaries.room_types.iter().map(|t| t.room_type))
        .into_iter()
        .enumerate()
        .map(|(idx, room_type)| TrendLine {
            label: Some(room_type.label().to_string()),
            points: summaries
                .room_types
                .iter()
                .filter(|t| t.room_type == room_type)
                .map(|t| (t.year, t.total_rents))
                .collect(),
            color: series_color(idx),
        })
        .collect();

    LineChart {
        title: "Change in Room Types Over Years",
        x_desc: "Year",
        y_desc: "Number of Listings",
        size: (1200, 800),
        years: summaries.years.clone(),
        legend_title: Some("Room Type"),
        lines,
    }
}

fn top_boroughs_chart(summaries: &Summaries) -> BarChart {
    let mut groups = Vec::new();

    for (ordinal, borough) in summaries.top_boroughs.iter().enumerate() {
        let offset = BAR_OFFSET_STEP * ordinal as f64;
        let rows: Vec<_> = summaries
            .top_regions
            .iter()
            .filter(|r| &r.borough == borough)
            .collect();

        for room_type in room_types_in_order(rows.iter().map(|r| r.room_type)) {
            let color = series_color(groups.len());
            groups.push(BarGroup {
                label: format!("{} - {}", borough, room_type),
                bars: rows
                    .iter()
                    .filter(|r| r.room_type == room_type)
                    .map(|r| (r.year as f64 + offset, r.total_rents))
                    .collect(),
                color,
            });
        }
    }

    BarChart {
        title: "Top Boroughs and Their Room Type Distribution",
        x_desc: "Year",
        y_desc: "Total Listings",
        size: (1200, 800),
        years: summaries.years.clone(),
        legend_title: Some("Borough and Room Type"),
        bar_width: BAR_OFFSET_STEP,
        groups,
    }
}

/// Distinct room types in order of first appearance.
fn room_types_in_order(iter: impl Iterator<Item = RoomType>) -> Vec<RoomType> {
    let mut seen = Vec::new();
    for room_type in iter {
        if !seen.contains(&room_type) {
            seen.push(room_type);
        }
    }
    seen
}
