//! `plotters` bitmap renderer.

use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle, FontTransform};
use std::ops::Range;
use std::path::Path;
use tracing::debug;

use super::{BarChart, ChartRenderer, LineChart};

/// Renders charts to PNG files through `BitMapBackend`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PngRenderer;

impl ChartRenderer for PngRenderer {
    #[tracing::instrument(skip_all, fields(path = %path.display(), title = chart.title))]
    fn render_line(&self, chart: &LineChart, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, chart.size).into_drawing_area();
        draw_line_chart(&root, chart).with_context(|| format!("drawing {}", path.display()))?;
        root.present()
            .with_context(|| format!("saving {}", path.display()))?;

        debug!(lines = chart.lines.len(), "Line chart saved");
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(path = %path.display(), title = chart.title))]
    fn render_bar(&self, chart: &BarChart, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, chart.size).into_drawing_area();
        draw_bar_chart(&root, chart).with_context(|| format!("drawing {}", path.display()))?;
        root.present()
            .with_context(|| format!("saving {}", path.display()))?;

        debug!(groups = chart.groups.len(), "Bar chart saved");
        Ok(())
    }
}

/// Width of the panel right of the bar plot that holds its legend.
const LEGEND_PANEL_WIDTH: u32 = 300;

fn caption_font() -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, 26.0, FontStyle::Normal)
}

fn axis_font() -> FontDesc<'static> {
    FontDesc::new(FontFamily::SansSerif, 16.0, FontStyle::Normal)
}

/// X range covering every year (and `right_edge`, for offset bars) with half
/// a year of padding.
fn year_axis(years: &[i32], right_edge: Option<f64>) -> Range<f64> {
    match (years.first(), years.last()) {
        (Some(&first), Some(&last)) => {
            let end = right_edge.map_or(last as f64, |x| x.max(last as f64));
            first as f64 - 0.5..end + 0.5
        }
        _ => 0.0..1.0,
    }
}

/// Tick label for an x value: the year for whole numbers, blank otherwise.
fn year_label(v: f64) -> String {
    if (v - v.round()).abs() < 1e-6 {
        format!("{:.0}", v.round())
    } else {
        String::new()
    }
}

fn y_upper(max: u64) -> f64 {
    (max as f64 * 1.1).max(1.0)
}

fn draw_line_chart<DB>(root: &DrawingArea<DB, Shift>, spec: &LineChart) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title, caption_font())
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 70)
        .build_cartesian_2d(year_axis(&spec.years, None), 0.0..y_upper(spec.max_value()))?;

    chart
        .configure_mesh()
        .x_desc(spec.x_desc)
        .y_desc(spec.y_desc)
        .label_style(axis_font())
        .x_label_style(axis_font().transform(FontTransform::Rotate90))
        .x_labels(spec.years.len().max(1))
        .x_label_formatter(&|v| year_label(*v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()?;

    if let Some(title) = spec.legend_title {
        chart
            .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())?
            .label(title)
            .legend(|(x, y)| EmptyElement::<_, DB>::at((x, y)));
    }

    for line in &spec.lines {
        let color = line.color;
        let points: Vec<(f64, f64)> = line
            .points
            .iter()
            .map(|&(year, total)| (year as f64, total as f64))
            .collect();

        let series = chart.draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?;
        if let Some(label) = &line.label {
            series.label(label.as_str()).legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(2))
            });
        }

        // markers
        chart.draw_series(points.iter().map(|&p| Circle::new(p, 4, color.filled())))?;
    }

    if spec.lines.iter().any(|l| l.label.is_some()) {
        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(axis_font())
            .position(SeriesLabelPosition::UpperLeft)
            .draw()?;
    }

    Ok(())
}

/// Draws the bars on the left and their legend in a panel to the right, so
/// the legend never covers a bar.
fn draw_bar_chart<DB>(root: &DrawingArea<DB, Shift>, spec: &BarChart) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (width, _) = root.dim_in_pixel();
    let (plot_area, legend_area) =
        root.split_horizontally(width.saturating_sub(LEGEND_PANEL_WIDTH));

    let mut chart = ChartBuilder::on(&plot_area)
        .caption(spec.title, caption_font())
        .margin(25)
        .set_label_area_size(LabelAreaPosition::Left, 80)
        .set_label_area_size(LabelAreaPosition::Bottom, 70)
        .build_cartesian_2d(
            year_axis(&spec.years, spec.max_x()),
            0.0..y_upper(spec.max_value()),
        )?;

    chart
        .configure_mesh()
        .x_desc(spec.x_desc)
        .y_desc(spec.y_desc)
        .label_style(axis_font())
        .x_label_style(axis_font().transform(FontTransform::Rotate90))
        .x_labels(spec.years.len().max(1))
        .x_label_formatter(&|v| year_label(*v))
        .y_label_formatter(&|v| format!("{:.0}", v))
        .draw()?;

    let half = spec.bar_width / 2.0;
    for group in &spec.groups {
        let color = group.color;
        chart.draw_series(group.bars.iter().map(|&(x, total)| {
            Rectangle::new([(x - half, 0.0), (x + half, total as f64)], color.filled())
        }))?;
    }

    draw_bar_legend(&legend_area, spec)?;
    Ok(())
}

fn draw_bar_legend<DB>(area: &DrawingArea<DB, Shift>, spec: &BarChart) -> Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let mut y = 70;
    if let Some(title) = spec.legend_title {
        area.draw(&Text::new(title, (10, y), axis_font()))?;
        y += 30;
    }

    for group in &spec.groups {
        area.draw(&Rectangle::new([(10, y), (26, y + 14)], group.color.filled()))?;
        area.draw(&Text::new(group.label.as_str(), (34, y), axis_font()))?;
        y += 24;
    }

    Ok(())
}
