use plotters::prelude::*;

use super::{CHART_SIZE, ChartArtifact, ChartError, FONT, numeric_values, render_svg};
use crate::color;
use crate::data::model::EmployeeTable;
use crate::data::stats::{Bin, histogram, padded_range};

pub const PRODUCTIVITY_COLUMN: &str = "Productivity_Score";
pub const HISTOGRAM_BINS: usize = 30;

/// Distribution of `Productivity_Score` in 30 equal-width bins.
pub fn productivity_histogram(table: &EmployeeTable) -> Result<ChartArtifact, ChartError> {
    histogram_chart(
        table,
        PRODUCTIVITY_COLUMN,
        HISTOGRAM_BINS,
        "Distribution of Productivity Score",
    )
}

pub fn histogram_chart(
    table: &EmployeeTable,
    column: &str,
    bins: usize,
    title: &str,
) -> Result<ChartArtifact, ChartError> {
    let values = numeric_values(table, column)?;
    let bins = histogram(&values, bins);
    let x_range = bin_range(&bins);
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
    let y_max = (max_count as f64 * 1.1).max(1.0);
    let fill = color::primary();

    render_svg(title, CHART_SIZE, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 18))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(column.replace('_', " "))
            .y_desc("Count")
            .y_label_formatter(&|v| format!("{v:.0}"))
            .draw()?;

        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], fill.filled())
        }))?;
        chart.draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], WHITE.stroke_width(1))
        }))?;
        Ok(())
    })
}

/// Axis range spanning every bin edge.
pub(crate) fn bin_range(bins: &[Bin]) -> std::ops::Range<f64> {
    match (bins.first(), bins.last()) {
        (Some(first), Some(last)) => first.start..last.end,
        _ => padded_range(&[]),
    }
}
