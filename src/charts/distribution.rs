use plotters::prelude::*;

use super::{
    CHART_SIZE, ChartArtifact, ChartError, DrawResult, FONT, XyChart, integral_label,
    numeric_pairs, numeric_values, render_svg,
};
use crate::color;
use crate::data::model::EmployeeTable;
use crate::data::stats::{BoxSummary, box_summary, group_by_key, padded_range};

pub const PERFORMANCE_COLUMN: &str = "Performance_Score";
pub const TRAINING_COLUMN: &str = "Training_Hours";

// ---------------------------------------------------------------------------
// Box plot with every observation overlaid
// ---------------------------------------------------------------------------

/// Box plot of `Performance_Score` with all points drawn beside the box.
pub fn performance_distribution(
    table: &EmployeeTable,
) -> Result<ChartArtifact, ChartError> {
    let values = numeric_values(table, PERFORMANCE_COLUMN)?;
    let title = "Performance Score Distribution";

    render_svg(title, CHART_SIZE, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 18))
            .margin(15)
            .x_label_area_size(20)
            .y_label_area_size(50)
            .build_cartesian_2d(0.0..2.0, padded_range(&values))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(1)
            .x_label_formatter(&|_| String::new())
            .y_desc("Performance Score")
            .draw()?;

        if let Some(summary) = box_summary(&values) {
            draw_box(&mut chart, 1.25, 0.3, &summary, color::primary())?;
        }
        draw_points(&mut chart, 0.55, 0.15, &values, color::primary())?;
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Grouped box plot
// ---------------------------------------------------------------------------

/// One box of `Training_Hours` per distinct `Performance_Score`.
pub fn training_by_performance(
    table: &EmployeeTable,
) -> Result<ChartArtifact, ChartError> {
    grouped_boxplot(
        table,
        PERFORMANCE_COLUMN,
        TRAINING_COLUMN,
        "Training Hours by Performance Score",
    )
}

/// Box plot of `value_column` for each distinct value of `group_column`,
/// groups placed at their numeric key.
pub fn grouped_boxplot(
    table: &EmployeeTable,
    group_column: &str,
    value_column: &str,
    title: &str,
) -> Result<ChartArtifact, ChartError> {
    let pairs = numeric_pairs(table, group_column, value_column)?;
    let groups = group_by_key(&pairs);

    let keys: Vec<f64> = groups.iter().map(|(k, _)| *k).collect();
    let spacing = keys
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(f64::INFINITY, f64::min)
        .min(1.0);
    let half = spacing * 0.3;
    let x_range = match (keys.first(), keys.last()) {
        (Some(lo), Some(hi)) => (lo - spacing)..(hi + spacing),
        _ => 0.0..1.0,
    };
    let all_values: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let n_labels = groups.len() + 2;

    render_svg(title, CHART_SIZE, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 18))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range, padded_range(&all_values))?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n_labels)
            .x_label_formatter(&integral_label)
            .x_desc(group_column.replace('_', " "))
            .y_desc(value_column.replace('_', " "))
            .draw()?;

        let palette = color::generate_palette(groups.len());
        for ((key, values), c) in groups.iter().zip(palette) {
            if let Some(summary) = box_summary(values) {
                draw_box(&mut chart, *key, half, &summary, c)?;
            }
            draw_points(&mut chart, *key, half * 0.8, values, c)?;
        }
        Ok(())
    })
}

// ---------------------------------------------------------------------------
// Drawing helpers
// ---------------------------------------------------------------------------

/// Box from q1 to q3 with a median bar and whiskers, centred on `x`.
fn draw_box(
    chart: &mut XyChart<'_, '_>,
    x: f64,
    half: f64,
    s: &BoxSummary,
    c: RGBColor,
) -> DrawResult {
    chart.draw_series(std::iter::once(Rectangle::new(
        [(x - half, s.q1), (x + half, s.q3)],
        c.mix(0.25).filled(),
    )))?;
    chart.draw_series(std::iter::once(Rectangle::new(
        [(x - half, s.q1), (x + half, s.q3)],
        c.stroke_width(1),
    )))?;

    let cap = half * 0.5;
    let lines = [
        vec![(x - half, s.median), (x + half, s.median)],
        vec![(x, s.q3), (x, s.upper_whisker)],
        vec![(x, s.q1), (x, s.lower_whisker)],
        vec![(x - cap, s.upper_whisker), (x + cap, s.upper_whisker)],
        vec![(x - cap, s.lower_whisker), (x + cap, s.lower_whisker)],
    ];
    chart.draw_series(
        lines
            .into_iter()
            .map(|pts| PathElement::new(pts, c.stroke_width(2))),
    )?;
    Ok(())
}

/// Every observation as a small dot, spread horizontally within `x ± spread`
/// by a fixed per-index offset so the output stays deterministic.
fn draw_points(
    chart: &mut XyChart<'_, '_>,
    x: f64,
    spread: f64,
    values: &[f64],
    c: RGBColor,
) -> DrawResult {
    chart.draw_series(values.iter().enumerate().map(|(i, &v)| {
        let offset = ((i * 37) % 101) as f64 / 100.0 - 0.5;
        Circle::new((x + offset * 2.0 * spread, v), 2, c.mix(0.6).filled())
    }))?;
    Ok(())
}
