use plotters::prelude::*;

use super::{ChartArtifact, ChartError, FONT, render_svg};
use crate::color;
use crate::simulation::{PredictionResult, SCORE_RANGE, TrendPoint};

const TREND_SIZE: (u32, u32) = (760, 380);
const COMPARISON_SIZE: (u32, u32) = (520, 380);

/// Line chart of the simulated monthly trend.
pub fn performance_trend(points: &[TrendPoint]) -> Result<ChartArtifact, ChartError> {
    let title = "Simulated Monthly Performance Trend";
    let months: Vec<String> = points
        .iter()
        .map(|p| p.month.format("%b %Y").to_string())
        .collect();
    let segments = points.len().max(1) as i32;
    let y_range = 0.0..(*SCORE_RANGE.end() + 0.5);
    let line = color::primary();

    render_svg(title, TREND_SIZE, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 18))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..segments).into_segmented(), y_range)?;

        let label = |v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(i) => usize::try_from(*i)
                .ok()
                .and_then(|i| months.get(i))
                .cloned()
                .unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(months.len().max(1))
            .x_label_formatter(&label)
            .y_desc("Score (simulated)")
            .draw()?;

        let coords: Vec<(SegmentValue<i32>, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (SegmentValue::CenterOf(i as i32), p.score))
            .collect();
        chart.draw_series(LineSeries::new(coords.clone(), line.stroke_width(2)))?;
        chart.draw_series(
            coords
                .into_iter()
                .map(|c| Circle::new(c, 4, line.filled())),
        )?;
        Ok(())
    })
}

/// Bars comparing the simulated before-leave score, the model's prediction
/// and the simulated after-leave score.
pub fn leave_comparison(result: &PredictionResult) -> Result<ChartArtifact, ChartError> {
    let title = "Before vs After Leave (simulated)";
    let bars = [
        ("Before leave", result.before_leave),
        ("Predicted", result.score),
        ("After leave", result.after_leave),
    ];
    let palette = color::generate_palette(bars.len());
    let y_max = bars
        .iter()
        .map(|b| b.1)
        .fold(*SCORE_RANGE.end(), f64::max)
        + 0.5;
    let y_min = bars.iter().map(|b| b.1).fold(0.0_f64, f64::min);

    render_svg(title, COMPARISON_SIZE, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 18))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d((0..bars.len() as i32).into_segmented(), y_min..y_max)?;

        let label = |v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(i) => usize::try_from(*i)
                .ok()
                .and_then(|i| bars.get(i))
                .map(|b| b.0.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len())
            .x_label_formatter(&label)
            .y_desc("Performance Score")
            .draw()?;

        chart.draw_series(bars.iter().zip(palette).enumerate().map(|(i, (b, c))| {
            let i = i as i32;
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), b.1)],
                c.filled(),
            );
            bar.set_margin(0, 0, 20, 20);
            bar
        }))?;
        chart.draw_series(bars.iter().enumerate().map(|(i, b)| {
            Text::new(
                format!("{:.2}", b.1),
                (SegmentValue::CenterOf(i as i32), b.1 + 0.1),
                (FONT, 14).into_font(),
            )
        }))?;
        Ok(())
    })
}
