use plotters::prelude::*;

use super::{CHART_SIZE, ChartArtifact, ChartError, FONT, render_svg};
use crate::color;
use crate::data::model::EmployeeTable;
use crate::data::stats::{CorrelationEntry, rank_correlations};

/// Bar chart of the `n` numeric columns most correlated (by |r|) with
/// `target`. Fails with [`ChartError::MissingColumn`] when `target` is absent
/// or not numeric.
pub fn top_feature_correlations(
    table: &EmployeeTable,
    target: &str,
    n: usize,
) -> Result<ChartArtifact, ChartError> {
    let ranked = rank_correlations(table, target, n)?;
    let title = format!("Top {n} Feature Correlations with {}", target.replace('_', " "));
    correlation_bars(&title, &ranked)
}

fn correlation_bars(title: &str, ranked: &[CorrelationEntry]) -> Result<ChartArtifact, ChartError> {
    let names: Vec<String> = ranked.iter().map(|e| e.column.replace('_', " ")).collect();
    let segments = ranked.len().max(1) as i32;

    let lo = ranked.iter().map(|e| e.correlation).fold(0.0_f64, f64::min);
    let hi = ranked.iter().map(|e| e.correlation).fold(0.0_f64, f64::max);
    let y_range = (lo - 0.1).max(-1.05)..(hi + 0.1).min(1.05);

    let positive = color::primary();
    let negative = color::accent();

    render_svg(title, CHART_SIZE, |root| {
        let mut chart = ChartBuilder::on(root)
            .caption(title, (FONT, 18))
            .margin(15)
            .x_label_area_size(50)
            .y_label_area_size(60)
            .build_cartesian_2d((0..segments).into_segmented(), y_range)?;

        let label = |v: &SegmentValue<i32>| match v {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
                .ok()
                .and_then(|i| names.get(i))
                .cloned()
                .unwrap_or_default(),
            SegmentValue::Last => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(names.len().max(1))
            .x_label_formatter(&label)
            .y_label_formatter(&|v| format!("{v:.2}"))
            .x_desc("Feature")
            .y_desc("Correlation")
            .draw()?;

        chart.draw_series(ranked.iter().enumerate().map(|(i, e)| {
            let i = i as i32;
            let style = if e.correlation >= 0.0 { positive } else { negative };
            let mut bar = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), e.correlation),
                ],
                style.filled(),
            );
            bar.set_margin(0, 0, 14, 14);
            bar
        }))?;
        Ok(())
    })
}
