use plotters::prelude::*;

use super::distribution::{PERFORMANCE_COLUMN, TRAINING_COLUMN};
use super::{ChartArtifact, ChartError, FONT, numeric_pairs, render_svg};
use crate::color;
use crate::data::model::EmployeeTable;
use crate::data::stats::{histogram, linear_fit, padded_range};

const JOINT_SIZE: (u32, u32) = (760, 560);
const MARGINAL_BINS: usize = 20;
/// Height of the top marginal strip and width of the right one, in pixels.
const MARGINAL_PX: i32 = 110;

/// Scatter of training hours against performance with an OLS trend line and
/// marginal histograms on both axes.
pub fn training_performance_joint(table: &EmployeeTable) -> Result<ChartArtifact, ChartError> {
    joint_plot(
        table,
        TRAINING_COLUMN,
        PERFORMANCE_COLUMN,
        "Training vs Performance with Regression",
    )
}

pub fn joint_plot(
    table: &EmployeeTable,
    x_column: &str,
    y_column: &str,
    title: &str,
) -> Result<ChartArtifact, ChartError> {
    let pairs = numeric_pairs(table, x_column, y_column)?;
    let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let x_range = padded_range(&xs);
    let y_range = padded_range(&ys);
    let fit = linear_fit(&pairs);
    let x_bins = histogram(&xs, MARGINAL_BINS);
    let y_bins = histogram(&ys, MARGINAL_BINS);
    let x_max_count = x_bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;
    let y_max_count = y_bins.iter().map(|b| b.count).max().unwrap_or(0).max(1) as f64;

    let point_color = color::primary();
    let line_color = color::accent();
    let x_desc = x_column.replace('_', " ");
    let y_desc = y_column.replace('_', " ");

    render_svg(title, JOINT_SIZE, |root| {
        let root = root.titled(title, (FONT, 18))?;
        let main_width = root.dim_in_pixel().0 as i32 - MARGINAL_PX;
        let (top, bottom) = root.split_vertically(MARGINAL_PX);
        let (top_hist, _corner) = top.split_horizontally(main_width);
        let (main, right_hist) = bottom.split_horizontally(main_width);

        // ---- Main scatter with trend line ----
        let mut chart = ChartBuilder::on(&main)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range.clone(), y_range.clone())?;

        chart
            .configure_mesh()
            .x_desc(x_desc.as_str())
            .y_desc(y_desc.as_str())
            .draw()?;

        chart.draw_series(
            pairs
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, point_color.mix(0.5).filled())),
        )?;

        if let Some(fit) = fit {
            let (x0, x1) = (x_range.start, x_range.end);
            chart
                .draw_series(LineSeries::new(
                    [(x0, fit.at(x0)), (x1, fit.at(x1))],
                    line_color.stroke_width(2),
                ))?
                .label(format!("OLS: y = {:.3}x + {:.3}", fit.slope, fit.intercept))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], line_color.stroke_width(2))
                });
            chart
                .configure_series_labels()
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()?;
        }

        // ---- Marginal histogram of x (top) ----
        let mut top_chart = ChartBuilder::on(&top_hist)
            .margin(10)
            .x_label_area_size(0)
            .y_label_area_size(50)
            .build_cartesian_2d(x_range.clone(), 0.0..x_max_count)?;
        top_chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(0)
            .y_labels(2)
            .y_label_formatter(&|v| format!("{v:.0}"))
            .draw()?;
        top_chart.draw_series(x_bins.iter().map(|b| {
            Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], point_color.mix(0.7).filled())
        }))?;

        // ---- Marginal histogram of y (right) ----
        let mut right_chart = ChartBuilder::on(&right_hist)
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(0)
            .build_cartesian_2d(0.0..y_max_count, y_range.clone())?;
        right_chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(2)
            .y_labels(0)
            .x_label_formatter(&|v| format!("{v:.0}"))
            .draw()?;
        right_chart.draw_series(y_bins.iter().map(|b| {
            Rectangle::new([(0.0, b.start), (b.count as f64, b.end)], point_color.mix(0.7).filled())
        }))?;

        Ok(())
    })
}
