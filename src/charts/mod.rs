/// Chart pipeline: table (or one employee plus simulated series) in, SVG
/// markup out.
///
/// Every generator is a pure function of its input and renders exactly one
/// [`ChartArtifact`]. The artifact is opaque to the rest of the system; the
/// presentation layer only embeds its markup.
///
/// ```text
///   EmployeeTable ──► stats (quartiles, r, OLS, bins) ──► plotters SVGBackend ──► ChartArtifact
/// ```

pub mod correlation;
pub mod distribution;
pub mod histogram;
pub mod joint;
pub mod trend;

use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::data::model::EmployeeTable;
use crate::data::stats::StatsError;

pub use correlation::top_feature_correlations;
pub use distribution::{performance_distribution, training_by_performance};
pub use histogram::productivity_histogram;
pub use joint::training_performance_joint;
pub use trend::{leave_comparison, performance_trend};

/// Default canvas size of a dashboard chart, in pixels.
pub const CHART_SIZE: (u32, u32) = (760, 440);

pub const FONT: &str = "sans-serif";

/// A rendered chart: a title plus standalone `<svg>` markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartArtifact {
    pub title: String,
    pub svg: String,
}

#[derive(Debug, Error)]
pub enum ChartError {
    /// A column the chart needs is absent or not numeric.
    #[error("missing column: '{0}' is absent or not numeric")]
    MissingColumn(String),

    #[error("chart rendering failed: {0}")]
    Render(String),
}

impl From<StatsError> for ChartError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::MissingColumn(col) => ChartError::MissingColumn(col),
        }
    }
}

pub(crate) type DrawResult = Result<(), Box<dyn std::error::Error>>;

pub(crate) type XyChart<'a, 'b> =
    ChartContext<'a, SVGBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Render one chart into an SVG string. `draw` receives the white root area.
pub(crate) fn render_svg<F>(title: &str, size: (u32, u32), draw: F) -> Result<ChartArtifact, ChartError>
where
    F: FnOnce(&DrawingArea<SVGBackend<'_>, Shift>) -> DrawResult,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;
        draw(&root).map_err(render_error)?;
        root.present().map_err(render_error)?;
    }
    log::debug!("Rendered chart '{title}' ({} bytes)", svg.len());
    Ok(ChartArtifact {
        title: title.to_string(),
        svg,
    })
}

fn render_error(e: impl std::fmt::Display) -> ChartError {
    ChartError::Render(e.to_string())
}

/// All non-null values of a numeric column.
pub(crate) fn numeric_values(table: &EmployeeTable, column: &str) -> Result<Vec<f64>, ChartError> {
    table
        .numeric_values(column)
        .ok_or_else(|| ChartError::MissingColumn(column.to_string()))
}

/// Rows where both columns hold numbers.
pub(crate) fn numeric_pairs(
    table: &EmployeeTable,
    x: &str,
    y: &str,
) -> Result<Vec<(f64, f64)>, ChartError> {
    for col in [x, y] {
        if !table.is_numeric_column(col) {
            return Err(ChartError::MissingColumn(col.to_string()));
        }
    }
    table
        .numeric_pairs(x, y)
        .ok_or_else(|| ChartError::MissingColumn(x.to_string()))
}

/// Label integral tick positions, leave the rest blank.
pub(crate) fn integral_label(v: &f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{v:.0}")
    } else {
        String::new()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::data::model::{EmployeeTable, Record, Value};

    /// Small table with the columns the dashboard charts read.
    pub fn sample_table() -> EmployeeTable {
        let columns = [
            "Employee_ID",
            "Department",
            "Training_Hours",
            "Performance_Score",
            "Productivity_Score",
            "Overtime_Hours",
        ];
        let rows: [[f64; 6]; 8] = [
            [1.0, 3.0, 10.0, 1.0, 40.0, 12.0],
            [2.0, 0.0, 20.0, 2.0, 55.0, 10.0],
            [3.0, 1.0, 25.0, 2.0, 52.0, 9.0],
            [4.0, 3.0, 40.0, 3.0, 61.0, 8.0],
            [5.0, 5.0, 45.0, 3.0, 66.0, 7.0],
            [6.0, 2.0, 60.0, 4.0, 70.0, 5.0],
            [7.0, 3.0, 75.0, 5.0, 88.0, 3.0],
            [8.0, 7.0, 80.0, 5.0, 91.0, 2.0],
        ];
        let records = rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .zip(row.iter())
                    .map(|(c, v)| {
                        let value = if v.fract() == 0.0 && *c != "Productivity_Score" {
                            Value::Integer(*v as i64)
                        } else {
                            Value::Float(*v)
                        };
                        (c.to_string(), value)
                    })
                    .collect::<Record>()
            })
            .collect();
        EmployeeTable::new(columns.iter().map(|c| c.to_string()).collect(), records)
    }
}
