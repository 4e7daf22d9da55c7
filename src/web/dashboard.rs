use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::Serialize;
use tera::Context;

use super::{error_page, render, templates};
use crate::charts::distribution::PERFORMANCE_COLUMN;
use crate::charts::{self, ChartArtifact};
use crate::data::labels::{apply_department_labels, department_means};
use crate::data::loader::load_file;
use crate::state::DashboardContext;

/// Number of features in the correlation ranking chart.
pub const TOP_CORRELATIONS: usize = 5;

/// One fixed narrative insight.
#[derive(Debug, Clone, Serialize)]
pub struct Insight {
    pub key: &'static str,
    pub title: &'static str,
    pub text: &'static str,
}

pub const INSIGHTS: [Insight; 3] = [
    Insight {
        key: "top_performers",
        title: "Top performers",
        text: "Employees with training hours above the 75th percentile, balanced workloads \
               (3 to 5 projects/year), and Engagement_Index > 1.5 show the highest average \
               Performance Score.",
    },
    Insight {
        key: "underperforming_departments",
        title: "Underperforming departments",
        text: "Customer Support and HR average below 3.0; these teams log >10 overtime \
               hours/week and have Satisfaction_Score < 3.5.",
    },
    Insight {
        key: "burnout_indicators",
        title: "Burnout indicators",
        text: "Teams working >12 overtime hours weekly with Engagement_Index < 1.0 are at \
               high risk of burnout and performance decline.",
    },
];

/// Department row as displayed.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentRow {
    pub department: String,
    pub mean_score: String,
    pub employees: usize,
}

/// Everything the dashboard template needs.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub insights: Vec<Insight>,
    pub department_performance: Vec<DepartmentRow>,
    pub charts: Vec<ChartArtifact>,
}

/// Load the dataset at `path` and build the whole page. Fails on the first
/// error; the page is never partially rendered.
pub fn build_page(path: &Path) -> anyhow::Result<DashboardPage> {
    let mut table = load_file(path)?;
    apply_department_labels(&mut table);
    log::debug!("Dashboard data: {} rows from {}", table.len(), path.display());

    let department_performance = department_means(&table, PERFORMANCE_COLUMN)
        .into_iter()
        .map(|d| DepartmentRow {
            department: d.department,
            mean_score: format!("{:.2}", d.mean_score),
            employees: d.employees,
        })
        .collect();

    let charts = vec![
        charts::performance_distribution(&table).context("performance distribution")?,
        charts::top_feature_correlations(&table, PERFORMANCE_COLUMN, TOP_CORRELATIONS)
            .context("feature correlations")?,
        charts::training_by_performance(&table).context("training by performance")?,
        charts::productivity_histogram(&table).context("productivity histogram")?,
        charts::training_performance_joint(&table).context("training vs performance")?,
    ];

    Ok(DashboardPage {
        insights: INSIGHTS.to_vec(),
        department_performance,
        charts,
    })
}

pub async fn index(State(ctx): State<Arc<DashboardContext>>) -> Response {
    let path = ctx.data_path.clone();
    let built = tokio::task::spawn_blocking(move || build_page(&path))
        .await
        .map_err(anyhow::Error::from)
        .and_then(|page| page);

    let page = match built {
        Ok(page) => page,
        Err(e) => {
            log::error!("Dashboard failed: {e:#}");
            return error_page(&ctx.templates, &format!("{e:#}"));
        }
    };

    match Context::from_serialize(&page) {
        Ok(tctx) => render(&ctx.templates, templates::DASHBOARD, &tctx, StatusCode::OK),
        Err(e) => {
            log::error!("Dashboard context failed: {e}");
            error_page(&ctx.templates, &e.to_string())
        }
    }
}
