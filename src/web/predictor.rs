use std::sync::Arc;

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use serde::{Deserialize, Serialize};
use tera::Context;
use thiserror::Error;

use super::{error_page, render, templates};
use crate::charts::{ChartArtifact, ChartError, leave_comparison, performance_trend};
use crate::employee::{self, EmployeeProfile, LookupError};
use crate::features::{FeatureError, FeatureVector};
use crate::simulation::{request_rng, simulate_leave_variants, simulate_trend, trend_start};
use crate::state::PredictorContext;

/// Every way a prediction request can fail. All of them are shown inline on
/// the predictor page.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Employee ID {0} not found.")]
    NotFound(i64),

    #[error("Missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid employee ID '{0}': enter a whole number.")]
    InvalidId(String),

    #[error("An error occurred: {0}")]
    Unexpected(String),
}

impl From<LookupError> for PredictionError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::NotFound(id) => PredictionError::NotFound(id),
        }
    }
}

impl From<FeatureError> for PredictionError {
    fn from(e: FeatureError) -> Self {
        match e {
            FeatureError::MissingColumns(cols) => PredictionError::MissingColumns(cols),
            other => PredictionError::Unexpected(other.to_string()),
        }
    }
}

impl From<ChartError> for PredictionError {
    fn from(e: ChartError) -> Self {
        PredictionError::Unexpected(e.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictForm {
    #[serde(default)]
    pub employee_id: String,
}

/// A successful prediction, formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct PredictionView {
    pub profile: EmployeeProfile,
    pub hire_date: String,
    pub tenure: String,
    pub leave_count: String,
    pub projects_per_year: String,
    pub score: String,
    pub before_leave: String,
    pub after_leave: String,
    pub trend_chart: ChartArtifact,
    pub comparison_chart: ChartArtifact,
}

fn or_dash(v: Option<String>) -> String {
    v.unwrap_or_else(|| "-".to_string())
}

/// Parse the submitted identifier and run lookup, feature assembly,
/// inference and the simulated series for it.
pub fn run_prediction(ctx: &PredictorContext, raw_id: &str) -> Result<PredictionView, PredictionError> {
    let raw_id = raw_id.trim();
    let id: i64 = raw_id
        .parse()
        .map_err(|_| PredictionError::InvalidId(raw_id.to_string()))?;

    let record = employee::find(&ctx.table, id)?;
    let vector = FeatureVector::from_record(record)?;
    let score = ctx.predictor.predict(&vector)?;
    log::debug!("Employee {id}: predicted score {score:.3}");

    let today = ctx.today();
    let mut rng = request_rng(ctx.seed);
    let result = simulate_leave_variants(score, &mut rng);
    let trend = simulate_trend(trend_start(today), &mut rng);

    let profile = EmployeeProfile::from_record(id, record, today);
    Ok(PredictionView {
        hire_date: or_dash(profile.hire_date.clone()),
        tenure: or_dash(profile.tenure_years.map(|y| format!("{y:.1} years"))),
        leave_count: or_dash(profile.leave_count.map(|n| format!("{n:.2}"))),
        projects_per_year: or_dash(profile.projects_per_year.map(|n| format!("{n:.2}"))),
        score: format!("{:.2}", result.score),
        before_leave: format!("{:.2}", result.before_leave),
        after_leave: format!("{:.2}", result.after_leave),
        trend_chart: performance_trend(&trend)?,
        comparison_chart: leave_comparison(&result)?,
        profile,
    })
}

fn page(
    ctx: &PredictorContext,
    employee_id: &str,
    outcome: Option<Result<PredictionView, PredictionError>>,
) -> Response {
    let (result, error) = match outcome {
        Some(Ok(view)) => (Some(view), None),
        Some(Err(e)) => (None, Some(e.to_string())),
        None => (None, None),
    };
    let mut tctx = Context::new();
    tctx.insert("employee_id", employee_id);
    tctx.insert("error", &error);
    tctx.insert("result", &result);
    render(&ctx.templates, templates::PREDICTOR, &tctx, StatusCode::OK)
}

pub async fn index(State(ctx): State<Arc<PredictorContext>>) -> Response {
    page(&ctx, "", None)
}

pub async fn predict(
    State(ctx): State<Arc<PredictorContext>>,
    Form(form): Form<PredictForm>,
) -> Response {
    let worker = Arc::clone(&ctx);
    let raw_id = form.employee_id.clone();
    let outcome = match tokio::task::spawn_blocking(move || run_prediction(&worker, &raw_id)).await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Prediction task failed: {e}");
            return error_page(&ctx.templates, &e.to_string());
        }
    };
    if let Err(e) = &outcome {
        log::error!("Prediction for '{}' failed: {e}", form.employee_id);
    }
    page(&ctx, form.employee_id.trim(), Some(outcome))
}
