/// HTTP surface of the two servers.
///
/// ```text
///   dashboard:  GET /                  ──► load file ──► stats + charts ──► dashboard.html
///   predictor:  GET /                  ──► empty form
///               POST /predict          ──► lookup ──► features ──► model ──► simulate ──► predictor.html
///   both:       GET /static/control.js
/// ```
///
/// Handlers share one immutable context through axum `State`; blocking work
/// runs on `spawn_blocking`.

pub mod dashboard;
pub mod predictor;
pub mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use tera::{Context, Tera};
use tokio::net::TcpListener;

use crate::state::{DashboardContext, PredictorContext};

pub const CONTROL_JS: &str = include_str!("../../static/control.js");

pub fn dashboard_router(ctx: Arc<DashboardContext>) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/static/control.js", get(control_js))
        .with_state(ctx)
}

pub fn predictor_router(ctx: Arc<PredictorContext>) -> Router {
    Router::new()
        .route("/", get(predictor::index))
        .route("/predict", post(predictor::predict))
        .route("/static/control.js", get(control_js))
        .with_state(ctx)
}

/// Bind `addr` and serve `app` until the process ends.
pub async fn serve(app: Router, addr: SocketAddr, name: &str) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    log::info!("{name} listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn control_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CONTROL_JS,
    )
}

/// Render `template`, answering with `status`. A template failure becomes a
/// bare 500 page.
pub(crate) fn render(tera: &Tera, template: &str, ctx: &Context, status: StatusCode) -> Response {
    match tera.render(template, ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            log::error!("Rendering {template} failed: {e:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(format!(
                    "<!DOCTYPE html><p>An error occurred: could not render {template}</p>"
                )),
            )
                .into_response()
        }
    }
}

/// Full error page carrying `message`, served with HTTP 500.
pub(crate) fn error_page(tera: &Tera, message: &str) -> Response {
    let mut ctx = Context::new();
    ctx.insert("message", message);
    render(tera, templates::ERROR, &ctx, StatusCode::INTERNAL_SERVER_ERROR)
}
