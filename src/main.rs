use std::sync::Arc;

use clap::Parser;

use employee_insight::config::DashboardArgs;
use employee_insight::state::DashboardContext;
use employee_insight::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = DashboardArgs::parse();
    let addr = args.server.addr(DashboardArgs::DEFAULT_PORT)?;
    log::info!("Dashboard data file: {}", args.data.display());

    let ctx = Arc::new(DashboardContext::new(args.data)?);
    web::serve(web::dashboard_router(ctx), addr, "Dashboard").await
}
