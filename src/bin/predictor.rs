use std::sync::Arc;

use clap::Parser;

use employee_insight::config::PredictorArgs;
use employee_insight::state::PredictorContext;
use employee_insight::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = PredictorArgs::parse();
    let addr = args.server.addr(PredictorArgs::DEFAULT_PORT)?;

    let ctx = Arc::new(PredictorContext::load(&args.data, &args.model, args.seed)?);
    if args.seed.is_some() {
        log::info!("Simulated series are seeded");
    }
    web::serve(web::predictor_router(ctx), addr, "Predictor").await
}
