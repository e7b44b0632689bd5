use std::sync::Arc;

use clap::Parser;
use foodguard_api::{
    application::http::server::http_server::{router, state},
    args::Args,
    logging::init_logger,
};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log);

    let state = state(args.clone()).await?;
    let router = router(state)?;

    let addr = format!("{}:{}", args.server.host, args.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("FoodGuard API listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
