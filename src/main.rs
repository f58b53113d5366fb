mod config;
mod routes;
mod telemetry;

use std::sync::Arc;

use color_eyre::eyre::WrapErr;
use lib::{Agent, GreedyAgent};
use tracing::info;

use crate::config::Config;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    let _sentry = telemetry::init(&config)?;
    info!("Hello Snakes!");

    let agent = GreedyAgent::new();
    info!(agent = agent.name(), debug = config.debug, "Agent ready");
    let app = routes::router(Arc::new(agent));

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .wrap_err_with(|| format!("failed to bind {address}"))?;
    info!("Listening on {address}");
    axum::serve(listener, app).await?;
    Ok(())
}
