mod api;
mod config;
mod db;
mod models;
mod server;
mod store;
mod validation;

use anyhow::Result;
use clap::Parser;

use crate::config::Cli;

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = config::init(cli)?;
    init_tracing()?;
    tracing::info!(backend = ?config.store_backend, "starting project registry");

    server::run(config).await
}
