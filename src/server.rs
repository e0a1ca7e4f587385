//! Process lifecycle: bootstrap the store, serve, shut down on Ctrl-C.

use std::future::Future;

use anyhow::Result;
use tokio::net::TcpListener;

use crate::api;
use crate::config::{Config, StoreBackend};
use crate::db;
use crate::store::{MemoryStore, ProjectStore};

/// Bootstrap the configured store and serve until interrupted
pub async fn run(config: Config) -> Result<()> {
    run_until(config, shutdown_signal()).await
}

/// Bootstrap the configured store and serve until `shutdown` resolves
pub async fn run_until<F>(config: Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(config.socket_addr()).await?;

    match config.store_backend {
        StoreBackend::Sqlite => {
            let db = db::init(&config).await?;
            serve(listener, db.clone(), shutdown).await?;
            db.close().await;
        }
        StoreBackend::Memory => {
            tracing::info!("using in-memory store, records will not survive a restart");
            serve(listener, MemoryStore::new(), shutdown).await?;
        }
    }

    tracing::info!("application is shutting down");
    Ok(())
}

async fn serve<S, F>(listener: TcpListener, store: S, shutdown: F) -> Result<()>
where
    S: ProjectStore,
    F: Future<Output = ()> + Send + 'static,
{
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, api::router(store))
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
