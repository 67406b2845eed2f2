use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use backend_lib::{
    config::{Settings, StorageBackend, DEFAULT_CONFIG_FILE},
    router,
    storage::{FlatFileStorage, MemoryStore, Store},
    telemetry, AppState,
};
use clap::Parser;
use tokio::net::TcpListener;

/// Accounts server: users, sessions and groups over HTTP
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (TOML). `ACCOUNTS_*` env vars override it.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Override the configured listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load_from(&cli.config)?;
    if let Some(port) = cli.port {
        settings.server.port = port;
    }
    telemetry::init_tracing(&settings.log)?;

    match settings.storage.backend {
        StorageBackend::Memory => serve(MemoryStore::new(), settings).await,
        StorageBackend::File => {
            let storage = FlatFileStorage::new(&settings.storage.path).with_context(|| {
                format!("failed to open data dir {}", settings.storage.path.display())
            })?;
            serve(storage, settings).await
        },
    }
}

async fn serve<S: Store>(storage: S, settings: Settings) -> anyhow::Result<()> {
    let addr = settings.bind_addr()?;
    let backend = settings.storage.backend;
    let state = Arc::new(AppState::new(storage, settings)?);
    let app = router::create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, ?backend, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for shutdown signal");
    }
}
