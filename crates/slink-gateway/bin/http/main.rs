mod cli;

use crate::cli::Cli;
use anyhow::Context;
use clap::Parser;
use slink_gateway::backend::StorageBackend;
use slink_gateway::{telemetry, App, AppState};
use slink_generator::RandomGenerator;
use slink_shortener::AllocationPolicy;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Cli::parse();

    telemetry::init(config.log_format.into()).context("failed to install tracing subscriber")?;

    let backend = StorageBackend::from_database_url(&config.database_url)?;

    info!(
        listen_addr = %config.listen_addr,
        public_base_url = %config.public_base_url,
        storage_backend = %backend,
        id_bytes = config.id_bytes,
        max_id_attempts = config.max_id_attempts,
        "starting slink gateway"
    );

    let policy = AllocationPolicy::builder()
        .max_attempts(config.max_id_attempts)
        .build();
    let store = backend
        .connect(RandomGenerator::new(config.id_bytes as usize), policy)
        .await
        .context("failed to open storage backend")?;

    let state = AppState::new(store, config.public_base_url);
    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;

    info!(addr = %config.listen_addr, "gateway listening");

    axum::serve(listener, App::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server failed")?;

    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl-c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
