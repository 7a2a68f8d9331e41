use anyhow::Result;
use cluster_load::{driver, AppConfig, SnapshotStore};
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cluster_load=info".into()),
        )
        .init();

    info!("Cluster load v{} starting up", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!(
        "Configuration loaded: cluster={}, topology_path={}, refresh_interval={}s",
        config.cluster_name, config.topology_path, config.refresh_interval_secs
    );

    let store = Arc::new(SnapshotStore::new());
    let cancel = CancellationToken::new();
    let driver_task = tokio::spawn(driver::run(config, Arc::clone(&store), cancel.clone()));

    shutdown_signal().await;
    cancel.cancel();
    driver_task.await?;

    info!("Cluster load shut down cleanly after {} snapshot(s)", store.generation());
    Ok(())
}

/// Wait for SIGTERM or SIGINT for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {e}");
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
                warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { warn!("Received Ctrl+C, shutting down..."); },
        () = terminate => { warn!("Received SIGTERM, shutting down..."); },
    }
}
