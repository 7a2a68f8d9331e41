use crate::config::AppConfig;
use crate::state::SnapshotStore;
use crate::stats::ClusterLoadStatistic;
use crate::topology::StaticTopology;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Reload the topology file and build a fresh snapshot from it.
pub fn refresh_snapshot(config: &AppConfig) -> Result<ClusterLoadStatistic> {
    let topology = StaticTopology::load(&config.topology_path)?;
    Ok(ClusterLoadStatistic::build(&config.cluster_name, &topology, &topology, &config.balance))
}

/// Rebuild and publish a snapshot every `refresh_interval_secs` until cancelled.
///
/// A failed refresh keeps the previously published snapshot.
pub async fn run(config: AppConfig, store: Arc<SnapshotStore>, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(Duration::from_secs(config.refresh_interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let config = Arc::new(config);

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                info!("Snapshot driver stopping");
                return;
            }
            _ = ticker.tick() => {}
        }

        let cycle_config = Arc::clone(&config);
        let outcome = tokio::task::spawn_blocking(move || refresh_snapshot(&cycle_config))
            .await
            .context("Snapshot build task panicked")
            .and_then(|result| result);

        match outcome {
            Ok(snapshot) => {
                let backends = snapshot.all_backend_load_statistics().len();
                let skipped = snapshot.skipped_backends().len();
                debug!("Cluster {} load brief:\n{}", snapshot.cluster(), snapshot.brief());
                let generation = store.publish(snapshot).await;
                info!(generation, backends, skipped, "Published cluster load snapshot");
            }
            Err(e) => warn!("Failed to refresh cluster load snapshot: {e:#}"),
        }
    }
}
