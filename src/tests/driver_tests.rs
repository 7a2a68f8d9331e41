use super::{build, equal_weights, two_backend_ssd_topology, CLUSTER};
use crate::config::AppConfig;
use crate::driver::run;
use crate::state::SnapshotStore;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let store = Arc::new(SnapshotStore::new());
    store.publish(build(&two_backend_ssd_topology(), &equal_weights())).await;
    let before = store.current().await.unwrap();

    let config = AppConfig {
        topology_path: "/nonexistent/cluster-load/topology.json".to_string(),
        cluster_name: CLUSTER.to_string(),
        refresh_interval_secs: 1,
        ..AppConfig::default()
    };
    let cancel = CancellationToken::new();
    let driver = tokio::spawn(run(config, Arc::clone(&store), cancel.clone()));

    // The first tick fires immediately, so one reload attempt fails in this window.
    tokio::time::sleep(Duration::from_millis(300)).await;
    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(5), driver)
        .await
        .expect("driver should stop once cancelled")
        .unwrap();

    assert_eq!(store.generation(), 1, "a failed reload must not publish");
    let after = store.current().await.unwrap();
    assert!(Arc::ptr_eq(&before, &after), "previous snapshot must stay current");
    assert_eq!(after.all_backend_load_statistics().len(), 2);
}

#[tokio::test]
async fn test_driver_stops_on_cancel_before_first_build() {
    let store = Arc::new(SnapshotStore::new());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let config = AppConfig { topology_path: "/nonexistent.json".to_string(), ..AppConfig::default() };
    tokio::time::timeout(Duration::from_secs(5), run(config, Arc::clone(&store), cancel))
        .await
        .expect("cancelled driver must return");
    assert!(store.current().await.is_none(), "nothing published");
}
