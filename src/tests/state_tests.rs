use super::{build, equal_weights, ssd_backend, two_backend_ssd_topology};
use crate::state::SnapshotStore;
use crate::topology::StaticTopology;
use std::sync::Arc;

#[tokio::test]
async fn test_store_starts_empty() {
    let store = SnapshotStore::new();
    assert!(store.current().await.is_none(), "nothing published yet");
    assert_eq!(store.generation(), 0);
}

#[tokio::test]
async fn test_publish_swaps_snapshot() {
    let store = SnapshotStore::new();

    let first = build(&two_backend_ssd_topology(), &equal_weights());
    assert_eq!(store.publish(first).await, 1);
    let reader = store.current().await.unwrap();
    assert_eq!(reader.all_backend_load_statistics().len(), 2);

    let single = StaticTopology::new(vec![ssd_backend(7, 10, 100, 10)]);
    assert_eq!(store.publish(build(&single, &equal_weights())).await, 2);

    // A reader holding the old snapshot keeps seeing it unchanged.
    assert_eq!(reader.all_backend_load_statistics().len(), 2);
    let latest = store.current().await.unwrap();
    assert_eq!(latest.all_backend_load_statistics().len(), 1);
    assert!(!Arc::ptr_eq(&reader, &latest), "publish must swap in a new snapshot");
    assert_eq!(store.generation(), 2);
}
