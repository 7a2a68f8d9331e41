use crate::stats::ClusterLoadStatistic;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Holder of the currently published snapshot.
///
/// Snapshots are never mutated once published; a refresh swaps in a new
/// `Arc`, so readers see either the old or the new snapshot, never a
/// half-built one.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: RwLock<Option<Arc<ClusterLoadStatistic>>>,
    generation: AtomicU64,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current snapshot and return the new generation number.
    pub async fn publish(&self, snapshot: ClusterLoadStatistic) -> u64 {
        let snapshot = Arc::new(snapshot);
        let mut current = self.current.write().await;
        *current = Some(snapshot);
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// The latest snapshot, or `None` before the first successful build.
    pub async fn current(&self) -> Option<Arc<ClusterLoadStatistic>> {
        self.current.read().await.as_ref().map(Arc::clone)
    }

    /// Number of snapshots published so far.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
