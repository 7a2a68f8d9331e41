//! Collaborator interfaces the snapshot builder reads from.
//!
//! Membership and disk telemetry come from the cluster topology service,
//! replica counts from the tablet inverted index. Both are borrowed only for
//! the duration of a build.

mod fixture;

pub use fixture::{BackendFixture, StaticTopology};

use crate::error::LoadBalanceError;
use crate::stats::{DiskState, StorageMedium};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type BackendId = i64;
pub type PathHash = i64;
pub type TabletId = i64;

/// A storage node as reported by the topology service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendDescriptor {
    pub id: BackendId,
    pub cluster: String,
    #[serde(default)]
    pub host: String,
    #[serde(default = "default_alive")]
    pub alive: bool,
}

const fn default_alive() -> bool {
    true
}

/// Telemetry for one root path on a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiskInfo {
    pub root_path: String,
    pub path_hash: PathHash,
    pub medium: StorageMedium,
    pub capacity_bytes: u64,
    pub used_bytes: u64,
    #[serde(default)]
    pub state: DiskState,
    #[serde(default)]
    pub reported_at: Option<DateTime<Utc>>,
}

/// Cluster membership and per-backend disk telemetry.
pub trait TopologyService {
    /// Live backends of `cluster`, keyed by id. May be empty.
    fn backends_in_cluster(&self, cluster: &str) -> BTreeMap<BackendId, BackendDescriptor>;

    fn backend(&self, backend_id: BackendId) -> Option<BackendDescriptor>;

    /// Disk paths of one backend. An empty list means nothing was reported.
    fn disks(&self, backend_id: BackendId) -> Vec<DiskInfo>;
}

/// Replica placement index.
pub trait ReplicaIndex {
    /// Number of replicas `backend_id` holds on paths of `medium`.
    fn replica_count(
        &self,
        backend_id: BackendId,
        medium: StorageMedium,
    ) -> Result<u64, LoadBalanceError>;
}
