use super::{BackendDescriptor, BackendId, DiskInfo, ReplicaIndex, TopologyService};
use crate::error::LoadBalanceError;
use crate::stats::{PerMedium, StorageMedium};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;

/// One backend entry of a topology file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendFixture {
    #[serde(flatten)]
    pub descriptor: BackendDescriptor,
    #[serde(default)]
    pub disks: Vec<DiskInfo>,
    #[serde(default)]
    pub replicas: PerMedium<u64>,
    /// When set, the replica index reports itself unavailable for this backend.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replica_index_error: Option<String>,
}

/// In-memory topology and replica index, typically loaded from a JSON file
/// exported by the cluster manager.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticTopology {
    backends: Vec<BackendFixture>,
}

impl StaticTopology {
    pub const fn new(backends: Vec<BackendFixture>) -> Self {
        Self { backends }
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse topology JSON")
    }

    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read topology file: {path}"))?;
        Self::from_json(&contents).with_context(|| format!("Invalid topology file: {path}"))
    }

    pub fn backends(&self) -> &[BackendFixture] {
        &self.backends
    }

    fn find(&self, backend_id: BackendId) -> Option<&BackendFixture> {
        self.backends.iter().find(|b| b.descriptor.id == backend_id)
    }
}

impl TopologyService for StaticTopology {
    fn backends_in_cluster(&self, cluster: &str) -> BTreeMap<BackendId, BackendDescriptor> {
        self.backends
            .iter()
            .filter(|b| b.descriptor.cluster == cluster)
            .map(|b| (b.descriptor.id, b.descriptor.clone()))
            .collect()
    }

    fn backend(&self, backend_id: BackendId) -> Option<BackendDescriptor> {
        self.find(backend_id).map(|b| b.descriptor.clone())
    }

    fn disks(&self, backend_id: BackendId) -> Vec<DiskInfo> {
        self.find(backend_id).map(|b| b.disks.clone()).unwrap_or_default()
    }
}

impl ReplicaIndex for StaticTopology {
    fn replica_count(
        &self,
        backend_id: BackendId,
        medium: StorageMedium,
    ) -> Result<u64, LoadBalanceError> {
        let Some(backend) = self.find(backend_id) else {
            return Ok(0);
        };
        if let Some(reason) = &backend.replica_index_error {
            return Err(LoadBalanceError::ReplicaIndexUnavailable {
                backend_id,
                reason: reason.clone(),
            });
        }
        Ok(*backend.replicas.get(medium))
    }
}
