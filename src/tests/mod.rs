mod driver_tests;
mod migration_tests;
mod score_tests;
mod state_tests;

use crate::config::BalanceConfig;
use crate::stats::{ClusterLoadStatistic, DiskState, PerMedium, StorageMedium};
use crate::topology::{BackendDescriptor, BackendFixture, BackendId, DiskInfo, StaticTopology};
use chrono::{DateTime, TimeZone, Utc};

pub(crate) const GB: u64 = 1024 * 1024 * 1024;
pub(crate) const CLUSTER: &str = "test_cluster";

pub(crate) fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < 1e-9, "expected {expected}, got {actual}");
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap()
}

pub(crate) fn disk(
    root_path: &str,
    path_hash: i64,
    medium: StorageMedium,
    capacity_bytes: u64,
    used_bytes: u64,
) -> DiskInfo {
    DiskInfo {
        root_path: root_path.to_string(),
        path_hash,
        medium,
        capacity_bytes,
        used_bytes,
        state: DiskState::Online,
        reported_at: Some(fixed_now()),
    }
}

pub(crate) fn replicas(hdd: u64, ssd: u64) -> PerMedium<u64> {
    PerMedium { hdd, ssd }
}

pub(crate) fn backend(
    id: BackendId,
    disks: Vec<DiskInfo>,
    replicas: PerMedium<u64>,
) -> BackendFixture {
    BackendFixture {
        descriptor: BackendDescriptor {
            id,
            cluster: CLUSTER.to_string(),
            host: format!("10.0.0.{id}"),
            alive: true,
        },
        disks,
        replicas,
        replica_index_error: None,
    }
}

/// Single-SSD-path backend with `used_gb` of `capacity_gb` and `ssd_replicas` replicas.
pub(crate) fn ssd_backend(
    id: BackendId,
    used_gb: u64,
    capacity_gb: u64,
    ssd_replicas: u64,
) -> BackendFixture {
    let path = format!("/data{id}/ssd");
    backend(
        id,
        vec![disk(&path, 1000 + id, StorageMedium::Ssd, capacity_gb * GB, used_gb * GB)],
        replicas(0, ssd_replicas),
    )
}

/// Equal 0.5/0.5 weights and a 0.2 relative threshold.
pub(crate) fn equal_weights() -> BalanceConfig {
    BalanceConfig { load_score_threshold: 0.2, ..BalanceConfig::default() }
}

/// Score driven by replica count only.
pub(crate) fn replica_only() -> BalanceConfig {
    BalanceConfig {
        load_score_threshold: 0.2,
        capacity_weight: 0.0,
        replica_weight: 1.0,
        ..BalanceConfig::default()
    }
}

/// BE1: 50/100 GB, 100 replicas. BE2: 10/100 GB, 20 replicas. Both SSD only.
pub(crate) fn two_backend_ssd_topology() -> StaticTopology {
    StaticTopology::new(vec![ssd_backend(1, 50, 100, 100), ssd_backend(2, 10, 100, 20)])
}

pub(crate) fn build(topology: &StaticTopology, config: &BalanceConfig) -> ClusterLoadStatistic {
    ClusterLoadStatistic::build_at(CLUSTER, topology, topology, config, fixed_now())
}

/// Backends of equal capacity whose SSD scores are `replica_counts / mean`.
pub(crate) fn replica_skewed_topology(replica_counts: &[u64]) -> StaticTopology {
    StaticTopology::new(
        replica_counts
            .iter()
            .enumerate()
            .map(|(i, &count)| ssd_backend(i as BackendId + 1, 40, 100, count))
            .collect(),
    )
}
