use crate::stats::StorageMedium;
use crate::topology::BackendId;

/// Reasons a backend's load statistic could not be captured for a cycle.
///
/// These never abort a snapshot build: the backend is logged and left out
/// until the next cycle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadBalanceError {
    #[error("backend {0} does not exist")]
    BackendNotFound(BackendId),

    #[error("backend {0} reported no disk paths")]
    NoDiskPaths(BackendId),

    #[error("backend {backend_id} disk {path} last reported {age_secs}s ago")]
    StaleDiskReport { backend_id: BackendId, path: String, age_secs: i64 },

    #[error("replica index unavailable for backend {backend_id}: {reason}")]
    ReplicaIndexUnavailable { backend_id: BackendId, reason: String },
}

/// Why a path (or every path of a backend) cannot take a tablet.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FitRejection {
    #[error("backend {backend_id} has no {medium} path")]
    MediumNotMatch { backend_id: BackendId, medium: StorageMedium },

    #[error("path {path} is offline")]
    DiskOffline { path: String },

    #[error("path {path} does not fit tablet with size {tablet_size}: capacity exceeded")]
    CapacityExceed { path: String, tablet_size: u64 },

    #[error("path {path} does not fit tablet with size {tablet_size}: flood stage reached")]
    FloodStage { path: String, tablet_size: u64 },
}
