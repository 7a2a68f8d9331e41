mod backend;
mod classification;
mod cluster;
mod medium;
mod ordering;
mod path;
mod score;

pub use backend::{BackendLoadStatistic, MediumStatistic};
pub use classification::{classify_score, classify_used_percent, ClassBuckets, Classification};
pub use cluster::{ClusterLoadStatistic, MediumLoad, MigrationEvaluation, SkippedBackend};
pub use medium::{PerMedium, StorageMedium};
pub use ordering::{hdd_order, mix_order, ordering_for, ssd_order, BackendOrdering};
pub use path::{DiskState, PathLoadStatistic};
pub use score::LoadScore;

/// `used / capacity` as a percentage with three decimals; "0.000" for zero capacity.
pub(crate) fn format_percent(used: u64, capacity: u64) -> String {
    if capacity == 0 {
        return "0.000".to_string();
    }
    format!("{:.3}", used as f64 * 100.0 / capacity as f64)
}
