//! Load statistics for a replicated tablet storage tier.
//!
//! Each cycle builds an immutable [`ClusterLoadStatistic`] snapshot: per
//! storage medium it scores every backend against the cluster averages,
//! classifies backends as LOW/MID/HIGH, and answers whether a single tablet
//! move would improve balance.

pub mod config;
pub mod driver;
pub mod error;
pub mod state;
pub mod stats;
pub mod topology;

#[cfg(test)]
mod tests;

pub use config::{AppConfig, BalanceConfig};
pub use error::{FitRejection, LoadBalanceError};
pub use state::SnapshotStore;
pub use stats::{
    BackendLoadStatistic, ClassBuckets, Classification, ClusterLoadStatistic, LoadScore,
    MigrationEvaluation, PathLoadStatistic, StorageMedium,
};
pub use topology::{BackendId, ReplicaIndex, StaticTopology, TopologyService};
