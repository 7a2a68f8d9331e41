/// Default path of the `KEY="VALUE"` config file.
pub(super) const DEFAULT_CONFIG_PATH: &str = "/etc/cluster-load/cluster-load.cfg";

/// Default path of the JSON topology snapshot the driver reloads each cycle.
pub(super) const DEFAULT_TOPOLOGY_PATH: &str = "/etc/cluster-load/topology.json";

pub(super) const DEFAULT_CLUSTER_NAME: &str = "default_cluster";

/// Seconds between two snapshot builds.
pub(super) const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 20;

/// Relative deviation from the average load score beyond which a backend is LOW or HIGH.
pub(super) const DEFAULT_LOAD_SCORE_THRESHOLD: f64 = 0.1;

pub(super) const DEFAULT_CAPACITY_WEIGHT: f64 = 0.5;
pub(super) const DEFAULT_REPLICA_WEIGHT: f64 = 0.5;

/// Used-percent at which the adaptive capacity coefficient reaches 1.0.
pub(super) const DEFAULT_CAPACITY_USED_PERCENT_HIGH_WATER: f64 = 0.75;

pub(super) const DEFAULT_STORAGE_HIGH_WATERMARK_USAGE_PERCENT: f64 = 0.85;

/// 2 GiB.
pub(super) const DEFAULT_STORAGE_MIN_LEFT_CAPACITY_BYTES: u64 = 2 * 1024 * 1024 * 1024;

pub(super) const DEFAULT_STORAGE_FLOOD_STAGE_USAGE_PERCENT: f64 = 0.95;

/// 1 GiB.
pub(super) const DEFAULT_STORAGE_FLOOD_STAGE_LEFT_CAPACITY_BYTES: u64 = 1024 * 1024 * 1024;
