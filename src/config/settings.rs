use super::defaults::{
    DEFAULT_CAPACITY_USED_PERCENT_HIGH_WATER, DEFAULT_CAPACITY_WEIGHT, DEFAULT_CLUSTER_NAME,
    DEFAULT_CONFIG_PATH, DEFAULT_LOAD_SCORE_THRESHOLD, DEFAULT_REFRESH_INTERVAL_SECS,
    DEFAULT_REPLICA_WEIGHT, DEFAULT_STORAGE_FLOOD_STAGE_LEFT_CAPACITY_BYTES,
    DEFAULT_STORAGE_FLOOD_STAGE_USAGE_PERCENT, DEFAULT_STORAGE_HIGH_WATERMARK_USAGE_PERCENT,
    DEFAULT_STORAGE_MIN_LEFT_CAPACITY_BYTES, DEFAULT_TOPOLOGY_PATH,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Driver configuration: where to find the cluster and how often to rebuild.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub config_path: String,
    pub topology_path: String,
    pub cluster_name: String,
    pub refresh_interval_secs: u64,
    pub balance: BalanceConfig,
}

/// Tunables consumed by scoring, classification and fit checks.
///
/// Passed by value into each snapshot build, so a snapshot keeps evaluating
/// migrations with the settings it was built under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceConfig {
    /// Relative deviation from the average score that makes a backend LOW or HIGH.
    /// Also used as the absolute used-percent deviation for path classification.
    pub load_score_threshold: f64,
    pub capacity_weight: f64,
    pub replica_weight: f64,
    /// Raise the capacity coefficient towards 1.0 as a backend fills up.
    pub adaptive_capacity_weight: bool,
    pub capacity_used_percent_high_water: f64,
    pub storage_high_watermark_usage_percent: f64,
    pub storage_min_left_capacity_bytes: u64,
    pub storage_flood_stage_usage_percent: f64,
    pub storage_flood_stage_left_capacity_bytes: u64,
    /// 0 disables the staleness check.
    pub max_disk_report_age_secs: u64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            load_score_threshold: DEFAULT_LOAD_SCORE_THRESHOLD,
            capacity_weight: DEFAULT_CAPACITY_WEIGHT,
            replica_weight: DEFAULT_REPLICA_WEIGHT,
            adaptive_capacity_weight: false,
            capacity_used_percent_high_water: DEFAULT_CAPACITY_USED_PERCENT_HIGH_WATER,
            storage_high_watermark_usage_percent: DEFAULT_STORAGE_HIGH_WATERMARK_USAGE_PERCENT,
            storage_min_left_capacity_bytes: DEFAULT_STORAGE_MIN_LEFT_CAPACITY_BYTES,
            storage_flood_stage_usage_percent: DEFAULT_STORAGE_FLOOD_STAGE_USAGE_PERCENT,
            storage_flood_stage_left_capacity_bytes:
                DEFAULT_STORAGE_FLOOD_STAGE_LEFT_CAPACITY_BYTES,
            max_disk_report_age_secs: 0,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config_path: DEFAULT_CONFIG_PATH.to_string(),
            topology_path: DEFAULT_TOPOLOGY_PATH.to_string(),
            cluster_name: DEFAULT_CLUSTER_NAME.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            balance: BalanceConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration, merging defaults with config file values and env overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("CL_CONFIG_PATH") {
            config.config_path = path;
        }

        let cfg_path = Path::new(&config.config_path);
        if cfg_path.exists() {
            let contents = fs::read_to_string(cfg_path)
                .with_context(|| format!("Failed to read config file: {}", config.config_path))?;
            config.parse_ini(&contents);
        }

        if let Ok(path) = std::env::var("CL_TOPOLOGY_PATH") {
            config.topology_path = path;
        }
        if let Ok(name) = std::env::var("CL_CLUSTER_NAME") {
            config.cluster_name = name;
        }

        config.validate()?;
        Ok(config)
    }
}
