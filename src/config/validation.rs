use super::settings::{AppConfig, BalanceConfig};
use anyhow::Result;

const WEIGHT_SUM_EPSILON: f64 = 1e-6;

fn is_fraction(v: f64) -> bool {
    v > 0.0 && v <= 1.0
}

impl AppConfig {
    /// Validate configuration values are sane.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.cluster_name.is_empty(), "cluster_name must not be empty");
        anyhow::ensure!(self.refresh_interval_secs >= 1, "refresh_interval_secs must be >= 1");
        self.balance.validate()
    }
}

impl BalanceConfig {
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            self.load_score_threshold > 0.0,
            "load_score_threshold must be greater than 0.0"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.capacity_weight)
                && (0.0..=1.0).contains(&self.replica_weight),
            "capacity_weight and replica_weight must be between 0.0 and 1.0"
        );
        anyhow::ensure!(
            (self.capacity_weight + self.replica_weight - 1.0).abs() < WEIGHT_SUM_EPSILON,
            "capacity_weight + replica_weight must equal 1.0"
        );
        anyhow::ensure!(
            self.capacity_used_percent_high_water > 0.5
                && self.capacity_used_percent_high_water <= 1.0,
            "capacity_used_percent_high_water must be between 0.5 (exclusive) and 1.0"
        );
        anyhow::ensure!(
            is_fraction(self.storage_high_watermark_usage_percent)
                && is_fraction(self.storage_flood_stage_usage_percent),
            "storage usage percents must be between 0.0 (exclusive) and 1.0"
        );
        Ok(())
    }
}
