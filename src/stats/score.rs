use crate::config::BalanceConfig;
use serde::Serialize;

/// Below this used-percent the adaptive capacity coefficient stays at the configured weight.
const ADAPTIVE_LOW_WATER: f64 = 0.5;

/// A backend's load on one medium relative to the cluster average.
///
/// 1.0 means exactly average; above 1.0 means more loaded than average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoadScore {
    pub capacity_coefficient: f64,
    pub replica_coefficient: f64,
    pub score: f64,
}

impl Default for LoadScore {
    fn default() -> Self {
        Self { capacity_coefficient: 0.5, replica_coefficient: 0.5, score: 0.0 }
    }
}

impl LoadScore {
    /// Score `used`/`capacity` bytes and `replicas` against the cluster averages
    /// for the same medium.
    ///
    /// A zero average contributes a zero term instead of dividing by zero.
    pub fn calculate(
        used: u64,
        capacity: u64,
        replicas: u64,
        avg_used_percent: f64,
        avg_replica_num: f64,
        config: &BalanceConfig,
    ) -> Self {
        let used_percent = if capacity == 0 { 0.0 } else { used as f64 / capacity as f64 };

        let capacity_proportion =
            if avg_used_percent > 0.0 { used_percent / avg_used_percent } else { 0.0 };
        let replica_proportion =
            if avg_replica_num > 0.0 { replicas as f64 / avg_replica_num } else { 0.0 };

        let capacity_coefficient = capacity_coefficient(used_percent, config);
        let replica_coefficient = if config.adaptive_capacity_weight {
            1.0 - capacity_coefficient
        } else {
            config.replica_weight
        };

        Self {
            capacity_coefficient,
            replica_coefficient,
            score: capacity_proportion * capacity_coefficient
                + replica_proportion * replica_coefficient,
        }
    }
}

/// Fixed weight, or when adaptive: the configured weight below 50% usage,
/// 1.0 above the high water mark, linear in between.
fn capacity_coefficient(used_percent: f64, config: &BalanceConfig) -> f64 {
    let base = config.capacity_weight;
    if !config.adaptive_capacity_weight || used_percent < ADAPTIVE_LOW_WATER {
        return base;
    }
    let high_water = config.capacity_used_percent_high_water;
    if used_percent > high_water {
        return 1.0;
    }
    base + (1.0 - base) * (used_percent - ADAPTIVE_LOW_WATER) / (high_water - ADAPTIVE_LOW_WATER)
}
