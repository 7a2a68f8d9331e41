use super::{format_percent, Classification, StorageMedium};
use crate::config::BalanceConfig;
use crate::error::FitRejection;
use crate::topology::{BackendId, DiskInfo, PathHash};
use serde::{Deserialize, Serialize};

/// Whether a disk path is serving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiskState {
    #[default]
    Online,
    Offline,
}

/// Usage of one root path on one backend, captured at build time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathLoadStatistic {
    backend_id: BackendId,
    path: String,
    path_hash: PathHash,
    medium: StorageMedium,
    capacity_bytes: u64,
    used_bytes: u64,
    state: DiskState,
    class: Classification,
}

impl PathLoadStatistic {
    pub fn from_disk(backend_id: BackendId, disk: &DiskInfo) -> Self {
        Self {
            backend_id,
            path: disk.root_path.clone(),
            path_hash: disk.path_hash,
            medium: disk.medium,
            capacity_bytes: disk.capacity_bytes,
            used_bytes: disk.used_bytes,
            state: disk.state,
            class: Classification::Unclassified,
        }
    }

    pub const fn backend_id(&self) -> BackendId {
        self.backend_id
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn path_hash(&self) -> PathHash {
        self.path_hash
    }

    pub const fn medium(&self) -> StorageMedium {
        self.medium
    }

    pub const fn capacity_bytes(&self) -> u64 {
        self.capacity_bytes
    }

    pub const fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    pub const fn state(&self) -> DiskState {
        self.state
    }

    pub fn is_online(&self) -> bool {
        self.state == DiskState::Online
    }

    pub const fn class(&self) -> Classification {
        self.class
    }

    pub(crate) fn set_class(&mut self, class: Classification) {
        self.class = class;
    }

    /// Used fraction (0.0 - 1.0); 0.0 for a zero-capacity path.
    pub fn used_percent(&self) -> f64 {
        if self.capacity_bytes == 0 {
            return 0.0;
        }
        self.used_bytes as f64 / self.capacity_bytes as f64
    }

    /// Check whether a tablet of `tablet_size` bytes can be placed here.
    ///
    /// Normal placement must stay under the high watermark AND keep the minimum
    /// free bytes. Supplement placement (replica repair) is refused only once
    /// both flood stage limits are crossed.
    pub fn is_fit(
        &self,
        tablet_size: u64,
        supplement: bool,
        config: &BalanceConfig,
    ) -> Result<(), FitRejection> {
        if !self.is_online() {
            return Err(FitRejection::DiskOffline { path: self.path.clone() });
        }
        if self.capacity_bytes == 0 {
            return Err(FitRejection::CapacityExceed { path: self.path.clone(), tablet_size });
        }

        let capacity = self.capacity_bytes as f64;
        let usage_after = (self.used_bytes as f64 + tablet_size as f64) / capacity;
        let left_after =
            i128::from(self.capacity_bytes) - i128::from(self.used_bytes) - i128::from(tablet_size);

        if supplement {
            if usage_after > config.storage_flood_stage_usage_percent
                && left_after < i128::from(config.storage_flood_stage_left_capacity_bytes)
            {
                return Err(FitRejection::FloodStage { path: self.path.clone(), tablet_size });
            }
            return Ok(());
        }

        if usage_after > config.storage_high_watermark_usage_percent
            || left_after < i128::from(config.storage_min_left_capacity_bytes)
        {
            return Err(FitRejection::CapacityExceed { path: self.path.clone(), tablet_size });
        }
        Ok(())
    }

    /// Display row: path, path hash, used bytes, capacity bytes, used percent.
    pub fn row(&self) -> Vec<String> {
        vec![
            self.path.clone(),
            self.path_hash.to_string(),
            self.used_bytes.to_string(),
            self.capacity_bytes.to_string(),
            format_percent(self.used_bytes, self.capacity_bytes),
        ]
    }
}
