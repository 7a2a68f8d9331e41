use super::{
    classify_used_percent, format_percent, ClassBuckets, Classification, LoadScore,
    PathLoadStatistic, PerMedium, StorageMedium,
};
use crate::config::BalanceConfig;
use crate::error::{FitRejection, LoadBalanceError};
use crate::topology::{BackendId, ReplicaIndex, TopologyService};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregates of one backend on one medium.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MediumStatistic {
    /// Online paths only.
    pub total_capacity_bytes: u64,
    /// Online paths only.
    pub total_used_bytes: u64,
    pub replica_count: u64,
    pub load_score: LoadScore,
    pub class: Classification,
}

impl MediumStatistic {
    pub fn used_percent(&self) -> f64 {
        if self.total_capacity_bytes == 0 {
            return 0.0;
        }
        self.total_used_bytes as f64 / self.total_capacity_bytes as f64
    }
}

/// Load snapshot of a single backend across its paths and mediums.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendLoadStatistic {
    backend_id: BackendId,
    cluster: String,
    available: bool,
    paths: Vec<PathLoadStatistic>,
    /// `None` when the backend has no path of that medium.
    mediums: PerMedium<Option<MediumStatistic>>,
}

impl BackendLoadStatistic {
    /// Capture disk and replica usage of `backend_id`.
    ///
    /// Scores stay at their default and classes unclassified until the
    /// cluster snapshot has computed its averages.
    pub fn build(
        backend_id: BackendId,
        topology: &dyn TopologyService,
        index: &dyn ReplicaIndex,
        config: &BalanceConfig,
        now: DateTime<Utc>,
    ) -> Result<Self, LoadBalanceError> {
        let backend =
            topology.backend(backend_id).ok_or(LoadBalanceError::BackendNotFound(backend_id))?;

        let disks = topology.disks(backend_id);
        if disks.is_empty() {
            return Err(LoadBalanceError::NoDiskPaths(backend_id));
        }

        if config.max_disk_report_age_secs > 0 {
            let max_age = config.max_disk_report_age_secs as i64;
            for disk in &disks {
                let Some(reported_at) = disk.reported_at else {
                    continue;
                };
                let age_secs = (now - reported_at).num_seconds();
                if age_secs > max_age {
                    return Err(LoadBalanceError::StaleDiskReport {
                        backend_id,
                        path: disk.root_path.clone(),
                        age_secs,
                    });
                }
            }
        }

        let paths: Vec<PathLoadStatistic> =
            disks.iter().map(|d| PathLoadStatistic::from_disk(backend_id, d)).collect();

        let mut mediums = PerMedium::<Option<MediumStatistic>>::default();
        for medium in StorageMedium::ALL {
            if !paths.iter().any(|p| p.medium() == medium) {
                continue;
            }
            let (total_capacity_bytes, total_used_bytes) = paths
                .iter()
                .filter(|p| p.medium() == medium && p.is_online())
                .fold((0, 0), |(cap, used), p| (cap + p.capacity_bytes(), used + p.used_bytes()));

            *mediums.get_mut(medium) = Some(MediumStatistic {
                total_capacity_bytes,
                total_used_bytes,
                replica_count: index.replica_count(backend_id, medium)?,
                load_score: LoadScore::default(),
                class: Classification::Unclassified,
            });
        }

        let mut stat =
            Self { backend_id, cluster: backend.cluster, available: backend.alive, paths, mediums };
        for medium in StorageMedium::ALL {
            stat.classify_paths(medium, config.load_score_threshold);
        }
        Ok(stat)
    }

    /// Classify online paths of `medium` against the backend's own average used-percent.
    fn classify_paths(&mut self, medium: StorageMedium, threshold: f64) {
        let Some(stat) = self.medium_statistic(medium) else {
            return;
        };
        if stat.total_capacity_bytes == 0 {
            return;
        }
        let avg = stat.used_percent();
        for path in self.paths.iter_mut().filter(|p| p.medium() == medium && p.is_online()) {
            path.set_class(classify_used_percent(path.used_percent(), avg, threshold));
        }
    }

    pub(crate) fn calc_load_score(
        &mut self,
        medium: StorageMedium,
        avg_used_percent: f64,
        avg_replica_num: f64,
        config: &BalanceConfig,
    ) {
        if let Some(stat) = self.mediums.get_mut(medium) {
            stat.load_score = LoadScore::calculate(
                stat.total_used_bytes,
                stat.total_capacity_bytes,
                stat.replica_count,
                avg_used_percent,
                avg_replica_num,
                config,
            );
        }
    }

    pub(crate) fn set_class(&mut self, medium: StorageMedium, class: Classification) {
        if let Some(stat) = self.mediums.get_mut(medium) {
            stat.class = class;
        }
    }

    pub const fn id(&self) -> BackendId {
        self.backend_id
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub const fn is_available(&self) -> bool {
        self.available
    }

    pub fn path_statistics(&self) -> &[PathLoadStatistic] {
        &self.paths
    }

    pub const fn has_medium(&self, medium: StorageMedium) -> bool {
        self.mediums.get(medium).is_some()
    }

    pub fn medium_statistic(&self, medium: StorageMedium) -> Option<&MediumStatistic> {
        self.mediums.get(medium).as_ref()
    }

    pub fn total_capacity(&self, medium: StorageMedium) -> u64 {
        self.medium_statistic(medium).map_or(0, |s| s.total_capacity_bytes)
    }

    pub fn total_used_capacity(&self, medium: StorageMedium) -> u64 {
        self.medium_statistic(medium).map_or(0, |s| s.total_used_bytes)
    }

    pub fn replica_count(&self, medium: StorageMedium) -> u64 {
        self.medium_statistic(medium).map_or(0, |s| s.replica_count)
    }

    /// 0.0 when the backend lacks `medium`.
    pub fn load_score(&self, medium: StorageMedium) -> f64 {
        self.medium_statistic(medium).map_or(0.0, |s| s.load_score.score)
    }

    /// Sum of the scores over every medium the backend has.
    pub fn mix_load_score(&self) -> f64 {
        self.mediums.iter().filter_map(|(_, s)| s.as_ref()).map(|s| s.load_score.score).sum()
    }

    pub fn class(&self, medium: StorageMedium) -> Classification {
        self.medium_statistic(medium).map_or(Classification::Unclassified, |s| s.class)
    }

    /// Paths of `medium` grouped by class, collapsed so both ends are populated
    /// unless the backend's disks are already balanced.
    pub fn path_statistics_by_class(
        &self,
        medium: StorageMedium,
    ) -> ClassBuckets<&PathLoadStatistic> {
        let mut buckets: ClassBuckets<&PathLoadStatistic> =
            self.paths.iter().filter(|p| p.medium() == medium).map(|p| (p.class(), p)).collect();
        buckets.collapse_mid();
        buckets.sort_by(|a, b| {
            a.used_percent().total_cmp(&b.used_percent()).then(a.path_hash().cmp(&b.path_hash()))
        });
        buckets
    }

    /// Paths of `medium` able to take a tablet of `tablet_size` bytes, in path order,
    /// or every rejection when none can.
    pub fn fit_paths(
        &self,
        tablet_size: u64,
        medium: StorageMedium,
        supplement: bool,
        config: &BalanceConfig,
    ) -> Result<Vec<&PathLoadStatistic>, Vec<FitRejection>> {
        if !self.has_medium(medium) {
            return Err(vec![FitRejection::MediumNotMatch { backend_id: self.backend_id, medium }]);
        }

        let mut fits = Vec::new();
        let mut rejections = Vec::new();
        for path in self.paths.iter().filter(|p| p.medium() == medium) {
            match path.is_fit(tablet_size, supplement, config) {
                Ok(()) => fits.push(path),
                Err(rejection) => rejections.push(rejection),
            }
        }

        if fits.is_empty() {
            Err(rejections)
        } else {
            Ok(fits)
        }
    }

    /// Display row for `medium`: id, cluster, available, used, total, used percent,
    /// replicas, capacity coefficient, replica coefficient, score, class.
    pub fn info(&self, medium: StorageMedium) -> Vec<String> {
        let stat = self.medium_statistic(medium);
        let used = self.total_used_capacity(medium);
        let total = self.total_capacity(medium);
        let score = stat.map(|s| s.load_score).unwrap_or_default();

        vec![
            self.backend_id.to_string(),
            self.cluster.clone(),
            self.available.to_string(),
            used.to_string(),
            total.to_string(),
            format_percent(used, total),
            self.replica_count(medium).to_string(),
            score.capacity_coefficient.to_string(),
            score.replica_coefficient.to_string(),
            score.score.to_string(),
            self.class(medium).to_string(),
        ]
    }

    /// One-line summary, e.g. `10001: replica: {SSD=100} used: {SSD=50} total: {SSD=100} score: {SSD=1.5}`.
    pub fn brief(&self) -> String {
        format!(
            "{}: replica: {} used: {} total: {} score: {}",
            self.backend_id,
            self.render_mediums(|s| s.replica_count.to_string()),
            self.render_mediums(|s| s.total_used_bytes.to_string()),
            self.render_mediums(|s| s.total_capacity_bytes.to_string()),
            self.render_mediums(|s| s.load_score.score.to_string()),
        )
    }

    fn render_mediums(&self, value: impl Fn(&MediumStatistic) -> String) -> String {
        let entries: Vec<String> = self
            .mediums
            .iter()
            .filter_map(|(medium, s)| s.as_ref().map(|s| format!("{medium}={}", value(s))))
            .collect();
        format!("{{{}}}", entries.join(", "))
    }
}
