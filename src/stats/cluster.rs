use super::{
    classify_score, ordering_for, BackendLoadStatistic, ClassBuckets, Classification, LoadScore,
    PathLoadStatistic, PerMedium, StorageMedium,
};
use crate::config::BalanceConfig;
use crate::error::LoadBalanceError;
use crate::topology::{BackendId, ReplicaIndex, TabletId, TopologyService};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

/// Cluster-wide totals and averages for one medium.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MediumLoad {
    pub total_capacity_bytes: u64,
    pub total_used_bytes: u64,
    pub total_replica_count: u64,
    /// Backends having at least one path of this medium.
    pub backend_count: usize,
    pub avg_used_percent: f64,
    /// Average replicas per backend having the medium.
    pub avg_replica_num: f64,
    /// `None` when no backend has the medium.
    pub avg_load_score: Option<f64>,
}

/// A backend left out of a snapshot, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedBackend {
    pub backend_id: BackendId,
    pub reason: LoadBalanceError,
}

/// Before/after scores of a single hypothetical tablet move.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MigrationEvaluation {
    pub tablet_id: TabletId,
    pub tablet_size: u64,
    pub medium: StorageMedium,
    pub src_backend_id: BackendId,
    pub dest_backend_id: BackendId,
    pub src_score: f64,
    pub new_src_score: f64,
    pub dest_score: f64,
    pub new_dest_score: f64,
    pub avg_load_score: f64,
}

impl MigrationEvaluation {
    pub fn current_diff(&self) -> f64 {
        (self.src_score - self.avg_load_score).abs()
            + (self.dest_score - self.avg_load_score).abs()
    }

    pub fn new_diff(&self) -> f64 {
        (self.new_src_score - self.avg_load_score).abs()
            + (self.new_dest_score - self.avg_load_score).abs()
    }

    pub fn is_more_balanced(&self) -> bool {
        self.new_diff() < self.current_diff()
    }
}

/// Immutable point-in-time load statistics of one cluster.
///
/// Built once by [`ClusterLoadStatistic::build`]; every query afterwards is a
/// pure read, so a published snapshot can be shared freely between readers.
#[derive(Debug, Clone)]
pub struct ClusterLoadStatistic {
    cluster: String,
    built_at: DateTime<Utc>,
    config: BalanceConfig,
    mediums: PerMedium<MediumLoad>,
    /// Sorted by the mix ordering.
    backends: Vec<BackendLoadStatistic>,
    skipped: Vec<SkippedBackend>,
}

impl ClusterLoadStatistic {
    pub fn build(
        cluster: &str,
        topology: &dyn TopologyService,
        index: &dyn ReplicaIndex,
        config: &BalanceConfig,
    ) -> Self {
        Self::build_at(cluster, topology, index, config, Utc::now())
    }

    /// Build a snapshot as of `now` (used for disk report staleness).
    pub fn build_at(
        cluster: &str,
        topology: &dyn TopologyService,
        index: &dyn ReplicaIndex,
        config: &BalanceConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let mut backends = Vec::new();
        let mut skipped = Vec::new();

        for backend_id in topology.backends_in_cluster(cluster).into_keys() {
            match BackendLoadStatistic::build(backend_id, topology, index, config, now) {
                Ok(stat) => backends.push(stat),
                Err(reason) => {
                    info!(backend_id, %reason, "Skipping backend in load statistic");
                    skipped.push(SkippedBackend { backend_id, reason });
                }
            }
        }

        let mut mediums = PerMedium::from_fn(|medium| aggregate(&backends, medium));

        for stat in &mut backends {
            for (medium, load) in mediums.iter() {
                stat.calc_load_score(medium, load.avg_used_percent, load.avg_replica_num, config);
            }
        }

        for medium in StorageMedium::ALL {
            let load = mediums.get_mut(medium);
            load.avg_load_score =
                classify_backends(&mut backends, medium, load.backend_count, config);
        }

        backends.sort_by(ordering_for(None));

        Self {
            cluster: cluster.to_string(),
            built_at: now,
            config: config.clone(),
            mediums,
            backends,
            skipped,
        }
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub const fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub const fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub const fn medium_load(&self, medium: StorageMedium) -> &MediumLoad {
        self.mediums.get(medium)
    }

    pub fn skipped_backends(&self) -> &[SkippedBackend] {
        &self.skipped
    }

    /// All backends in mix order.
    pub fn all_backend_load_statistics(&self) -> &[BackendLoadStatistic] {
        &self.backends
    }

    pub fn backend_load_statistic(&self, backend_id: BackendId) -> Option<&BackendLoadStatistic> {
        self.backends.iter().find(|b| b.id() == backend_id)
    }

    /// Score the move of one tablet from `src` to `dest` on `medium` against the
    /// frozen cluster averages. `None` when either backend is unknown or lacks
    /// the medium, or when src and dest are the same backend.
    pub fn evaluate_migration(
        &self,
        src_backend_id: BackendId,
        dest_backend_id: BackendId,
        tablet_id: TabletId,
        tablet_size: u64,
        medium: StorageMedium,
    ) -> Option<MigrationEvaluation> {
        if src_backend_id == dest_backend_id {
            return None;
        }
        let src = self.backend_load_statistic(src_backend_id)?.medium_statistic(medium)?;
        let dest = self.backend_load_statistic(dest_backend_id)?.medium_statistic(medium)?;
        let load = self.medium_load(medium);
        let avg_load_score = load.avg_load_score?;

        let new_src = LoadScore::calculate(
            src.total_used_bytes.saturating_sub(tablet_size),
            src.total_capacity_bytes,
            src.replica_count.saturating_sub(1),
            load.avg_used_percent,
            load.avg_replica_num,
            &self.config,
        );
        let new_dest = LoadScore::calculate(
            dest.total_used_bytes.saturating_add(tablet_size),
            dest.total_capacity_bytes,
            dest.replica_count.saturating_add(1),
            load.avg_used_percent,
            load.avg_replica_num,
            &self.config,
        );

        let evaluation = MigrationEvaluation {
            tablet_id,
            tablet_size,
            medium,
            src_backend_id,
            dest_backend_id,
            src_score: src.load_score.score,
            new_src_score: new_src.score,
            dest_score: dest.load_score.score,
            new_dest_score: new_dest.score,
            avg_load_score,
        };

        debug!(
            tablet_id,
            tablet_size,
            src_backend_id,
            dest_backend_id,
            %medium,
            src_score = evaluation.src_score,
            new_src_score = evaluation.new_src_score,
            dest_score = evaluation.dest_score,
            new_dest_score = evaluation.new_dest_score,
            avg_load_score,
            current_diff = evaluation.current_diff(),
            new_diff = evaluation.new_diff(),
            more_balanced = evaluation.is_more_balanced(),
            "Evaluated tablet migration"
        );

        Some(evaluation)
    }

    /// Whether moving the tablet would bring src and dest closer to the average.
    /// Unknown backends or a missing medium answer `false`.
    pub fn is_more_balanced(
        &self,
        src_backend_id: BackendId,
        dest_backend_id: BackendId,
        tablet_id: TabletId,
        tablet_size: u64,
        medium: StorageMedium,
    ) -> bool {
        self.evaluate_migration(src_backend_id, dest_backend_id, tablet_id, tablet_size, medium)
            .is_some_and(|e| e.is_more_balanced())
    }

    /// One display row per backend having `medium`, in mix order.
    pub fn cluster_statistic(&self, medium: StorageMedium) -> Vec<Vec<String>> {
        self.backends.iter().filter(|b| b.has_medium(medium)).map(|b| b.info(medium)).collect()
    }

    /// One display row per path of `backend_id`; empty when the backend is unknown.
    pub fn backend_statistic(&self, backend_id: BackendId) -> Vec<Vec<String>> {
        self.backend_load_statistic(backend_id)
            .map(|b| b.path_statistics().iter().map(PathLoadStatistic::row).collect())
            .unwrap_or_default()
    }

    /// Backends having `medium`, grouped by class.
    ///
    /// A fully balanced cluster keeps everyone in MID. Otherwise, when LOW (or
    /// HIGH) is empty the MID backends take its place, so a balancer always
    /// has candidates on both sides.
    pub fn backend_statistics_by_class(
        &self,
        medium: StorageMedium,
    ) -> ClassBuckets<&BackendLoadStatistic> {
        let mut buckets: ClassBuckets<&BackendLoadStatistic> =
            self.backends.iter().map(|b| (b.class(medium), b)).collect();
        buckets.collapse_mid();

        let order = ordering_for(Some(medium));
        buckets.sort_by(|a, b| order(a, b));

        debug!(
            cluster = %self.cluster,
            %medium,
            low = buckets.low.len(),
            mid = buckets.mid.len(),
            high = buckets.high.len(),
            "Backend classification after adjustment"
        );
        buckets
    }

    /// Backends having `medium` sorted by that medium's score, or every backend
    /// in mix order when `medium` is `None`.
    pub fn sorted_backend_load_statistics(
        &self,
        medium: Option<StorageMedium>,
    ) -> Vec<&BackendLoadStatistic> {
        let mut sorted: Vec<&BackendLoadStatistic> = self
            .backends
            .iter()
            .filter(|b| medium.map_or(true, |m| b.has_medium(m)))
            .collect();
        let order = ordering_for(medium);
        sorted.sort_by(|a, b| order(a, b));
        sorted
    }

    /// One indented line per backend, in mix order.
    pub fn brief(&self) -> String {
        self.backends.iter().map(|b| format!("    {}\n", b.brief())).collect()
    }
}

fn aggregate(backends: &[BackendLoadStatistic], medium: StorageMedium) -> MediumLoad {
    let mut load = MediumLoad::default();
    for stat in backends {
        load.total_capacity_bytes += stat.total_capacity(medium);
        load.total_used_bytes += stat.total_used_capacity(medium);
        load.total_replica_count += stat.replica_count(medium);
        if stat.has_medium(medium) {
            load.backend_count += 1;
        }
    }

    let capacity = if load.total_capacity_bytes == 0 { 1 } else { load.total_capacity_bytes };
    let backend_count = load.backend_count.max(1);
    load.avg_used_percent = load.total_used_bytes as f64 / capacity as f64;
    load.avg_replica_num = load.total_replica_count as f64 / backend_count as f64;
    load
}

/// Assign LOW/MID/HIGH on `medium` and return the average score, or `None`
/// when no backend has the medium.
fn classify_backends(
    backends: &mut [BackendLoadStatistic],
    medium: StorageMedium,
    backend_count: usize,
    config: &BalanceConfig,
) -> Option<f64> {
    if backend_count == 0 {
        return None;
    }

    let total: f64 = backends.iter().map(|b| b.load_score(medium)).sum();
    let avg = total / backend_count as f64;

    let (mut low, mut mid, mut high) = (0, 0, 0);
    for stat in backends.iter_mut().filter(|b| b.has_medium(medium)) {
        let class = classify_score(stat.load_score(medium), avg, config.load_score_threshold);
        match class {
            Classification::Low => low += 1,
            Classification::Mid => mid += 1,
            Classification::High => high += 1,
            Classification::Unclassified => {}
        }
        stat.set_class(medium, class);
    }

    info!(
        %medium,
        avg_load_score = avg,
        low,
        mid,
        high,
        "Classified backends by load"
    );
    Some(avg)
}
