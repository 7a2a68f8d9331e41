use super::{BackendLoadStatistic, StorageMedium};
use std::cmp::Ordering;

/// Total order over backends; ties on score break by backend id.
pub type BackendOrdering = fn(&BackendLoadStatistic, &BackendLoadStatistic) -> Ordering;

fn by_score(a: &BackendLoadStatistic, b: &BackendLoadStatistic, medium: StorageMedium) -> Ordering {
    a.load_score(medium).total_cmp(&b.load_score(medium)).then(a.id().cmp(&b.id()))
}

pub fn hdd_order(a: &BackendLoadStatistic, b: &BackendLoadStatistic) -> Ordering {
    by_score(a, b, StorageMedium::Hdd)
}

pub fn ssd_order(a: &BackendLoadStatistic, b: &BackendLoadStatistic) -> Ordering {
    by_score(a, b, StorageMedium::Ssd)
}

pub fn mix_order(a: &BackendLoadStatistic, b: &BackendLoadStatistic) -> Ordering {
    a.mix_load_score().total_cmp(&b.mix_load_score()).then(a.id().cmp(&b.id()))
}

/// Comparator for a medium-scoped view, or the blended order when `medium` is `None`.
pub fn ordering_for(medium: Option<StorageMedium>) -> BackendOrdering {
    match medium {
        None => mix_order,
        Some(StorageMedium::Hdd) => hdd_order,
        Some(StorageMedium::Ssd) => ssd_order,
    }
}
