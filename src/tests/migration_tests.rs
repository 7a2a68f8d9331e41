use super::{
    assert_close, backend, build, disk, equal_weights, replicas, ssd_backend,
    two_backend_ssd_topology, GB,
};
use crate::config::BalanceConfig;
use crate::stats::StorageMedium;
use crate::topology::StaticTopology;

const TABLET: i64 = 10_086;

#[test]
fn test_moving_from_high_to_low_is_more_balanced() {
    let snapshot = build(&two_backend_ssd_topology(), &equal_weights());
    assert!(
        snapshot.is_more_balanced(1, 2, TABLET, 5 * GB, StorageMedium::Ssd),
        "moving off the loaded backend should help"
    );

    let eval = snapshot.evaluate_migration(1, 2, TABLET, 5 * GB, StorageMedium::Ssd).unwrap();
    assert_close(eval.new_src_score, 0.5 * (0.45 / 0.3) + 0.5 * (99.0 / 60.0));
    assert_close(eval.new_dest_score, 0.5 * (0.15 / 0.3) + 0.5 * (21.0 / 60.0));
    assert!(eval.new_diff() < eval.current_diff(), "diff must shrink");
}

#[test]
fn test_moving_from_low_to_high_is_not_more_balanced() {
    let snapshot = build(&two_backend_ssd_topology(), &equal_weights());
    assert!(
        !snapshot.is_more_balanced(2, 1, TABLET, 5 * GB, StorageMedium::Ssd),
        "moving onto the loaded backend must not help"
    );
}

#[test]
fn test_evaluation_uses_frozen_averages() {
    let snapshot = build(&two_backend_ssd_topology(), &equal_weights());
    let before = *snapshot.medium_load(StorageMedium::Ssd);

    let eval = snapshot.evaluate_migration(1, 2, TABLET, 5 * GB, StorageMedium::Ssd).unwrap();
    assert_close(eval.avg_load_score, before.avg_load_score.unwrap());
    assert_eq!(*snapshot.medium_load(StorageMedium::Ssd), before);

    let be1 = snapshot.backend_load_statistic(1).unwrap();
    assert_close(eval.src_score, be1.load_score(StorageMedium::Ssd));
    assert_eq!(be1.total_used_capacity(StorageMedium::Ssd), 50 * GB);
    assert_eq!(be1.replica_count(StorageMedium::Ssd), 100);
}

#[test]
fn test_zero_size_move_without_replica_weight_changes_nothing() {
    let config = BalanceConfig {
        load_score_threshold: 0.2,
        capacity_weight: 1.0,
        replica_weight: 0.0,
        ..BalanceConfig::default()
    };
    let snapshot = build(&two_backend_ssd_topology(), &config);

    for (src, dest) in [(1, 2), (2, 1)] {
        let eval = snapshot.evaluate_migration(src, dest, TABLET, 0, StorageMedium::Ssd).unwrap();
        assert_close(eval.new_diff(), eval.current_diff());
        assert!(!eval.is_more_balanced(), "an unchanged diff is not an improvement");
    }
}

#[test]
fn test_unknown_backends_are_not_more_balanced() {
    let snapshot = build(&two_backend_ssd_topology(), &equal_weights());

    assert!(!snapshot.is_more_balanced(99, 2, TABLET, GB, StorageMedium::Ssd), "unknown src");
    assert!(!snapshot.is_more_balanced(1, 99, TABLET, GB, StorageMedium::Ssd), "unknown dest");
    assert!(snapshot.evaluate_migration(99, 98, TABLET, GB, StorageMedium::Ssd).is_none());
}

#[test]
fn test_missing_medium_is_not_more_balanced() {
    let topology = StaticTopology::new(vec![
        ssd_backend(1, 50, 100, 100),
        ssd_backend(2, 10, 100, 20),
        backend(
            3,
            vec![disk("/hdd3", 31, StorageMedium::Hdd, 1000 * GB, 100 * GB)],
            replicas(10, 0),
        ),
    ]);
    let snapshot = build(&topology, &equal_weights());

    assert!(!snapshot.is_more_balanced(1, 2, TABLET, GB, StorageMedium::Hdd), "no HDD at all");
    assert!(!snapshot.is_more_balanced(1, 3, TABLET, GB, StorageMedium::Ssd), "dest lacks SSD");
    assert!(!snapshot.is_more_balanced(3, 2, TABLET, GB, StorageMedium::Ssd), "src lacks SSD");
}

#[test]
fn test_self_move_is_not_more_balanced() {
    let snapshot = build(&two_backend_ssd_topology(), &equal_weights());
    assert!(!snapshot.is_more_balanced(1, 1, TABLET, 5 * GB, StorageMedium::Ssd), "self move");
}

#[test]
fn test_oversized_tablet_saturates_source() {
    let snapshot = build(&two_backend_ssd_topology(), &equal_weights());
    let eval = snapshot.evaluate_migration(2, 1, TABLET, 500 * GB, StorageMedium::Ssd).unwrap();
    // BE2 holds only 10 GB: its used bytes bottom out at zero.
    assert_close(eval.new_src_score, 0.5 * (19.0 / 60.0));
}

#[test]
fn test_huge_tablet_saturates_destination() {
    let snapshot = build(&two_backend_ssd_topology(), &equal_weights());

    let eval =
        snapshot.evaluate_migration(1, 2, TABLET, u64::MAX, StorageMedium::Ssd).unwrap();
    assert!(eval.new_dest_score.is_finite(), "destination score must stay finite");
    assert!(eval.new_dest_score > eval.dest_score, "destination only gets busier");
    assert!(
        !snapshot.is_more_balanced(1, 2, TABLET, u64::MAX, StorageMedium::Ssd),
        "filling the destination past capacity cannot help"
    );
}
