use super::{assert_close, equal_weights, GB};
use crate::config::BalanceConfig;
use crate::stats::LoadScore;

#[test]
fn test_score_at_cluster_average_is_one() {
    let score = LoadScore::calculate(30 * GB, 100 * GB, 60, 0.3, 60.0, &equal_weights());
    assert_close(score.score, 1.0);
    assert_close(score.capacity_coefficient, 0.5);
    assert_close(score.replica_coefficient, 0.5);
}

#[test]
fn test_score_blends_capacity_and_replica_terms() {
    let high = LoadScore::calculate(50 * GB, 100 * GB, 100, 0.3, 60.0, &equal_weights());
    assert_close(high.score, 0.5 * (0.5 / 0.3) + 0.5 * (100.0 / 60.0));

    let low = LoadScore::calculate(10 * GB, 100 * GB, 20, 0.3, 60.0, &equal_weights());
    assert_close(low.score, 0.5 * (0.1 / 0.3) + 0.5 * (20.0 / 60.0));
}

#[test]
fn test_zero_averages_contribute_nothing() {
    let score = LoadScore::calculate(10 * GB, 100 * GB, 20, 0.0, 0.0, &equal_weights());
    assert_close(score.score, 0.0);
}

#[test]
fn test_zero_capacity_has_zero_used_percent() {
    let score = LoadScore::calculate(0, 0, 10, 0.5, 10.0, &equal_weights());
    assert_close(score.score, 0.5);
}

#[test]
fn test_weights_come_from_config() {
    let config =
        BalanceConfig { capacity_weight: 0.8, replica_weight: 0.2, ..BalanceConfig::default() };
    let score = LoadScore::calculate(60 * GB, 100 * GB, 30, 0.3, 60.0, &config);
    assert_close(score.capacity_coefficient, 0.8);
    assert_close(score.replica_coefficient, 0.2);
    assert_close(score.score, 0.8 * 2.0 + 0.2 * 0.5);
}

#[test]
fn test_adaptive_capacity_coefficient() {
    let config = BalanceConfig { adaptive_capacity_weight: true, ..BalanceConfig::default() };

    let below = LoadScore::calculate(30 * GB, 100 * GB, 10, 0.5, 10.0, &config);
    assert_close(below.capacity_coefficient, 0.5);

    let between = LoadScore::calculate(60 * GB, 100 * GB, 10, 0.5, 10.0, &config);
    assert_close(between.capacity_coefficient, 0.7);
    assert_close(between.replica_coefficient, 0.3);

    let above = LoadScore::calculate(80 * GB, 100 * GB, 10, 0.5, 10.0, &config);
    assert_close(above.capacity_coefficient, 1.0);
    assert_close(above.replica_coefficient, 0.0);
    assert_close(above.score, 0.8 / 0.5);
}
