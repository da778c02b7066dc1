// File: crates/hits-core/tests/aggregate.rs
// Purpose: Validate top-K ranking and folding of the tail into a single "Other" series.

use chrono::DateTime;
use hits_core::{aggregate, Labels, OtherRule, RawSeries, SeriesError, Timestamp};

fn ts(secs: i64) -> Timestamp {
    DateTime::from_timestamp(secs, 0).expect("valid timestamp")
}

fn labels(name: &str) -> Labels {
    let mut l = Labels::new();
    l.insert("name".to_string(), name.to_string());
    l
}

/// `count` series named `prefix_i`, each with two samples of `value`.
fn make_series(prefix: &str, count: usize, value: f64) -> Vec<RawSeries> {
    (0..count)
        .map(|i| {
            RawSeries::from_samples(
                labels(&format!("{prefix}_{i}")),
                vec![(ts(1_697_040_000), Some(value)), (ts(1_697_040_060), Some(value))],
            )
        })
        .collect()
}

#[test]
fn fewer_series_than_limit_has_no_other() {
    let out = aggregate(make_series("s", 3, 10.0), 5, OtherRule::RankOnly);
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|s| !s.is_other));
}

#[test]
fn series_count_equal_to_limit_has_no_other() {
    let out = aggregate(make_series("s", 5, 7.0), 5, OtherRule::RankOnly);
    assert_eq!(out.len(), 5);
    assert!(out.iter().all(|s| !s.is_other));
}

#[test]
fn tail_is_folded_into_leading_other() {
    let mut input = make_series("big", 3, 50.0);
    input.extend(make_series("small", 3, 0.5));

    let out = aggregate(input, 3, OtherRule::RankOnly);
    assert_eq!(out.len(), 4);
    assert!(out[0].is_other);
    assert!(out[0].labels.is_empty());
    assert!(out[1..].iter().all(|s| !s.is_other));
    // 3 series * 2 points * 0.5
    assert_eq!(out[0].total, 3.0);
    assert_eq!(out[0].timestamps, vec![ts(1_697_040_000), ts(1_697_040_060)]);
    assert_eq!(out[0].values, vec![Some(1.5), Some(1.5)]);
}

#[test]
fn six_series_limit_three_yields_four_rows() {
    let input = (1..=6)
        .map(|i| RawSeries::from_samples(labels(&format!("s{i}")), vec![(ts(i), Some(i as f64))]))
        .collect::<Vec<_>>();

    let out = aggregate(input, 3, OtherRule::RankOnly);
    assert_eq!(out.len(), 4);
    assert!(out[0].is_other);
    let kept: Vec<f64> = out[1..].iter().map(|s| s.total).collect();
    assert_eq!(kept, vec![6.0, 5.0, 4.0]);
    assert_eq!(out[0].total, 1.0 + 2.0 + 3.0);
    assert_eq!(out[0].timestamps, vec![ts(1), ts(2), ts(3)]);
}

#[test]
fn limit_zero_folds_everything() {
    let out = aggregate(make_series("s", 3, 10.0), 0, OtherRule::RankOnly);
    assert_eq!(out.len(), 1);
    assert!(out[0].is_other);
    assert_eq!(out[0].total, 60.0);
}

#[test]
fn limit_zero_folds_single_series() {
    let out = aggregate(make_series("only", 1, 42.0), 0, OtherRule::RankOnly);
    assert_eq!(out.len(), 1);
    assert!(out[0].is_other);
    assert_eq!(out[0].total, 84.0);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(aggregate(Vec::new(), 3, OtherRule::EmptyLabels).is_empty());
}

#[test]
fn ties_keep_input_order() {
    let out = aggregate(make_series("tie", 4, 1.0), 4, OtherRule::RankOnly);
    let names: Vec<&str> = out.iter().map(|s| s.labels["name"].as_str()).collect();
    assert_eq!(names, vec!["tie_0", "tie_1", "tie_2", "tie_3"]);
}

#[test]
fn kept_series_keep_timestamps_and_values_in_sync() {
    let out = aggregate(make_series("s", 4, 5.0), 2, OtherRule::RankOnly);
    assert_eq!(out.len(), 3);
    for s in out.iter().filter(|s| !s.is_other) {
        assert_eq!(s.timestamps.len(), s.values.len());
    }
}

#[test]
fn unlabelled_hits_are_always_folded() {
    let overflow = RawSeries::from_samples(Labels::new(), vec![(ts(10), Some(1000.0))]);
    let small = RawSeries::from_samples(labels("small"), vec![(ts(20), Some(1.0))]);

    let out = aggregate(vec![small.clone(), overflow.clone()], 5, OtherRule::EmptyLabels);
    assert_eq!(out.len(), 2);
    assert!(out[0].is_other);
    assert_eq!(out[0].total, 1000.0);
    assert_eq!(out[1].labels, small.labels);

    // Under pure ranking the unlabelled series is just the biggest one.
    let ranked = aggregate(vec![small, overflow], 5, OtherRule::RankOnly);
    assert_eq!(ranked.len(), 2);
    assert!(ranked.iter().all(|s| !s.is_other));
    assert_eq!(ranked[0].total, 1000.0);
}

#[test]
fn absent_and_nan_samples_add_nothing() {
    let a = RawSeries::from_samples(labels("a"), vec![(ts(1), None), (ts(2), Some(f64::NAN)), (ts(3), Some(2.0))]);
    let b = RawSeries::from_samples(labels("b"), vec![(ts(1), Some(4.0))]);
    assert_eq!(a.total, 2.0);

    let out = aggregate(vec![a, b], 0, OtherRule::RankOnly);
    assert_eq!(out[0].total, 6.0);
    assert_eq!(out[0].values, vec![Some(4.0), Some(0.0), Some(2.0)]);
}

#[test]
fn nan_total_ranks_like_zero() {
    let t = ts(1_697_040_000);
    let series = vec![
        RawSeries::from_samples(labels("undefined"), vec![(t, Some(f64::NAN))]).with_total(f64::NAN),
        RawSeries::from_samples(labels("small"), vec![(t, Some(1.0))]),
        RawSeries::from_samples(labels("big"), vec![(t, Some(9.0))]),
    ];
    let out = aggregate(series, 2, OtherRule::RankOnly);
    let names: Vec<&str> = out.iter().map(|s| s.labels.get("name").map_or("", String::as_str)).collect();
    assert_eq!(names, vec!["", "big", "small"]);
    assert!(out[0].is_other);
}

#[test]
fn series_length_mismatch_is_rejected() {
    let err = RawSeries::try_new(vec![ts(0), ts(60)], vec![Some(1.0)], labels("a")).unwrap_err();
    assert_eq!(err, SeriesError::LengthMismatch { timestamps: 2, values: 1 });

    let ok = RawSeries::try_new(vec![ts(0), ts(60)], vec![Some(1.0), None], labels("a")).expect("equal lengths");
    assert_eq!(ok.total, 1.0);
    assert!(!ok.is_other);
}
