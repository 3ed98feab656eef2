//! Tests for the `Pondera` clustering API.

mod common;

use common::sector_grid;
use pondera_core::{Point, PonderaBuilder};
use rstest::{fixture, rstest};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

use pondera_test_support::tracing::RecordingLayer;

#[fixture]
fn grid() -> Vec<Point> {
    sector_grid()
}

fn label_ids(pondera: &pondera_core::Pondera, points: &[Point]) -> Vec<usize> {
    pondera
        .label(points)
        .expect("labelling must succeed")
        .labels()
        .iter()
        .map(|id| id.get())
        .collect()
}

#[rstest]
fn pairs_stay_apart_below_their_combined_weight(grid: Vec<Point>) {
    let pondera = PonderaBuilder::new()
        .with_capacity_budget(0.5)
        .build()
        .expect("configuration must be valid");
    let partition = pondera.cluster(&grid).expect("run must succeed");
    assert_eq!(
        partition.clusters(),
        &[vec![0, 1], vec![2, 3], vec![4, 5]],
        "each adjacent pair merges and no cross-pair merge fits within 0.5",
    );
    assert_eq!(label_ids(&pondera, &grid), vec![0, 0, 1, 1, 2, 2]);
}

#[rstest]
fn nearest_pairs_coalesce_once_the_budget_allows(grid: Vec<Point>) {
    // At 0.7 the two nearest pair-clusters (combined weight 0.6) merge again;
    // adding the last pair would reach 0.9 and is rejected.
    let pondera = PonderaBuilder::new()
        .with_capacity_budget(0.7)
        .build()
        .expect("configuration must be valid");
    let partition = pondera.cluster(&grid).expect("run must succeed");
    assert_eq!(partition.clusters(), &[vec![4, 5], vec![0, 1, 2, 3]]);
    assert_eq!(label_ids(&pondera, &grid), vec![1, 1, 1, 1, 0, 0]);
}

#[rstest]
fn unbounded_budget_collapses_to_one_cluster(grid: Vec<Point>) {
    let pondera = PonderaBuilder::new()
        .build()
        .expect("configuration must be valid");
    let result = pondera.label(&grid).expect("run must succeed");
    assert_eq!(result.cluster_count(), 1);
    assert!(result.labels().iter().all(|id| id.get() == 0));
}

#[rstest]
fn budget_below_every_weight_yields_identity_labels(grid: Vec<Point>) {
    let pondera = PonderaBuilder::new()
        .with_capacity_budget(0.05)
        .build()
        .expect("configuration must be valid");
    let result = pondera.label(&grid).expect("run must succeed");
    let ids: Vec<usize> = result.labels().iter().map(|id| id.get()).collect();
    assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(result.cluster_count(), grid.len());
}

#[rstest]
fn repeated_runs_are_deterministic(grid: Vec<Point>) {
    let pondera = PonderaBuilder::new()
        .with_capacity_budget(0.7)
        .build()
        .expect("configuration must be valid");
    let first = pondera.cluster(&grid).expect("first run must succeed");
    let second = pondera.cluster(&grid).expect("second run must succeed");
    assert_eq!(first, second);
    assert_eq!(
        pondera.label(&grid).expect("first labelling"),
        pondera.label(&grid).expect("second labelling"),
    );
}

#[rstest]
fn single_point_clusters_alone_even_over_budget() {
    let points = vec![Point::new(3.0, 4.0, 9.0)];
    let pondera = PonderaBuilder::new()
        .with_capacity_budget(1.0)
        .build()
        .expect("configuration must be valid");
    let partition = pondera.cluster(&points).expect("run must succeed");
    assert_eq!(partition.clusters(), &[vec![0]]);
}

#[rstest]
fn oversized_point_survives_as_singleton_among_merges() {
    let points = vec![
        Point::new(0.0, 0.0, 5.0),
        Point::new(0.5, 0.0, 0.2),
        Point::new(1.0, 0.0, 0.2),
    ];
    let pondera = PonderaBuilder::new()
        .with_capacity_budget(0.5)
        .build()
        .expect("configuration must be valid");
    let partition = pondera.cluster(&points).expect("run must succeed");
    assert_eq!(partition.clusters(), &[vec![0], vec![1, 2]]);
}

#[rstest]
fn sector_scale_changes_costs_but_not_budget_semantics(grid: Vec<Point>) {
    // Shrinking the scale inflates every cost uniformly enough that merge
    // order, and therefore the partition, is unchanged here.
    let coarse = PonderaBuilder::new()
        .with_capacity_budget(0.5)
        .with_sector_scale(0.1)
        .build()
        .expect("configuration must be valid");
    let partition = coarse.cluster(&grid).expect("run must succeed");
    assert_eq!(partition.len(), 3);
}

#[rstest]
fn run_records_core_tracing(grid: Vec<Point>) {
    let pondera = PonderaBuilder::new()
        .with_capacity_budget(0.5)
        .build()
        .expect("configuration must be valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let partition = tracing::subscriber::with_default(subscriber, || pondera.cluster(&grid))
        .expect("run must succeed");
    assert_eq!(partition.len(), 3);

    let spans = layer.spans();
    let run_span = spans
        .iter()
        .find(|span| span.name == "core.cluster")
        .expect("core.cluster span must exist");
    assert_eq!(run_span.fields.get("points"), Some(&"6".to_owned()));
    assert_eq!(run_span.fields.get("budget"), Some(&"0.5".to_owned()));
    assert_eq!(
        run_span.fields.get("exponent"),
        Some(&"OnePlusSum".to_owned())
    );

    let events = layer.events();
    assert!(events.iter().any(|event| {
        event.level == Level::INFO
            && event
                .fields
                .get("message")
                .is_some_and(|value| value == "clustering completed")
    }));
}

#[rstest]
fn empty_input_logs_a_warning() {
    let pondera = PonderaBuilder::new()
        .build()
        .expect("configuration must be valid");
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());

    let err = tracing::subscriber::with_default(subscriber, || pondera.cluster(&[]))
        .expect_err("empty input must fail");
    assert!(matches!(err, pondera_core::PonderaError::EmptyPointSet));

    let events = layer.events();
    assert!(events.iter().any(|event| {
        event.level == Level::WARN
            && event
                .fields
                .get("message")
                .is_some_and(|value| value == "point set is empty, returning error")
    }));
}
