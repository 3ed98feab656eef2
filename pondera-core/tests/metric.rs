//! Tests for the scaled power distance metric.

use pondera_core::{Point, WeightExponent, scaled_power_distance};
use rstest::rstest;

#[rstest]
#[case::light(Point::new(0.0, 0.0, 0.0), Point::new(3.0, 4.0, 0.0))]
#[case::heavy(Point::new(-2.0, 1.0, 0.8), Point::new(5.0, -3.0, 1.2))]
#[case::mixed(Point::new(0.5, 0.5, 0.1), Point::new(0.25, 0.75, 0.9))]
fn metric_is_symmetric(#[case] a: Point, #[case] b: Point) {
    for exponent in [WeightExponent::OnePlusSum, WeightExponent::Sum] {
        assert_eq!(
            scaled_power_distance(a, b, 0.25, exponent),
            scaled_power_distance(b, a, 0.25, exponent),
        );
    }
}

#[rstest]
fn coincident_points_are_at_distance_zero_for_any_weights() {
    let a = Point::new(7.0, -1.0, 0.0);
    let b = Point::new(7.0, -1.0, 3.5);
    assert_eq!(
        scaled_power_distance(a, b, 1.0, WeightExponent::OnePlusSum),
        0.0
    );
    assert_eq!(scaled_power_distance(a, a, 1.0, WeightExponent::Sum), 0.0);
}

#[rstest]
fn outputs_are_finite_and_non_negative() {
    let points = [
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.5, -2.5, 0.3),
        Point::new(-10.0, 4.0, 1.0),
        Point::new(0.001, 0.001, 2.0),
    ];
    for a in points {
        for b in points {
            let d = scaled_power_distance(a, b, 0.1, WeightExponent::OnePlusSum);
            assert!(d.is_finite(), "distance must be finite, got {d}");
            assert!(d >= 0.0, "distance must be non-negative, got {d}");
        }
    }
}

#[rstest]
fn heavier_pairs_amplify_separation_beyond_the_scale() {
    // Once the scaled base distance exceeds 1, a larger exponent can only
    // grow the result.
    let near = Point::new(0.0, 0.0, 0.1);
    let far_light = Point::new(5.0, 0.0, 0.1);
    let far_heavy = Point::new(5.0, 0.0, 0.9);
    let light = scaled_power_distance(near, far_light, 1.0, WeightExponent::OnePlusSum);
    let heavy = scaled_power_distance(near, far_heavy, 1.0, WeightExponent::OnePlusSum);
    assert!(heavy > light);
}

#[rstest]
fn exponent_variants_differ_by_one_power_of_the_base() {
    let a = Point::new(0.0, 0.0, 0.4);
    let b = Point::new(0.0, 3.0, 0.6);
    let base = 3.0 / 0.5;
    let with_offset = scaled_power_distance(a, b, 0.5, WeightExponent::OnePlusSum);
    let without = scaled_power_distance(a, b, 0.5, WeightExponent::Sum);
    assert!((with_offset / without - base).abs() < 1e-9);
}
