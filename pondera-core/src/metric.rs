//! The weight-sensitive pairwise distance metric.
//!
//! Distances are planar Euclidean distances normalised by the minimum sector
//! scale and raised to a power derived from the two points' weights. Heavier
//! point pairs therefore see their separation amplified, which discourages
//! merging dense sectors across large gaps.

use crate::points::Point;

/// Selects how the two point weights form the distance exponent.
///
/// Both variants appear in practice; the offset is a modelling decision, not
/// a derived constant, so it is exposed as explicit configuration.
///
/// # Examples
/// ```
/// use pondera_core::WeightExponent;
///
/// assert_eq!(WeightExponent::default(), WeightExponent::OnePlusSum);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WeightExponent {
    /// Exponent is `1 + weight_a + weight_b`.
    #[default]
    OnePlusSum,
    /// Exponent is `weight_a + weight_b` with no constant offset.
    Sum,
}

impl WeightExponent {
    pub(crate) const fn offset(self) -> f64 {
        match self {
            Self::OnePlusSum => 1.0,
            Self::Sum => 0.0,
        }
    }
}

/// Computes the scaled power distance between two weighted points.
///
/// The planar Euclidean distance is divided by `sector_scale` and raised to
/// `offset + a.weight() + b.weight()`, where the offset is chosen by
/// `exponent`. Coincident points yield exactly `0.0` regardless of weights;
/// without the explicit check a zero base with a zero exponent would
/// evaluate to `1`.
///
/// The result is non-negative and finite for finite coordinates,
/// non-negative finite weights, and a positive finite scale. Self-distance
/// is not special-cased here; the base distance cache pins the diagonal to
/// the infeasible sentinel instead.
///
/// # Examples
/// ```
/// use pondera_core::{Point, WeightExponent, scaled_power_distance};
///
/// let a = Point::new(0.0, 0.0, 0.5);
/// let b = Point::new(3.0, 4.0, 0.5);
/// let distance = scaled_power_distance(a, b, 1.0, WeightExponent::OnePlusSum);
/// assert!((distance - 5.0_f64.powf(2.0)).abs() < 1e-12);
/// ```
#[must_use]
pub fn scaled_power_distance(
    a: Point,
    b: Point,
    sector_scale: f64,
    exponent: WeightExponent,
) -> f64 {
    let dx = a.x() - b.x();
    let dy = a.y() - b.y();
    let euclidean = (dx * dx + dy * dy).sqrt();
    if euclidean == 0.0 {
        return 0.0;
    }
    let base = euclidean / sector_scale;
    base.powf(exponent.offset() + a.weight() + b.weight())
}
