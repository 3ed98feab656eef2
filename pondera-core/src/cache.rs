//! Frozen base distance cache and linkage cost evaluation.
//!
//! The full pairwise distance matrix is computed once, up front, and never
//! mutated. Every later cluster-to-cluster linkage cost is an average over
//! these frozen entries rather than a recomputation from current cluster
//! geometry. That is a deliberate approximation: it prices a merge in
//! `O(|C1| * |C2|)` lookups and keeps the output characteristics of the
//! original formulation.

use crate::metric::{WeightExponent, scaled_power_distance};
use crate::points::Point;

/// Reserved matrix value meaning "this pair must never merge".
pub(crate) const INFEASIBLE: f64 = f64::INFINITY;

/// Immutable n×n symmetric matrix of pairwise base distances.
///
/// The diagonal is pinned to [`INFEASIBLE`] so a cluster can never be the
/// nearest neighbour of itself.
#[derive(Clone, Debug)]
pub(crate) struct BaseDistances {
    n: usize,
    values: Vec<f64>,
}

impl BaseDistances {
    /// Builds the full pairwise matrix in `Θ(n²)` time and space.
    pub(crate) fn build(points: &[Point], sector_scale: f64, exponent: WeightExponent) -> Self {
        let n = points.len();
        let mut values = vec![INFEASIBLE; n * n];
        for (i, a) in points.iter().enumerate() {
            for (j, b) in points.iter().enumerate().skip(i + 1) {
                let distance = scaled_power_distance(*a, *b, sector_scale, exponent);
                values[i * n + j] = distance;
                values[j * n + i] = distance;
            }
        }
        Self { n, values }
    }

    pub(crate) fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.n + j]
    }

    /// Average of frozen base distances over all point pairs spanning the
    /// two clusters.
    ///
    /// Both operands are non-empty by the partition invariant; the guard is
    /// a debug assertion rather than a runtime error path.
    pub(crate) fn linkage(&self, left: &[usize], right: &[usize]) -> f64 {
        debug_assert!(
            !left.is_empty() && !right.is_empty(),
            "linkage cost over an empty cluster"
        );
        let mut sum = 0.0;
        for &p in left {
            for &q in right {
                sum += self.get(p, q);
            }
        }
        sum / (left.len() * right.len()) as f64
    }
}
