//! Capacity-constrained greedy merge engine.
//!
//! Clusters live in an arena addressed by stable handles; an ordered live
//! list tracks the partition-in-progress and a pair-cost map holds the
//! current linkage cost (or the infeasible sentinel) for every live pair.
//! Each iteration finds the globally cheapest live pair in live-list order,
//! then either merges it — when the combined weight stays within the
//! capacity budget — or marks that single pair permanently infeasible. The
//! loop stops at one cluster or when every remaining pair is infeasible.
//!
//! Handles replace the original index-splicing formulation: removing a
//! cluster from the middle of the live list never shifts the identity of any
//! other cluster, so no cost entry is ever re-keyed.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{BaseDistances, INFEASIBLE};
use crate::points::Point;

/// Stable identifier for a cluster record in the arena.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
struct ClusterHandle(usize);

/// Append-only store of cluster records.
///
/// Records are never removed; a consumed parent simply stops being
/// referenced by the live list. Total weights are cached at creation so the
/// budget test never rescans member points.
#[derive(Clone, Debug)]
struct ClusterArena {
    members: Vec<Vec<usize>>,
    weights: Vec<f64>,
}

impl ClusterArena {
    fn singletons(points: &[Point]) -> Self {
        Self {
            members: (0..points.len()).map(|index| vec![index]).collect(),
            weights: points.iter().map(Point::weight).collect(),
        }
    }

    fn members(&self, handle: ClusterHandle) -> &[usize] {
        &self.members[handle.0]
    }

    fn weight(&self, handle: ClusterHandle) -> f64 {
        self.weights[handle.0]
    }

    fn merge(&mut self, left: ClusterHandle, right: ClusterHandle) -> ClusterHandle {
        let mut merged = self.members[left.0].clone();
        merged.extend_from_slice(&self.members[right.0]);
        let weight = self.weights[left.0] + self.weights[right.0];
        self.members.push(merged);
        self.weights.push(weight);
        ClusterHandle(self.members.len() - 1)
    }
}

/// Normalises an unordered handle pair into a map key.
fn pair_key(a: ClusterHandle, b: ClusterHandle) -> (ClusterHandle, ClusterHandle) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Greedy capacity-constrained merge loop over a frozen base distance cache.
pub(crate) struct MergeEngine<'a> {
    cache: &'a BaseDistances,
    budget: f64,
    arena: ClusterArena,
    live: Vec<ClusterHandle>,
    costs: HashMap<(ClusterHandle, ClusterHandle), f64>,
}

impl<'a> MergeEngine<'a> {
    /// Seeds the engine with one singleton cluster per point and the pair
    /// costs copied from the base distance cache.
    pub(crate) fn new(points: &[Point], cache: &'a BaseDistances, budget: f64) -> Self {
        let arena = ClusterArena::singletons(points);
        let live: Vec<ClusterHandle> = (0..points.len()).map(ClusterHandle).collect();
        let mut costs = HashMap::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                costs.insert(
                    pair_key(ClusterHandle(i), ClusterHandle(j)),
                    cache.get(i, j),
                );
            }
        }
        Self {
            cache,
            budget,
            arena,
            live,
            costs,
        }
    }

    /// Runs the loop to a locally stable, budget-respecting partition and
    /// returns the live clusters in their final order.
    ///
    /// A point whose own weight already exceeds the budget can never merge
    /// and survives as a singleton; the budget bounds merges, not standalone
    /// weights.
    pub(crate) fn run(mut self) -> Vec<Vec<usize>> {
        while self.live.len() > 1 {
            let Some((left, right)) = self.cheapest_feasible_pair() else {
                break;
            };
            let left_handle = self.live[left];
            let right_handle = self.live[right];
            let merged_weight = self.arena.weight(left_handle) + self.arena.weight(right_handle);
            if merged_weight <= self.budget {
                self.apply_merge(left, right);
            } else {
                // Reject exactly this pair; every other entry stays eligible.
                self.costs
                    .insert(pair_key(left_handle, right_handle), INFEASIBLE);
            }
        }
        self.live
            .iter()
            .map(|&handle| self.arena.members(handle).to_vec())
            .collect()
    }

    /// Finds the globally minimal finite cost among live pairs.
    ///
    /// Pairs are scanned in live-list (row-major) order and only a strictly
    /// smaller cost displaces the running minimum, so ties resolve to the
    /// earliest pair. Returns positions into the live list.
    fn cheapest_feasible_pair(&self) -> Option<(usize, usize)> {
        let mut best = INFEASIBLE;
        let mut best_pair = None;
        for left in 0..self.live.len() {
            for right in (left + 1)..self.live.len() {
                let key = pair_key(self.live[left], self.live[right]);
                let cost = self.costs[&key];
                if cost < best {
                    best = cost;
                    best_pair = Some((left, right));
                }
            }
        }
        best_pair
    }

    /// Replaces the clusters at `left < right` with their union, appended at
    /// the end of the live list, and prices the new cluster against every
    /// survivor from the frozen base distances.
    fn apply_merge(&mut self, left: usize, right: usize) {
        let right_handle = self.live.remove(right);
        let left_handle = self.live.remove(left);
        let merged = self.arena.merge(left_handle, right_handle);
        self.costs.retain(|&(a, b), _| {
            a != left_handle && a != right_handle && b != left_handle && b != right_handle
        });
        for &other in &self.live {
            let cost = self
                .cache
                .linkage(self.arena.members(merged), self.arena.members(other));
            self.costs.insert(pair_key(merged, other), cost);
        }
        self.live.push(merged);
        if self.live.len() % 100 == 0 {
            debug!(live = self.live.len(), "merge progress");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::WeightExponent;

    fn run(points: &[Point], budget: f64) -> Vec<Vec<usize>> {
        let cache = BaseDistances::build(points, 1.0, WeightExponent::OnePlusSum);
        MergeEngine::new(points, &cache, budget).run()
    }

    #[test]
    fn single_point_terminates_immediately() {
        let points = vec![Point::new(0.0, 0.0, 5.0)];
        assert_eq!(run(&points, 0.0), vec![vec![0]]);
    }

    #[test]
    fn unbounded_budget_collapses_to_one_cluster() {
        let points = vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(5.0, 5.0, 1.0),
        ];
        let clusters = run(&points, f64::INFINITY);
        assert_eq!(clusters.len(), 1);
        let mut all = clusters[0].clone();
        all.sort_unstable();
        assert_eq!(all, vec![0, 1, 2]);
    }

    #[test]
    fn budget_below_every_weight_keeps_singletons_in_input_order() {
        let points = vec![
            Point::new(0.0, 0.0, 1.0),
            Point::new(0.1, 0.0, 1.0),
            Point::new(0.2, 0.0, 1.0),
        ];
        assert_eq!(run(&points, 0.5), vec![vec![0], vec![1], vec![2]]);
    }

    #[test]
    fn merged_cluster_is_appended_after_surviving_singletons() {
        // The nearest pair (0, 1) merges once; the far point cannot join
        // within budget, so the final order is the survivor then the merge.
        let points = vec![
            Point::new(0.0, 0.0, 0.4),
            Point::new(1.0, 0.0, 0.4),
            Point::new(100.0, 0.0, 0.4),
        ];
        assert_eq!(run(&points, 0.9), vec![vec![2], vec![0, 1]]);
    }

    #[test]
    fn oversized_singleton_survives_without_error() {
        let points = vec![
            Point::new(0.0, 0.0, 10.0),
            Point::new(1.0, 0.0, 0.1),
            Point::new(2.0, 0.0, 0.1),
        ];
        let clusters = run(&points, 0.5);
        assert!(clusters.contains(&vec![0]));
        assert!(clusters.contains(&vec![1, 2]));
    }

    #[test]
    fn rejection_leaves_other_pairs_eligible() {
        // Points 0 and 1 are closest but too heavy together; each can still
        // merge with the light point 2 sitting between them, and the engine
        // must not discard those options after rejecting (0, 1).
        let points = vec![
            Point::new(0.0, 0.0, 0.6),
            Point::new(0.5, 0.0, 0.6),
            Point::new(0.25, 2.0, 0.1),
        ];
        let clusters = run(&points, 0.8);
        assert_eq!(clusters.len(), 2);
        let sizes: Vec<usize> = clusters.iter().map(Vec::len).collect();
        assert!(sizes.contains(&2), "one pair must still merge: {clusters:?}");
    }

    #[test]
    fn equal_costs_resolve_to_the_earliest_pair() {
        // Three collinear points with equal spacing and equal weights give
        // identical adjacent costs; the scan must pick (0, 1) first.
        let points = vec![
            Point::new(0.0, 0.0, 0.1),
            Point::new(1.0, 0.0, 0.1),
            Point::new(2.0, 0.0, 0.1),
        ];
        let clusters = run(&points, 0.25);
        assert_eq!(clusters, vec![vec![2], vec![0, 1]]);
    }
}
