//! Core clustering orchestration for the Pondera library.
//!
//! Provides the [`Pondera`] runtime entry point: input validation, base
//! distance cache construction, the merge loop, and label derivation.

use tracing::{info, instrument, warn};

use crate::{
    Result,
    cache::BaseDistances,
    error::PonderaError,
    merge::MergeEngine,
    metric::WeightExponent,
    partition::{ClusteringResult, Partition},
    points::{self, Point},
};

/// Entry point for running capacity-constrained agglomerative clustering.
///
/// # Examples
/// ```
/// use pondera_core::{Point, PonderaBuilder};
///
/// let points = vec![
///     Point::new(0.0, 0.0, 0.1),
///     Point::new(1.0, 0.0, 0.1),
///     Point::new(50.0, 50.0, 0.1),
/// ];
/// let pondera = PonderaBuilder::new()
///     .with_capacity_budget(0.25)
///     .build()
///     .expect("builder must succeed");
/// let result = pondera.label(&points).expect("run must succeed");
/// assert_eq!(result.labels().len(), 3);
/// assert_eq!(result.cluster_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Pondera {
    capacity_budget: f64,
    sector_scale: f64,
    weight_exponent: WeightExponent,
}

impl Pondera {
    pub(crate) const fn new(
        capacity_budget: f64,
        sector_scale: f64,
        weight_exponent: WeightExponent,
    ) -> Self {
        Self {
            capacity_budget,
            sector_scale,
            weight_exponent,
        }
    }

    /// Returns the capacity budget bounding merged cluster weight.
    #[must_use]
    pub const fn capacity_budget(&self) -> f64 {
        self.capacity_budget
    }

    /// Returns the minimum sector scale dividing raw Euclidean distances.
    #[must_use]
    pub const fn sector_scale(&self) -> f64 {
        self.sector_scale
    }

    /// Returns the exponent variant used by the distance metric.
    #[must_use]
    pub const fn weight_exponent(&self) -> WeightExponent {
        self.weight_exponent
    }

    /// Clusters `points` into a budget-respecting partition.
    ///
    /// # Errors
    /// Returns [`PonderaError::EmptyPointSet`] when `points` is empty,
    /// [`PonderaError::NonFiniteCoordinate`] for NaN or infinite
    /// coordinates, and [`PonderaError::InvalidWeight`] for negative or
    /// non-finite weights. Once validation passes the run always terminates
    /// with a valid partition.
    #[instrument(
        name = "core.cluster",
        err,
        skip(self, points),
        fields(
            points = points.len(),
            budget = self.capacity_budget,
            sector_scale = self.sector_scale,
            exponent = ?self.weight_exponent,
        ),
    )]
    pub fn cluster(&self, points: &[Point]) -> Result<Partition> {
        if points.is_empty() {
            warn!("point set is empty, returning error");
        }
        points::validate(points)?;

        let cache = BaseDistances::build(points, self.sector_scale, self.weight_exponent);
        let clusters = MergeEngine::new(points, &cache, self.capacity_budget).run();
        let partition = Partition::new(clusters);
        info!(clusters = partition.len(), "clustering completed");
        Ok(partition)
    }

    /// Clusters `points` and maps the partition back to per-point labels.
    ///
    /// # Errors
    /// Shares the failure modes of [`Self::cluster`], plus
    /// [`PonderaError::PartitionInvariant`] if the defensive partition check
    /// fails — unreachable for partitions produced by the merge engine.
    pub fn label(&self, points: &[Point]) -> Result<ClusteringResult> {
        let partition = self.cluster(points)?;
        ClusteringResult::try_from_partition(&partition, points.len())
            .map_err(|source| PonderaError::PartitionInvariant { source })
    }
}
