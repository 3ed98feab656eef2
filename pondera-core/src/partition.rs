//! Partition and label-vector result types.
//!
//! A finished run yields a [`Partition`]: the final live clusters in the
//! order they existed at termination. [`ClusteringResult`] maps that back to
//! a per-point label vector, validating the partition invariant defensively
//! at the boundary instead of silently producing wrong labels.

use crate::error::PartitionError;

/// Ordered list of disjoint clusters covering every input point exactly once.
///
/// Singletons that never merged keep their original relative order; merged
/// clusters were appended at the end of the live list and never reordered.
///
/// # Examples
/// ```
/// use pondera_core::{Point, PonderaBuilder};
///
/// let points = vec![Point::new(0.0, 0.0, 1.0), Point::new(9.0, 9.0, 1.0)];
/// let pondera = PonderaBuilder::new().with_capacity_budget(0.5).build()?;
/// let partition = pondera.cluster(&points)?;
/// assert_eq!(partition.clusters(), &[vec![0], vec![1]]);
/// # Ok::<(), pondera_core::PonderaError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Partition {
    clusters: Vec<Vec<usize>>,
}

impl Partition {
    pub(crate) fn new(clusters: Vec<Vec<usize>>) -> Self {
        Self { clusters }
    }

    /// Returns the clusters in their final live order.
    #[must_use]
    pub fn clusters(&self) -> &[Vec<usize>] {
        &self.clusters
    }

    /// Returns the number of clusters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Returns whether the partition holds no clusters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Consumes the partition, yielding the underlying cluster list.
    #[must_use]
    pub fn into_clusters(self) -> Vec<Vec<usize>> {
        self.clusters
    }
}

/// Identifier assigned to a cluster: its position in the final partition.
///
/// # Examples
/// ```
/// use pondera_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(usize);

impl ClusterId {
    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: usize) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> usize { self.0 }
}

/// Per-point labelling of a clustering run.
///
/// `labels()[p]` is the position in the partition of the cluster containing
/// point `p`. When no merges occurred the labels are the identity.
///
/// # Examples
/// ```
/// use pondera_core::{Point, PonderaBuilder};
///
/// let points = vec![Point::new(0.0, 0.0, 1.0), Point::new(9.0, 9.0, 1.0)];
/// let pondera = PonderaBuilder::new().with_capacity_budget(0.5).build()?;
/// let result = pondera.label(&points)?;
/// assert_eq!(result.labels().len(), 2);
/// assert_eq!(result.cluster_count(), 2);
/// # Ok::<(), pondera_core::PonderaError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClusteringResult {
    labels: Vec<ClusterId>,
    cluster_count: usize,
}

impl ClusteringResult {
    /// Derives the label vector for `point_count` points from a partition.
    ///
    /// # Errors
    /// Returns [`PartitionError::OutOfBounds`] when a cluster references an
    /// index beyond `point_count`, [`PartitionError::Duplicated`] when a
    /// point is claimed twice, and [`PartitionError::Unassigned`] when a
    /// point is claimed by no cluster. None of these can occur for a
    /// partition produced by the merge engine.
    pub fn try_from_partition(
        partition: &Partition,
        point_count: usize,
    ) -> Result<Self, PartitionError> {
        let mut labels = vec![None; point_count];
        for (position, cluster) in partition.clusters().iter().enumerate() {
            for &index in cluster {
                let slot =
                    labels
                        .get_mut(index)
                        .ok_or(PartitionError::OutOfBounds {
                            cluster: position,
                            index,
                            len: point_count,
                        })?;
                if slot.is_some() {
                    return Err(PartitionError::Duplicated { index });
                }
                *slot = Some(ClusterId::new(position));
            }
        }
        let labels = labels
            .into_iter()
            .enumerate()
            .map(|(index, label)| label.ok_or(PartitionError::Unassigned { index }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            labels,
            cluster_count: partition.len(),
        })
    }

    /// Returns the per-point labels in input order.
    #[must_use]
    pub fn labels(&self) -> &[ClusterId] {
        &self.labels
    }

    /// Returns the number of clusters in the underlying partition.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_partition_positions() {
        let partition = Partition::new(vec![vec![2], vec![0, 1]]);
        let result = ClusteringResult::try_from_partition(&partition, 3)
            .expect("valid partition must label");
        let ids: Vec<usize> = result.labels().iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![1, 1, 0]);
        assert_eq!(result.cluster_count(), 2);
    }

    #[test]
    fn identity_partition_yields_identity_labels() {
        let partition = Partition::new(vec![vec![0], vec![1], vec![2]]);
        let result = ClusteringResult::try_from_partition(&partition, 3)
            .expect("valid partition must label");
        let ids: Vec<usize> = result.labels().iter().map(|id| id.get()).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn out_of_bounds_index_is_rejected() {
        let partition = Partition::new(vec![vec![0, 5]]);
        let err = ClusteringResult::try_from_partition(&partition, 2)
            .expect_err("index beyond input must fail");
        assert_eq!(
            err,
            PartitionError::OutOfBounds {
                cluster: 0,
                index: 5,
                len: 2,
            }
        );
    }

    #[test]
    fn duplicated_point_is_rejected() {
        let partition = Partition::new(vec![vec![0, 1], vec![1]]);
        let err = ClusteringResult::try_from_partition(&partition, 2)
            .expect_err("double assignment must fail");
        assert_eq!(err, PartitionError::Duplicated { index: 1 });
    }

    #[test]
    fn unassigned_point_is_rejected() {
        let partition = Partition::new(vec![vec![0], vec![2]]);
        let err = ClusteringResult::try_from_partition(&partition, 3)
            .expect_err("missing point must fail");
        assert_eq!(err, PartitionError::Unassigned { index: 1 });
    }
}
