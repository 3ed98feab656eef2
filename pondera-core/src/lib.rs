//! Pondera core library.
//!
//! Capacity-constrained hierarchical agglomerative clustering of weighted
//! planar points: the two closest live clusters merge greedily — under a
//! weight-sensitive power distance priced from a frozen base distance
//! cache — as long as the merged cluster's total weight stays within the
//! configured capacity budget.

mod builder;
mod cache;
mod error;
mod merge;
mod metric;
mod partition;
mod points;
mod pondera;

pub use crate::{
    builder::PonderaBuilder,
    error::{PartitionError, PartitionErrorCode, PonderaError, PonderaErrorCode, Result},
    metric::{WeightExponent, scaled_power_distance},
    partition::{ClusterId, ClusteringResult, Partition},
    points::Point,
    pondera::Pondera,
};
