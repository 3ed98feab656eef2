//! Error types for the Pondera core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::fmt;

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Error raised when a label vector cannot be derived from a partition.
///
/// The merge engine maintains the partition invariant by construction, so
/// these variants signal an internal defect rather than bad caller input.
/// They are still checked at the labelling boundary instead of silently
/// producing wrong labels.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum PartitionError {
    /// A cluster referenced a point index beyond the input length.
    #[error("cluster {cluster} references point {index} beyond input length {len}")]
    OutOfBounds {
        /// Position of the offending cluster in the partition.
        cluster: usize,
        /// Point index that exceeded the input bounds.
        index: usize,
        /// Number of points in the input.
        len: usize,
    },
    /// A point appeared in more than one cluster.
    #[error("point {index} is assigned to more than one cluster")]
    Duplicated {
        /// Point index claimed by multiple clusters.
        index: usize,
    },
    /// A point appeared in no cluster at all.
    #[error("point {index} is not assigned to any cluster")]
    Unassigned {
        /// Point index missing from every cluster.
        index: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`PartitionError`] variants.
    enum PartitionErrorCode for PartitionError {
        /// A cluster referenced a point index beyond the input length.
        OutOfBounds => OutOfBounds { .. } => "PARTITION_OUT_OF_BOUNDS",
        /// A point appeared in more than one cluster.
        Duplicated => Duplicated { .. } => "PARTITION_DUPLICATED_POINT",
        /// A point appeared in no cluster at all.
        Unassigned => Unassigned { .. } => "PARTITION_UNASSIGNED_POINT",
    }
}

/// Error type produced when configuring or running [`crate::Pondera`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum PonderaError {
    /// Capacity budget must be a non-negative number.
    #[error("capacity budget must be non-negative and not NaN (got {got})")]
    InvalidCapacityBudget {
        /// The invalid budget supplied by the caller.
        got: f64,
    },
    /// Sector scale must be strictly positive and finite.
    #[error("sector scale must be positive and finite (got {got})")]
    InvalidSectorScale {
        /// The invalid scale supplied by the caller.
        got: f64,
    },
    /// The supplied point slice contained no points.
    #[error("point set contains no points")]
    EmptyPointSet,
    /// A point carried a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate ({x}, {y})")]
    NonFiniteCoordinate {
        /// Index of the offending point in the input.
        index: usize,
        /// X coordinate as supplied.
        x: f64,
        /// Y coordinate as supplied.
        y: f64,
    },
    /// A point carried a negative or non-finite weight.
    #[error("point {index} has an invalid weight {weight}; weights must be finite and non-negative")]
    InvalidWeight {
        /// Index of the offending point in the input.
        index: usize,
        /// Weight as supplied.
        weight: f64,
    },
    /// The partition invariant was broken while deriving labels.
    #[error("partition invariant violated: {source}")]
    PartitionInvariant {
        /// Underlying partition defect detected at the labelling boundary.
        #[source]
        source: PartitionError,
    },
}

define_error_codes! {
    /// Stable codes describing [`PonderaError`] variants.
    enum PonderaErrorCode for PonderaError {
        /// Capacity budget must be a non-negative number.
        InvalidCapacityBudget => InvalidCapacityBudget { .. } => "PONDERA_INVALID_CAPACITY_BUDGET",
        /// Sector scale must be strictly positive and finite.
        InvalidSectorScale => InvalidSectorScale { .. } => "PONDERA_INVALID_SECTOR_SCALE",
        /// The supplied point slice contained no points.
        EmptyPointSet => EmptyPointSet => "PONDERA_EMPTY_POINT_SET",
        /// A point carried a NaN or infinite coordinate.
        NonFiniteCoordinate => NonFiniteCoordinate { .. } => "PONDERA_NON_FINITE_COORDINATE",
        /// A point carried a negative or non-finite weight.
        InvalidWeight => InvalidWeight { .. } => "PONDERA_INVALID_WEIGHT",
        /// The partition invariant was broken while deriving labels.
        PartitionViolation => PartitionInvariant { .. } => "PONDERA_PARTITION_VIOLATION",
    }
}

impl PonderaError {
    /// Retrieve the inner [`PartitionErrorCode`] when the error originated in
    /// the partition invariant check.
    pub const fn partition_code(&self) -> Option<PartitionErrorCode> {
        match self {
            Self::PartitionInvariant { source } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, PonderaError>;
