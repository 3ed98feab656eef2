//! Weighted planar point type and input validation.

use crate::error::{PonderaError, Result};

/// A planar point with an attached non-negative weight.
///
/// The weight plays two roles: it modifies the exponent of the pairwise
/// distance metric, and it is the quantity bounded by the capacity budget
/// when clusters merge. Points are immutable and identified by their index
/// in the slice handed to [`crate::Pondera::cluster`].
///
/// # Examples
/// ```
/// use pondera_core::Point;
///
/// let point = Point::new(1.0, 2.0, 0.25);
/// assert_eq!(point.x(), 1.0);
/// assert_eq!(point.y(), 2.0);
/// assert_eq!(point.weight(), 0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
    weight: f64,
}

impl Point {
    /// Creates a point from its coordinates and weight.
    ///
    /// Validation happens when the point set is handed to the algorithm, not
    /// here, so partially built inputs stay cheap to construct.
    #[must_use]
    pub const fn new(x: f64, y: f64, weight: f64) -> Self {
        Self { x, y, weight }
    }

    /// Returns the x coordinate.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Returns the y coordinate.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Returns the weight.
    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

impl From<(f64, f64, f64)> for Point {
    fn from((x, y, weight): (f64, f64, f64)) -> Self {
        Self::new(x, y, weight)
    }
}

/// Rejects point sets the algorithm cannot run against.
///
/// Checks run before any computation: the set must be non-empty, every
/// coordinate finite, and every weight finite and non-negative.
pub(crate) fn validate(points: &[Point]) -> Result<()> {
    if points.is_empty() {
        return Err(PonderaError::EmptyPointSet);
    }
    for (index, point) in points.iter().enumerate() {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(PonderaError::NonFiniteCoordinate {
                index,
                x: point.x,
                y: point.y,
            });
        }
        if !point.weight.is_finite() || point.weight < 0.0 {
            return Err(PonderaError::InvalidWeight {
                index,
                weight: point.weight,
            });
        }
    }
    Ok(())
}
