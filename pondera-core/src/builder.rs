//! Builder utilities for configuring Pondera runs.
//!
//! Exposes the capacity budget, sector scale, and exponent-variant surface
//! and the validation applied before constructing [`Pondera`] instances.

use crate::{Result, error::PonderaError, metric::WeightExponent, pondera::Pondera};

/// Configures and constructs [`Pondera`] instances.
///
/// The default budget is unbounded (`+∞`), which collapses any input into a
/// single cluster; real deployments always set a finite budget.
///
/// # Examples
/// ```
/// use pondera_core::{PonderaBuilder, WeightExponent};
///
/// let pondera = PonderaBuilder::new()
///     .with_capacity_budget(0.7)
///     .with_sector_scale(0.1)
///     .with_weight_exponent(WeightExponent::Sum)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(pondera.capacity_budget(), 0.7);
/// assert_eq!(pondera.sector_scale(), 0.1);
/// assert_eq!(pondera.weight_exponent(), WeightExponent::Sum);
/// ```
#[derive(Debug, Clone)]
pub struct PonderaBuilder {
    capacity_budget: f64,
    sector_scale: f64,
    weight_exponent: WeightExponent,
}

impl Default for PonderaBuilder {
    fn default() -> Self {
        Self {
            capacity_budget: f64::INFINITY,
            sector_scale: 1.0,
            weight_exponent: WeightExponent::OnePlusSum,
        }
    }
}

impl PonderaBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use pondera_core::{PonderaBuilder, WeightExponent};
    ///
    /// let builder = PonderaBuilder::new();
    /// assert_eq!(builder.capacity_budget(), f64::INFINITY);
    /// assert_eq!(builder.sector_scale(), 1.0);
    /// assert_eq!(builder.weight_exponent(), WeightExponent::OnePlusSum);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the capacity budget bounding merged cluster weight.
    #[must_use]
    pub fn with_capacity_budget(mut self, budget: f64) -> Self {
        self.capacity_budget = budget;
        self
    }

    /// Returns the configured capacity budget.
    #[must_use]
    pub fn capacity_budget(&self) -> f64 {
        self.capacity_budget
    }

    /// Overrides the minimum sector scale dividing raw Euclidean distances.
    #[must_use]
    pub fn with_sector_scale(mut self, scale: f64) -> Self {
        self.sector_scale = scale;
        self
    }

    /// Returns the configured sector scale.
    #[must_use]
    pub fn sector_scale(&self) -> f64 {
        self.sector_scale
    }

    /// Selects the exponent variant used by the distance metric.
    #[must_use]
    pub fn with_weight_exponent(mut self, exponent: WeightExponent) -> Self {
        self.weight_exponent = exponent;
        self
    }

    /// Returns the configured exponent variant.
    #[must_use]
    pub fn weight_exponent(&self) -> WeightExponent {
        self.weight_exponent
    }

    /// Validates the configuration and constructs a [`Pondera`] instance.
    ///
    /// # Errors
    /// Returns [`PonderaError::InvalidCapacityBudget`] when the budget is
    /// NaN or negative and [`PonderaError::InvalidSectorScale`] when the
    /// scale is non-positive, NaN, or infinite.
    ///
    /// # Examples
    /// ```
    /// use pondera_core::PonderaBuilder;
    ///
    /// let err = PonderaBuilder::new()
    ///     .with_sector_scale(0.0)
    ///     .build()
    ///     .expect_err("zero scale must be rejected");
    /// assert_eq!(err.code().as_str(), "PONDERA_INVALID_SECTOR_SCALE");
    /// ```
    pub fn build(self) -> Result<Pondera> {
        if self.capacity_budget.is_nan() || self.capacity_budget < 0.0 {
            return Err(PonderaError::InvalidCapacityBudget {
                got: self.capacity_budget,
            });
        }
        if !self.sector_scale.is_finite() || self.sector_scale <= 0.0 {
            return Err(PonderaError::InvalidSectorScale {
                got: self.sector_scale,
            });
        }
        Ok(Pondera::new(
            self.capacity_budget,
            self.sector_scale,
            self.weight_exponent,
        ))
    }
}
