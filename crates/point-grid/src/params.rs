//! Parameters for grid construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Parameters for building a [`Grid`](crate::Grid).
///
/// # Example
///
/// ```
/// use point_grid::GridParams;
///
/// // Default: 512 points per cell on average
/// let params = GridParams::default();
/// assert_eq!(params.max_points_per_cell, 512);
///
/// // Finer grid for small clouds
/// let fine = GridParams::with_max_points_per_cell(8);
/// assert_eq!(fine.max_points_per_cell, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridParams {
    /// Target average number of points per cell. The grid gets at least
    /// `n_points / max_points_per_cell` cells, up to integer rounding.
    ///
    /// Powers of two keep the allocation overhead low.
    pub max_points_per_cell: usize,

    /// Relative amount by which the upper corner of every non-degenerate axis is
    /// raised, so that the point with the largest coordinate lands inside the
    /// last cell instead of on its upper face.
    pub inflation: f64,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            max_points_per_cell: 512,
            inflation: 1e-6,
        }
    }
}

impl GridParams {
    /// Create params with a custom target density.
    #[must_use]
    pub const fn with_max_points_per_cell(max_points_per_cell: usize) -> Self {
        Self {
            max_points_per_cell,
            inflation: 1e-6,
        }
    }

    /// Set the target density.
    #[must_use]
    pub const fn max_points_per_cell(mut self, count: usize) -> Self {
        self.max_points_per_cell = count;
        self
    }

    /// Set the relative upper-corner inflation.
    #[must_use]
    pub const fn inflation(mut self, inflation: f64) -> Self {
        self.inflation = inflation;
        self
    }

    /// Check that the parameters can build a grid.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidParams`] if `max_points_per_cell` is zero or
    /// `inflation` is not a positive finite number.
    pub fn validate(&self) -> GridResult<()> {
        if self.max_points_per_cell == 0 {
            return Err(GridError::invalid_params(
                "max_points_per_cell must be at least 1",
            ));
        }
        if !(self.inflation.is_finite() && self.inflation > 0.0) {
            return Err(GridError::invalid_params(format!(
                "inflation must be positive and finite, got {}",
                self.inflation
            )));
        }
        Ok(())
    }
}
