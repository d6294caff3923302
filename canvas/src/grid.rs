//! Grid arithmetic: the snap primitive every placement path goes through.
//!
//! A grid is a single positive cell size. [`snap_grid`] is pure and total so
//! it can be called from spawn, paste and transform code alike; [`Grid`]
//! carries a granularity that has already been validated.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use serde::{Deserialize, Serialize};

/// Errors produced when constructing a [`Grid`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Granularity was zero or negative.
    #[error("grid granularity must be positive, got {0}")]
    NonPositive(f64),

    /// Granularity was NaN or infinite.
    #[error("grid granularity must be finite, got {0}")]
    NonFinite(f64),
}

/// Nearest multiple of `granularity` to `coord`.
///
/// Ties round toward positive infinity: `snap_grid(16.0, 32.0) == 32.0` and
/// `snap_grid(-16.0, 32.0) == 0.0`.
#[must_use]
pub fn snap_grid(coord: f64, granularity: f64) -> f64 {
    round_half_up(coord / granularity) * granularity
}

/// Round to the nearest integer, ties toward positive infinity.
///
/// Unlike [`f64::round`], which sends `-0.5` to `-1.0`.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round `length` up to a whole number of cells, never less than one cell.
#[must_use]
pub fn ceil_to_cells(length: f64, granularity: f64) -> f64 {
    (length / granularity).ceil().max(1.0) * granularity
}

/// A validated grid cell size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Grid(f64);

impl Grid {
    /// Validate `granularity` and wrap it.
    ///
    /// Odd sizes are accepted; half-cell arithmetic is only exact for even
    /// sizes, so they are reported at `warn` level.
    pub fn new(granularity: f64) -> Result<Self, GridError> {
        if !granularity.is_finite() {
            return Err(GridError::NonFinite(granularity));
        }
        if granularity <= 0.0 {
            return Err(GridError::NonPositive(granularity));
        }
        if granularity % 2.0 != 0.0 {
            tracing::warn!(granularity, "grid granularity is not an even integer; half-cell placement may drift");
        }
        Ok(Self(granularity))
    }

    /// Cell size in world units.
    #[must_use]
    pub fn granularity(self) -> f64 {
        self.0
    }

    /// Snap a single coordinate to this grid.
    #[must_use]
    pub fn snap(self, coord: f64) -> f64 {
        snap_grid(coord, self.0)
    }

    /// Whether `coord` already lies on a grid line.
    #[must_use]
    pub fn is_aligned(self, coord: f64) -> bool {
        (self.snap(coord) - coord).abs() < f64::EPSILON * coord.abs().max(1.0)
    }

    /// Round a length up to a whole number of cells, never less than one cell.
    #[must_use]
    pub fn ceil_cells(self, length: f64) -> f64 {
        ceil_to_cells(length, self.0)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self(crate::consts::DEFAULT_GRANULARITY)
    }
}

impl TryFrom<f64> for Grid {
    type Error = GridError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grid> for f64 {
    fn from(grid: Grid) -> Self {
        grid.0
    }
}
