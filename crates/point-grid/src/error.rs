//! Error types for grid construction and queries.

use thiserror::Error;

/// Result type alias for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors that can occur while building or querying a [`Grid`](crate::Grid).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GridError {
    /// Invalid construction parameters.
    #[error("invalid grid parameters: {0}")]
    InvalidParams(String),

    /// An input point has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Index of the offending point in the input slice.
        index: usize,
    },

    /// A point resolved to a cell outside the grid during construction.
    ///
    /// The upper corner inflation should make this impossible; seeing it means the
    /// bounding box and the bucketing pass disagree about a point.
    #[error("point {index} resolved to cell {cell} on axis {axis}, but the axis has {cell_count} cells")]
    CellOutOfRange {
        /// Index of the offending point in the input slice.
        index: usize,
        /// Axis (0, 1, 2) on which the cell index is out of range.
        axis: usize,
        /// The raw (floored) cell index that was computed.
        cell: f64,
        /// Number of cells on that axis.
        cell_count: usize,
    },

    /// The per-axis cell counts do not fit in memory when multiplied out.
    #[error("grid would need {requested:?} cells, which overflows usize")]
    TooManyCells {
        /// Cell counts per axis that were requested.
        requested: [usize; 3],
    },

    /// A nearest-point query was issued against a grid without points.
    #[error("grid holds no points")]
    EmptyGrid,
}

impl GridError {
    /// Create an invalid params error.
    #[must_use]
    pub fn invalid_params(details: impl Into<String>) -> Self {
        Self::InvalidParams(details.into())
    }
}
