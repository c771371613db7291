//! Grid construction and cell bookkeeping.

// Cell indices are derived from f64 coordinates; the casts are range-checked.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use mesh_types::{Aabb, Positioned};
use nalgebra::Point3;
use tracing::debug;

use crate::cell::{Axis, CellCoord, CellRange};
use crate::error::{GridError, GridResult};
use crate::params::GridParams;
use crate::sizing::{self, Dimensionality};

/// An adaptive uniform grid over a borrowed point slice.
///
/// The grid sizes its cells from the point density: the cloud's bounding box
/// is split into `cell_count[0] x cell_count[1] x cell_count[2]` equal cells so
/// that, on average, no more than `max_points_per_cell` points share a cell.
/// Axes along which the cloud has no extent get a single cell, so flat and
/// collinear clouds are handled without empty layers.
///
/// Cells hold indices into the point slice; the grid never copies or owns
/// points and cannot outlive them. It is immutable once built, so it can be
/// shared between threads and queried concurrently.
///
/// # Example
///
/// ```
/// use nalgebra::Point3;
/// use point_grid::{Grid, GridParams};
///
/// let points: Vec<Point3<f64>> = (0..3)
///     .flat_map(|i| (0..3).map(move |j| Point3::new(f64::from(i), f64::from(j), 0.0)))
///     .collect();
///
/// let grid = Grid::build(&points, &GridParams::with_max_points_per_cell(1))?;
/// assert_eq!(grid.cell_count(), [3, 3, 1]);
///
/// let nearest = grid.nearest(&Point3::new(1.1, 1.1, 0.0));
/// assert_eq!(nearest, Some(&Point3::new(1.0, 1.0, 0.0)));
/// # Ok::<(), point_grid::GridError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Grid<'a, P> {
    /// The indexed points.
    points: &'a [P],
    /// Bounding box of the points, with spanned axes' upper corner inflated.
    bounds: Aabb,
    /// Which axes the cloud spans.
    dimensionality: Dimensionality,
    /// Number of cells per axis (each at least 1).
    cell_count: [usize; 3],
    /// Cell width per axis (0 on single-cell degenerate axes).
    step_size: [f64; 3],
    /// Reciprocal cell width per axis (1 where the width is 0).
    inverse_step_size: [f64; 3],
    /// `cell_points[cell_starts[c]..cell_starts[c + 1]]` is the bucket of flat cell `c`.
    cell_starts: Vec<usize>,
    /// Point indices grouped by cell, in input order within a cell.
    cell_points: Vec<usize>,
}

/// Occupancy summary of a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridStats {
    /// Number of indexed points.
    pub points: usize,
    /// Total number of cells.
    pub cells: usize,
    /// Number of cells holding at least one point.
    pub occupied_cells: usize,
    /// Size of the fullest bucket.
    pub max_bucket: usize,
    /// Average number of points per cell, over all cells.
    pub mean_bucket: f64,
}

impl<'a, P: Positioned> Grid<'a, P> {
    /// Builds a grid with default parameters (512 points per cell on average).
    ///
    /// # Errors
    ///
    /// See [`Grid::build`].
    pub fn new(points: &'a [P]) -> GridResult<Self> {
        Self::build(points, &GridParams::default())
    }

    /// Builds a grid over `points`.
    ///
    /// An empty slice yields a single-cell grid at the origin. It answers cube
    /// queries with nothing and nearest-point queries with `None`.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidParams`] if `params` fail validation.
    /// - [`GridError::NonFiniteCoordinate`] if a point has a NaN or infinite coordinate.
    /// - [`GridError::TooManyCells`] if the cell counts overflow `usize`.
    /// - [`GridError::CellOutOfRange`] if a point lands outside the computed cells.
    pub fn build(points: &'a [P], params: &GridParams) -> GridResult<Self> {
        params.validate()?;

        debug!(
            points = points.len(),
            max_points_per_cell = params.max_points_per_cell,
            "Building point grid"
        );

        if let Some(index) = points
            .iter()
            .position(|p| !p.position().iter().all(|c| c.is_finite()))
        {
            return Err(GridError::NonFiniteCoordinate { index });
        }

        let raw = if points.is_empty() {
            Aabb::from_point(Point3::origin())
        } else {
            Aabb::of(points)
        };
        let dimensionality = Dimensionality::of(&raw);
        let bounds = sizing::inflate(&raw, dimensionality, params.inflation);

        let size = bounds.size();
        let extent = [size.x, size.y, size.z];
        let cell_count = sizing::cell_counts(
            dimensionality,
            extent,
            points.len(),
            params.max_points_per_cell,
        )?;

        let mut step_size = [0.0; 3];
        let mut inverse_step_size = [1.0; 3];
        for axis in Axis::ALL {
            let k = axis.index();
            if dimensionality.spans(axis) {
                step_size[k] = extent[k] / cell_count[k] as f64;
            }
            if step_size[k] > 0.0 {
                inverse_step_size[k] = 1.0 / step_size[k];
            }
        }

        let mut grid = Self {
            points,
            bounds,
            dimensionality,
            cell_count,
            step_size,
            inverse_step_size,
            cell_starts: Vec::new(),
            cell_points: Vec::new(),
        };
        grid.fill_buckets()?;

        debug!(
            cells = ?grid.cell_count,
            dimensionality = ?grid.dimensionality,
            occupied = grid.occupied_cells().count(),
            "Built point grid"
        );

        Ok(grid)
    }

    /// Counting sort of point indices into cells.
    fn fill_buckets(&mut self) -> GridResult<()> {
        let n_cells = self.num_cells();
        let mut flat_cells = Vec::with_capacity(self.points.len());
        let mut starts = vec![0usize; n_cells + 1];

        for (index, point) in self.points.iter().enumerate() {
            let flat = self.flat_index(self.bucket_cell(index, &point.position())?);
            starts[flat + 1] += 1;
            flat_cells.push(flat);
        }
        for c in 0..n_cells {
            starts[c + 1] += starts[c];
        }

        let mut cursor = starts[..n_cells].to_vec();
        let mut cell_points = vec![0usize; self.points.len()];
        for (index, &flat) in flat_cells.iter().enumerate() {
            cell_points[cursor[flat]] = index;
            cursor[flat] += 1;
        }

        debug_assert_eq!(starts[n_cells], self.points.len());
        self.cell_starts = starts;
        self.cell_points = cell_points;
        Ok(())
    }

    /// Unclamped cell of an input point; out-of-range indices are an error.
    fn bucket_cell(&self, index: usize, position: &Point3<f64>) -> GridResult<CellCoord> {
        let mut cell = [0usize; 3];
        for k in 0..3 {
            if self.cell_count[k] == 1 {
                continue;
            }
            let raw = ((position[k] - self.bounds.min[k]) * self.inverse_step_size[k]).floor();
            if !(raw >= 0.0 && raw < self.cell_count[k] as f64) {
                return Err(GridError::CellOutOfRange {
                    index,
                    axis: k,
                    cell: raw,
                    cell_count: self.cell_count[k],
                });
            }
            cell[k] = raw as usize;
        }
        Ok(CellCoord::from(cell))
    }

    /// Resolves any coordinate to a cell, clamping each axis into the grid.
    ///
    /// Coordinates outside the bounding box map to the nearest border cell;
    /// NaN maps to cell 0. Never fails.
    ///
    /// # Example
    ///
    /// ```
    /// use nalgebra::Point3;
    /// use point_grid::{CellCoord, Grid, GridParams};
    ///
    /// let pts = [[0.0, 0.0, 0.0], [4.0, 4.0, 4.0]];
    /// let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(1))?;
    /// let last = grid.cell_count().map(|c| c - 1);
    ///
    /// assert_eq!(grid.cell_of(&Point3::new(-10.0, -10.0, -10.0)), CellCoord::new(0, 0, 0));
    /// assert_eq!(grid.cell_of(&Point3::new(99.0, 99.0, 99.0)), CellCoord::from(last));
    /// # Ok::<(), point_grid::GridError>(())
    /// ```
    #[must_use]
    pub fn cell_of(&self, position: &Point3<f64>) -> CellCoord {
        CellCoord::new(
            self.axis_cell(position.x, 0),
            self.axis_cell(position.y, 1),
            self.axis_cell(position.z, 2),
        )
    }

    fn axis_cell(&self, value: f64, k: usize) -> usize {
        let last = self.cell_count[k] - 1;
        if last == 0 {
            return 0;
        }
        let raw = ((value - self.bounds.min[k]) * self.inverse_step_size[k]).floor();
        if raw >= 0.0 { (raw as usize).min(last) } else { 0 }
    }

    /// Flat bucket index of a cell inside the grid (axis 0 varies fastest).
    pub(crate) const fn flat_index(&self, cell: CellCoord) -> usize {
        cell.i + cell.j * self.cell_count[0] + cell.k * self.cell_count[0] * self.cell_count[1]
    }

    /// Whether `cell` lies inside the grid.
    #[must_use]
    pub const fn contains_cell(&self, cell: CellCoord) -> bool {
        cell.i < self.cell_count[0] && cell.j < self.cell_count[1] && cell.k < self.cell_count[2]
    }

    /// Indices of the points in `cell`, in input order.
    ///
    /// Returns an empty slice for cells outside the grid.
    #[must_use]
    pub fn bucket(&self, cell: CellCoord) -> &[usize] {
        if !self.contains_cell(cell) {
            return &[];
        }
        let flat = self.flat_index(cell);
        &self.cell_points[self.cell_starts[flat]..self.cell_starts[flat + 1]]
    }

    /// World-space box covered by `cell`.
    ///
    /// The last cell on each axis ends at the (inflated) upper corner of the grid.
    #[must_use]
    pub fn cell_bounds(&self, cell: CellCoord) -> Aabb {
        let c = cell.as_array();
        let mut min = self.bounds.min;
        let mut max = self.bounds.max;
        for k in 0..3 {
            min[k] = (c[k] as f64).mul_add(self.step_size[k], self.bounds.min[k]);
            if c[k] + 1 < self.cell_count[k] {
                max[k] = ((c[k] + 1) as f64).mul_add(self.step_size[k], self.bounds.min[k]);
            }
        }
        Aabb { min, max }
    }

    /// All cells of the grid as an inclusive range.
    #[must_use]
    pub fn cells(&self) -> CellRange {
        CellRange::new(
            CellCoord::new(0, 0, 0),
            CellCoord::from(self.cell_count.map(|c| c - 1)),
        )
    }

    /// Iterates over the non-empty cells with their buckets.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (CellCoord, &[usize])> + '_ {
        self.cells()
            .into_iter()
            .map(|cell| (cell, self.bucket(cell)))
            .filter(|(_, bucket)| !bucket.is_empty())
    }

    /// Occupancy summary.
    #[must_use]
    pub fn stats(&self) -> GridStats {
        let cells = self.num_cells();
        let (occupied_cells, max_bucket) = self
            .cell_starts
            .windows(2)
            .map(|w| w[1] - w[0])
            .filter(|&len| len > 0)
            .fold((0, 0), |(count, max), len| (count + 1, max.max(len)));
        GridStats {
            points: self.points.len(),
            cells,
            occupied_cells,
            max_bucket,
            mean_bucket: self.points.len() as f64 / cells as f64,
        }
    }
}

impl<'a, P> Grid<'a, P> {
    /// The indexed points.
    #[must_use]
    pub const fn points(&self) -> &'a [P] {
        self.points
    }

    /// Number of indexed points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the grid holds no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding box of the grid, including the upper-corner inflation.
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Which axes the indexed cloud spans.
    #[must_use]
    pub const fn dimensionality(&self) -> Dimensionality {
        self.dimensionality
    }

    /// Number of cells per axis.
    #[must_use]
    pub const fn cell_count(&self) -> [usize; 3] {
        self.cell_count
    }

    /// Total number of cells.
    #[must_use]
    pub const fn num_cells(&self) -> usize {
        self.cell_count[0] * self.cell_count[1] * self.cell_count[2]
    }

    /// Cell width per axis. Zero on degenerate axes.
    #[must_use]
    pub const fn step_size(&self) -> [f64; 3] {
        self.step_size
    }

    /// Reciprocal cell width per axis. One on degenerate axes.
    #[must_use]
    pub const fn inverse_step_size(&self) -> [f64; 3] {
        self.inverse_step_size
    }
}
