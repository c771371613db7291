//! Nearest-point and cube queries.
//!
//! A nearest query first scans the cell holding the query point. If the best
//! candidate there is closer than every interior face of that cell, no other
//! cell can hold anything closer and the search stops. Otherwise the search
//! widens:
//!
//! 1. If the query cell was empty, Chebyshev shells of cells around it are
//!    scanned, one ring at a time, until some point is found.
//! 2. The cube of half-length `d` around the query, where `d` is the distance
//!    to the best candidate so far, is scanned in full. It contains the sphere
//!    of radius `d`, so any closer point must lie in one of its cells.

#![allow(clippy::cast_precision_loss)]

use mesh_types::Positioned;
use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::cell::{CellCoord, CellRange};
use crate::error::{GridError, GridResult};
use crate::grid::Grid;

/// Best candidate found so far.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    distance_sq: f64,
}

impl<'a, P: Positioned> Grid<'a, P> {
    /// Returns the point closest to `query` (Euclidean distance).
    ///
    /// Returns `None` if the grid holds no points. When several points are
    /// equally close, the first one met during the search is returned.
    ///
    /// # Example
    ///
    /// ```
    /// use nalgebra::Point3;
    /// use point_grid::{Grid, GridParams};
    ///
    /// let pts = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [5.0, 5.0, 5.0]];
    /// let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(1))?;
    ///
    /// assert_eq!(grid.nearest(&Point3::new(0.9, 0.2, 0.0)), Some(&[1.0, 0.0, 0.0]));
    /// # Ok::<(), point_grid::GridError>(())
    /// ```
    #[must_use]
    pub fn nearest(&self, query: &Point3<f64>) -> Option<&'a P> {
        self.nearest_index(query).map(|index| &self.points()[index])
    }

    /// Like [`Grid::nearest`], but an empty grid is an error.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyGrid`] if the grid holds no points.
    pub fn try_nearest(&self, query: &Point3<f64>) -> GridResult<&'a P> {
        self.nearest(query).ok_or(GridError::EmptyGrid)
    }

    /// Index (into the indexed slice) of the point closest to `query`.
    #[must_use]
    pub fn nearest_index(&self, query: &Point3<f64>) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let origin = self.cell_of(query);
        let mut best = None;
        self.scan_cell(origin, query, &mut best);

        match best {
            Some(found) => {
                let reach = self
                    .face_distances(query, origin)
                    .into_iter()
                    .fold(f64::INFINITY, f64::min);
                if found.distance_sq.sqrt() <= reach {
                    return Some(found.index);
                }
            }
            None => self.ring_search(origin, query, &mut best),
        }

        let radius = best?.distance_sq.sqrt();
        for cell in self.cells_within_cube(query, radius) {
            self.scan_cell(cell, query, &mut best);
        }
        best.map(|c| c.index)
    }

    /// Distances from `query` to the six faces of `cell`, ordered
    /// `[low x, high x, low y, high y, low z, high z]`.
    ///
    /// Faces on the outer boundary of the grid have no cells behind them and
    /// report `f64::INFINITY`.
    #[must_use]
    pub fn face_distances(&self, query: &Point3<f64>, cell: CellCoord) -> [f64; 6] {
        let c = cell.as_array();
        let counts = self.cell_count();
        let step = self.step_size();
        let min = self.bounds().min;

        let mut faces = [f64::INFINITY; 6];
        for k in 0..3 {
            let low = min[k] + c[k] as f64 * step[k];
            if c[k] > 0 {
                faces[2 * k] = query[k] - low;
            }
            if c[k] + 1 < counts[k] {
                faces[2 * k + 1] = low + step[k] - query[k];
            }
        }
        faces
    }

    /// Inclusive range of cells overlapping the cube of half-length `half_len`
    /// centred on `center`, clamped to the grid.
    ///
    /// A negative or NaN `half_len` gives an empty range.
    #[must_use]
    pub fn cells_within_cube(&self, center: &Point3<f64>, half_len: f64) -> CellRange {
        if !(half_len >= 0.0) {
            return CellRange::empty();
        }
        let half = Vector3::repeat(half_len);
        CellRange::new(self.cell_of(&(center - half)), self.cell_of(&(center + half)))
    }

    /// Indices of the points in every cell overlapping the cube of half-length
    /// `half_len` centred on `center`.
    ///
    /// The result is a superset of the points inside the cube: whole buckets
    /// are returned, so points from the edges of border cells are included.
    /// Callers wanting an exact answer filter it themselves. Cells are visited
    /// with the axis-2 index varying fastest.
    #[must_use]
    pub fn indices_within_cube(&self, center: &Point3<f64>, half_len: f64) -> Vec<usize> {
        self.cells_within_cube(center, half_len)
            .into_iter()
            .flat_map(|cell| self.bucket(cell).iter().copied())
            .collect()
    }

    /// Points in every cell overlapping the cube of half-length `half_len`
    /// centred on `center`. See [`Grid::indices_within_cube`].
    ///
    /// # Example
    ///
    /// ```
    /// use nalgebra::Point3;
    /// use point_grid::{Grid, GridParams};
    ///
    /// let pts: Vec<Point3<f64>> = (0..10).map(|i| Point3::new(f64::from(i), 0.0, 0.0)).collect();
    /// let grid = Grid::build(&pts, &GridParams::with_max_points_per_cell(1))?;
    ///
    /// let near = grid.points_within_cube(&Point3::new(4.0, 0.0, 0.0), 1.0);
    /// assert!(near.contains(&&Point3::new(3.0, 0.0, 0.0)));
    /// assert!(near.contains(&&Point3::new(5.0, 0.0, 0.0)));
    /// # Ok::<(), point_grid::GridError>(())
    /// ```
    #[must_use]
    pub fn points_within_cube(&self, center: &Point3<f64>, half_len: f64) -> Vec<&'a P> {
        let points = self.points();
        self.indices_within_cube(center, half_len)
            .into_iter()
            .map(|index| &points[index])
            .collect()
    }

    fn scan_cell(&self, cell: CellCoord, query: &Point3<f64>, best: &mut Option<Candidate>) {
        let points = self.points();
        for &index in self.bucket(cell) {
            let distance_sq = (points[index].position() - query).norm_squared();
            if best.is_none_or(|b| distance_sq < b.distance_sq) {
                *best = Some(Candidate { index, distance_sq });
            }
        }
    }

    /// Scans shells of growing Chebyshev radius around `origin` until one
    /// yields a candidate.
    fn ring_search(&self, origin: CellCoord, query: &Point3<f64>, best: &mut Option<Candidate>) {
        let counts = self.cell_count();
        let o = origin.as_array();
        let max_radius = (0..3)
            .map(|k| o[k].max(counts[k] - 1 - o[k]))
            .max()
            .unwrap_or(0);

        for radius in 1..=max_radius {
            self.scan_shell(origin, radius, query, best);
            if best.is_some() {
                debug!(?origin, radius, "Nearest query widened past empty cell");
                return;
            }
        }
    }

    /// Scans the cells at Chebyshev distance exactly `radius` from `origin`.
    fn scan_shell(
        &self,
        origin: CellCoord,
        radius: usize,
        query: &Point3<f64>,
        best: &mut Option<Candidate>,
    ) {
        let counts = self.cell_count();
        let o = origin.as_array();
        let lo = o.map(|c| c.saturating_sub(radius));
        let hi = [0, 1, 2].map(|k| (o[k] + radius).min(counts[k] - 1));

        for i in lo[0]..=hi[0] {
            for j in lo[1]..=hi[1] {
                let column = CellCoord::new(i, j, o[2]);
                if column.chebyshev_distance(origin) == radius {
                    for k in lo[2]..=hi[2] {
                        self.scan_cell(CellCoord::new(i, j, k), query, best);
                    }
                } else {
                    // Interior column: only its two end caps are on the shell.
                    if o[2] >= radius {
                        self.scan_cell(CellCoord::new(i, j, o[2] - radius), query, best);
                    }
                    if o[2] + radius < counts[2] {
                        self.scan_cell(CellCoord::new(i, j, o[2] + radius), query, best);
                    }
                }
            }
        }
    }
}
