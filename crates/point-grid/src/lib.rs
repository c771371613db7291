//! Adaptive uniform grid for nearest-point and box queries over point clouds.
//!
//! This crate indexes a borrowed slice of points in a regular 3D grid whose
//! resolution follows the data:
//!
//! - [`Grid`] - The spatial index: build once, query many times
//! - [`GridParams`] - Target points per cell and upper-corner inflation
//! - [`CellCoord`] and [`CellRange`] - Integer cell coordinates and inclusive boxes of them
//! - [`Dimensionality`] - Whether the cloud is a point, a line, a plane or a volume
//! - [`GridError`] - Construction and query errors
//!
//! # How the grid is sized
//!
//! The bounding box of the cloud is split into equal cells, as close to cubes
//! as the aspect ratio allows, so that on average each cell holds at most
//! [`GridParams::max_points_per_cell`] points. Axes along which the cloud is
//! flat get a single cell: a planar scan is indexed as a 2D grid and a line of
//! samples as a 1D grid, with no empty layers.
//!
//! The upper corner of the box is pushed out by a tiny relative amount, so the
//! point with the largest coordinate falls inside the last cell rather than on
//! its outer face.
//!
//! # Coordinate Systems
//!
//! Positions are `f64` world coordinates ([`Point3`]). Cells are addressed by
//! `usize` indices per axis, with cell `(0, 0, 0)` at the minimum corner of the
//! bounding box. Any coordinate, including ones outside the box, resolves to a
//! cell by clamping to the border.
//!
//! # Example
//!
//! ```
//! use point_grid::{Grid, GridParams, Point3};
//!
//! // Points on a line, one every 0.5 units
//! let points: Vec<Point3<f64>> = (0..100)
//!     .map(|i| Point3::new(f64::from(i) * 0.5, 1.0, 2.0))
//!     .collect();
//!
//! // About four points per cell
//! let grid = Grid::build(&points, &GridParams::with_max_points_per_cell(4))?;
//! assert_eq!(grid.cell_count(), [25, 1, 1]);
//!
//! // Nearest point
//! let nearest = grid.nearest(&Point3::new(10.2, 0.0, 0.0));
//! assert_eq!(nearest, Some(&Point3::new(10.0, 1.0, 2.0)));
//!
//! // Everything in the cells around a cube; filter for an exact answer
//! let center = Point3::new(20.0, 1.0, 2.0);
//! let exact: Vec<_> = grid
//!     .points_within_cube(&center, 1.0)
//!     .into_iter()
//!     .filter(|p| (*p - center).amax() <= 1.0)
//!     .collect();
//! assert_eq!(exact.len(), 5);
//! # Ok::<(), point_grid::GridError>(())
//! ```
//!
//! # Custom point types
//!
//! Anything implementing [`Positioned`] can be indexed, so the grid hands back
//! references to your own records:
//!
//! ```
//! use point_grid::{Grid, Point3, Positioned};
//!
//! struct Sample {
//!     at: Point3<f64>,
//!     intensity: f32,
//! }
//!
//! impl Positioned for Sample {
//!     fn position(&self) -> Point3<f64> {
//!         self.at
//!     }
//! }
//!
//! let samples = vec![
//!     Sample { at: Point3::new(0.0, 0.0, 0.0), intensity: 0.2 },
//!     Sample { at: Point3::new(3.0, 1.0, 0.0), intensity: 0.9 },
//! ];
//! let grid = Grid::new(&samples)?;
//! let hit = grid.try_nearest(&Point3::new(2.5, 1.0, 0.0))?;
//! assert!((hit.intensity - 0.9).abs() < f32::EPSILON);
//! # Ok::<(), point_grid::GridError>(())
//! ```
//!
//! # Concurrency
//!
//! A built [`Grid`] is immutable. Queries take `&self` and allocate nothing
//! shared, so one grid can serve any number of threads at once.

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod cell;
mod error;
mod grid;
mod params;
mod query;
mod sizing;

// Re-export core types
pub use cell::{Axis, CellCoord, CellRange, CellRangeIter};
pub use error::{GridError, GridResult};
pub use grid::{Grid, GridStats};
pub use params::GridParams;
pub use sizing::Dimensionality;

pub use mesh_types::{Aabb, Positioned};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
