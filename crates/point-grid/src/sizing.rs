//! Dimensionality detection and cell-count sizing.
//!
//! The grid picks its cell counts so that cells stay roughly cubical (or square,
//! or evenly spaced along a line) whatever the aspect ratio of the cloud, while
//! the average bucket holds at most `max_points_per_cell` points.

// Cell counts are small positive integers derived from f64 formulas.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use mesh_types::Aabb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::Axis;
use crate::error::{GridError, GridResult};

/// How many axes of a point cloud have non-zero extent.
///
/// Chosen once from the raw bounding box when the grid is built. Degenerate
/// axes always get a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dimensionality {
    /// Every axis is degenerate: no points, or all points coincide.
    Coincident,
    /// Only the given axis has extent (points lie on a line parallel to it).
    Collinear(Axis),
    /// Exactly one axis is degenerate (points lie in a plane normal to it).
    Planar {
        /// The degenerate axis.
        normal: Axis,
    },
    /// All three axes have extent.
    Volumetric,
}

impl Dimensionality {
    /// Classifies a bounding box by which of its axes have zero extent.
    ///
    /// An axis is degenerate when its extent is within `f64::EPSILON` of zero,
    /// relative to the magnitude of its coordinates (and absolutely, for
    /// coordinates below 1). An empty box is [`Dimensionality::Coincident`].
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    /// use point_grid::{Axis, Dimensionality};
    ///
    /// let flat = Aabb::new(Point3::new(0.0, 0.0, 2.0), Point3::new(4.0, 1.0, 2.0));
    /// assert_eq!(Dimensionality::of(&flat), Dimensionality::Planar { normal: Axis::Z });
    /// ```
    #[must_use]
    pub fn of(bounds: &Aabb) -> Self {
        if bounds.is_empty() {
            return Self::Coincident;
        }
        let flat = Axis::ALL.map(|axis| is_degenerate(bounds, axis));
        match flat {
            [true, true, true] => Self::Coincident,
            [false, true, true] => Self::Collinear(Axis::X),
            [true, false, true] => Self::Collinear(Axis::Y),
            [true, true, false] => Self::Collinear(Axis::Z),
            [true, false, false] => Self::Planar { normal: Axis::X },
            [false, true, false] => Self::Planar { normal: Axis::Y },
            [false, false, true] => Self::Planar { normal: Axis::Z },
            [false, false, false] => Self::Volumetric,
        }
    }

    /// Whether cells are laid out along `axis` (i.e. it is not degenerate).
    #[must_use]
    pub const fn spans(self, axis: Axis) -> bool {
        match self {
            Self::Coincident => false,
            Self::Collinear(a) => a.index() == axis.index(),
            Self::Planar { normal } => normal.index() != axis.index(),
            Self::Volumetric => true,
        }
    }

    /// Number of non-degenerate axes (0 to 3).
    #[must_use]
    pub const fn rank(self) -> usize {
        match self {
            Self::Coincident => 0,
            Self::Collinear(_) => 1,
            Self::Planar { .. } => 2,
            Self::Volumetric => 3,
        }
    }
}

fn is_degenerate(bounds: &Aabb, axis: Axis) -> bool {
    let k = axis.index();
    let (lo, hi) = (bounds.min[k], bounds.max[k]);
    let scale = lo.abs().max(hi.abs()).max(1.0);
    hi - lo <= f64::EPSILON * scale
}

/// Raises the upper corner of every spanned axis so the largest coordinate
/// falls strictly inside the last cell. Degenerate axes are left untouched.
pub(crate) fn inflate(raw: &Aabb, dims: Dimensionality, inflation: f64) -> Aabb {
    let mut max = raw.max;
    for axis in Axis::ALL {
        if !dims.spans(axis) {
            continue;
        }
        let k = axis.index();
        let extent = raw.max[k] - raw.min[k];
        max[k] += inflation * raw.max[k].abs().max(extent);
    }
    Aabb { min: raw.min, max }
}

/// Cell counts per axis for `n_points` points spread over `extent`.
///
/// With the first spanned axis `a` as anchor, `t = max_points_per_cell` and
/// `e` the extents:
///
/// - one axis: `c[a] = ceil(n / t)`
/// - two axes: `c[a] = ceil(sqrt(n * e[a] / (t * e[b])))`
/// - three axes: `c[a] = ceil(cbrt(n * e[a]^2 / (t * e[b] * e[c])))`
///
/// and `c[k] = ceil(c[a] * e[k] / e[a])` for the others, scaled from the
/// rounded anchor count.
///
/// If the anchor itself would get less than one cell, rounding it up to one
/// would inflate every other axis by `e[k] / e[a]`, without bound for a very
/// thin slab. In that case the anchor is pinned to a single cell and the
/// remaining axes are solved again without it.
///
/// Every count is at least 1. Fails only if the total number of cells
/// overflows `usize`.
pub(crate) fn cell_counts(
    dims: Dimensionality,
    extent: [f64; 3],
    n_points: usize,
    max_points_per_cell: usize,
) -> GridResult<[usize; 3]> {
    let target_cells = n_points as f64 / max_points_per_cell as f64;
    let mut active = Axis::ALL.map(|axis| dims.spans(axis));
    let mut counts = [1usize; 3];

    loop {
        let axes: Vec<usize> = (0..3).filter(|&k| active[k]).collect();
        let Some(&anchor) = axes.first() else {
            break;
        };

        // Ratios first, so equal extents cancel exactly.
        let ratio: f64 = axes[1..]
            .iter()
            .map(|&k| extent[anchor] / extent[k])
            .product();
        let anchor_cells = match axes.len() {
            1 => target_cells,
            2 => (target_cells * ratio).sqrt(),
            _ => (target_cells * ratio).cbrt(),
        };

        if axes.len() > 1 && anchor_cells < 1.0 {
            active[anchor] = false;
            continue;
        }

        let anchor_count = to_count(anchor_cells);
        counts[anchor] = anchor_count;
        for &k in &axes[1..] {
            counts[k] = to_count(anchor_count as f64 * extent[k] / extent[anchor]);
        }
        break;
    }

    counts[0]
        .checked_mul(counts[1])
        .and_then(|plane| plane.checked_mul(counts[2]))
        .map(|_| counts)
        .ok_or(GridError::TooManyCells { requested: counts })
}

/// `ceil(x)` as a cell count, never below 1. `NaN` maps to 1.
fn to_count(x: f64) -> usize {
    if x >= 1.0 { x.ceil() as usize } else { 1 }
}
