//! Cell coordinates and inclusive cell ranges.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Axis {
    /// Axis 0.
    X,
    /// Axis 1.
    Y,
    /// Axis 2.
    Z,
}

impl Axis {
    /// All axes in index order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Index of the axis (0, 1, 2).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Integer coordinate of a grid cell.
///
/// Cell coordinates are always inside the grid: every public operation that
/// produces one clamps it to `[0, cell_count[k] - 1]` per axis.
///
/// # Example
///
/// ```
/// use point_grid::CellCoord;
///
/// let cell = CellCoord::new(1, 2, 0);
/// assert_eq!(cell.as_array(), [1, 2, 0]);
/// assert_eq!(cell.chebyshev_distance(CellCoord::new(3, 2, 1)), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CellCoord {
    /// Cell index along axis 0.
    pub i: usize,
    /// Cell index along axis 1.
    pub j: usize,
    /// Cell index along axis 2.
    pub k: usize,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(i: usize, j: usize, k: usize) -> Self {
        Self { i, j, k }
    }

    /// Returns the coordinate as an array indexed by axis.
    #[must_use]
    pub const fn as_array(self) -> [usize; 3] {
        [self.i, self.j, self.k]
    }

    /// Largest per-axis index difference to `other`.
    #[must_use]
    pub const fn chebyshev_distance(self, other: Self) -> usize {
        let di = self.i.abs_diff(other.i);
        let dj = self.j.abs_diff(other.j);
        let dk = self.k.abs_diff(other.k);
        let m = if di > dj { di } else { dj };
        if m > dk { m } else { dk }
    }
}

impl From<[usize; 3]> for CellCoord {
    fn from([i, j, k]: [usize; 3]) -> Self {
        Self::new(i, j, k)
    }
}

/// Inclusive box of cell coordinates.
///
/// Iterates with the axis-2 index varying fastest, then axis 1, then axis 0.
///
/// # Example
///
/// ```
/// use point_grid::{CellCoord, CellRange};
///
/// let range = CellRange::new(CellCoord::new(0, 0, 0), CellCoord::new(1, 0, 1));
/// let cells: Vec<_> = range.iter().map(CellCoord::as_array).collect();
/// assert_eq!(cells, vec![[0, 0, 0], [0, 0, 1], [1, 0, 0], [1, 0, 1]]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    /// Lower corner (inclusive).
    pub min: CellCoord,
    /// Upper corner (inclusive).
    pub max: CellCoord,
}

impl CellRange {
    /// Creates a range from its inclusive corners.
    ///
    /// The corners are not reordered: a range whose `min` exceeds `max` on any
    /// axis is empty.
    #[must_use]
    pub const fn new(min: CellCoord, max: CellCoord) -> Self {
        Self { min, max }
    }

    /// A range holding no cells.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            min: CellCoord::new(1, 1, 1),
            max: CellCoord::new(0, 0, 0),
        }
    }

    /// Returns `true` if the range contains no cells.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.min.i > self.max.i || self.min.j > self.max.j || self.min.k > self.max.k
    }

    /// Number of cells in the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.max.i - self.min.i + 1)
            .saturating_mul(self.max.j - self.min.j + 1)
            .saturating_mul(self.max.k - self.min.k + 1)
    }

    /// Checks if the range contains a cell.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.i >= self.min.i
            && cell.i <= self.max.i
            && cell.j >= self.min.j
            && cell.j <= self.max.j
            && cell.k >= self.min.k
            && cell.k <= self.max.k
    }

    /// Returns an iterator over all cells in the range.
    #[must_use]
    pub const fn iter(&self) -> CellRangeIter {
        CellRangeIter {
            range: *self,
            current: if self.is_empty() { None } else { Some(self.min) },
        }
    }
}

impl IntoIterator for CellRange {
    type Item = CellCoord;
    type IntoIter = CellRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &CellRange {
    type Item = CellCoord;
    type IntoIter = CellRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over all cells in a [`CellRange`].
#[derive(Debug, Clone)]
pub struct CellRangeIter {
    range: CellRange,
    current: Option<CellCoord>,
}

impl Iterator for CellRangeIter {
    type Item = CellCoord;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;

        let mut next = current;
        if next.k < self.range.max.k {
            next.k += 1;
        } else {
            next.k = self.range.min.k;
            if next.j < self.range.max.j {
                next.j += 1;
            } else {
                next.j = self.range.min.j;
                if next.i < self.range.max.i {
                    next.i += 1;
                } else {
                    self.current = None;
                    return Some(current);
                }
            }
        }
        self.current = Some(next);

        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.current.map_or(0, |c| {
            let r = self.range;
            let nj = r.max.j - r.min.j + 1;
            let nk = r.max.k - r.min.k + 1;
            let rest_k = r.max.k - c.k + 1;
            let rest_j = (r.max.j - c.j).saturating_mul(nk);
            let rest_i = (r.max.i - c.i).saturating_mul(nj).saturating_mul(nk);
            rest_k.saturating_add(rest_j).saturating_add(rest_i)
        });
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIter {}
