//! Vertex type.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Positioned;

/// A mesh node: a position plus an optional id assigned by the owning mesh.
///
/// The id is carried through spatial queries untouched, which lets callers map
/// a query hit back to their own numbering after reordering or filtering.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Positioned, Vertex};
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0).with_id(7);
/// assert_eq!(v.position(), Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(v.id, Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// Position in 3D space.
    pub position: Point3<f64>,
    /// Id in the owning mesh, if any.
    pub id: Option<u64>,
}

impl Vertex {
    /// Create a vertex at a position, without an id.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self { position, id: None }
    }

    /// Create a vertex from coordinates.
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Attach an id.
    #[inline]
    #[must_use]
    pub const fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

impl Positioned for Vertex {
    #[inline]
    fn position(&self) -> Point3<f64> {
        self.position
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}
