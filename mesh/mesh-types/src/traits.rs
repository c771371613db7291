//! Traits for point types.

use nalgebra::Point3;

/// Trait for types that expose a 3D coordinate.
///
/// Spatial indices only need read access to a point's position, so any point,
/// vertex, or node type can be indexed without being copied into a special
/// container.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, Positioned};
///
/// struct Node {
///     xyz: [f64; 3],
/// }
///
/// impl Positioned for Node {
///     fn position(&self) -> Point3<f64> {
///         Point3::from(self.xyz)
///     }
/// }
///
/// let node = Node { xyz: [1.0, 2.0, 3.0] };
/// assert_eq!(node.position(), Point3::new(1.0, 2.0, 3.0));
/// ```
pub trait Positioned {
    /// The coordinate of this point.
    fn position(&self) -> Point3<f64>;
}

impl Positioned for Point3<f64> {
    #[inline]
    fn position(&self) -> Point3<f64> {
        *self
    }
}

impl Positioned for [f64; 3] {
    #[inline]
    fn position(&self) -> Point3<f64> {
        Point3::from(*self)
    }
}

impl<T: Positioned + ?Sized> Positioned for &T {
    #[inline]
    fn position(&self) -> Point3<f64> {
        (**self).position()
    }
}
