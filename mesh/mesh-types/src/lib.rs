//! Core point types for the mesh toolkit.
//!
//! This crate provides the small set of geometric types that spatial indices and
//! mesh algorithms share:
//!
//! - [`Positioned`] - Anything that exposes a 3D coordinate
//! - [`Vertex`] - A mesh node with a position and an optional external id
//! - [`Aabb`] - Axis-aligned bounding box with incremental updates
//!
//! # Layer 0 Crate
//!
//! This crate has no framework dependencies and owns no point storage. Index
//! structures built on top of it borrow caller-owned point slices.
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Aabb, Point3, Positioned, Vertex};
//!
//! let vertices = vec![
//!     Vertex::from_coords(0.0, 0.0, 0.0),
//!     Vertex::from_coords(2.0, 1.0, 0.0),
//! ];
//!
//! let mut aabb = Aabb::empty();
//! for v in &vertices {
//!     aabb.expand_to_include(&v.position());
//! }
//!
//! assert_eq!(aabb.max, Point3::new(2.0, 1.0, 0.0));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod traits;
mod vertex;

// Re-export core types
pub use bounds::Aabb;
pub use traits::Positioned;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
