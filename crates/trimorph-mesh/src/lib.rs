#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Bowyer-Watson Delaunay triangulation.
pub mod delaunay;

/// Error types for the mesh module.
pub mod error;

/// Points and axis aligned rectangles.
pub mod geometry;

mod mesh;

pub use crate::delaunay::Delaunay;
pub use crate::error::MeshError;
pub use crate::geometry::{Point2, Rect};
pub use crate::mesh::{triangle_area, triangulate, Triangle};
