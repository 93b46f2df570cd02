#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Synthesis of canvas border correspondences and crop bounds.
pub mod boundary;

/// Black border detection.
pub mod crop;

/// Error types for the morph module.
pub mod error;

/// The multi frame morph driver.
pub mod morph;

/// Bringing two images onto a common canvas.
pub mod scale;

/// Warping and blending of a single triangle.
pub mod triangle;

pub use crate::boundary::synthesize_boundary_points;
pub use crate::crop::auto_crop_bounds;
pub use crate::error::MorphError;
pub use crate::morph::{
    blend_weights, morph, weighted_average_point, MorphConfig, MorphOutput, MorphStats, Morpher,
};
pub use crate::scale::{normalize_sizes, NormalizedPair};
pub use crate::triangle::morph_triangle;
