#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Copying rectangular windows out of an image.
pub mod crop;

/// Rasterization of filled polygons.
pub mod draw;

/// Sampling an image at fractional coordinates.
pub mod interpolation;

/// Out-of-range index handling and canvas padding.
pub mod padding;

/// Row and frame level parallelism on top of rayon.
pub mod parallel;

/// Resampling an image to a new size.
pub mod resize;

/// Affine transforms and warping.
pub mod warp;
