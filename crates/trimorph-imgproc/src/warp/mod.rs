//! Geometric image transformations using affine warps.
//!
//! This module provides functions for applying 2D affine transformations to images:
//!
//! - Estimating the affine transform from three point correspondences
//! - Affine transform inversion
//! - Warping an image through an affine transform
//!
//! # Examples
//!
//! Mapping one triangle onto another:
//!
//! ```
//! use trimorph_imgproc::warp::get_affine_transform;
//!
//! let src = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
//! let dst = [[2.0, 3.0], [4.0, 3.0], [2.0, 5.0]];
//! let m = get_affine_transform(&src, &dst).unwrap();
//! assert_eq!(m, [2.0, 0.0, 2.0, 0.0, 2.0, 3.0]);
//! ```

mod affine;

pub use affine::{get_affine_transform, invert_affine_transform, transform_point, warp_affine};
