//! Pixel interpolation methods for image transformations.
//!
//! This module provides various interpolation algorithms used when resampling
//! images during geometric transformations like resizing or warping.
//!
//! # Interpolation Modes
//!
//! - **Nearest**: Fastest, uses nearest pixel value (no interpolation)
//! - **Bilinear**: Smooth linear interpolation between adjacent pixels
//! - **Bicubic**: Cubic convolution over a 4x4 neighbourhood
//!
//! Taps that fall outside the image are resolved with a
//! [`PaddingMode`](crate::padding::PaddingMode); `Constant` contributes zero.

mod bicubic;
mod bilinear;

/// Grid generation and coordinate mapping utilities.
///
/// Functions for generating coordinate meshgrids used in image warping
/// and transformation operations.
pub mod grid;

pub(crate) mod interpolate;
mod nearest;

pub use interpolate::{interpolate_pixel, InterpolationMode};
