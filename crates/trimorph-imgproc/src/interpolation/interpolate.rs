use super::bicubic::bicubic_interpolation;
use super::bilinear::bilinear_interpolation;
use super::nearest::nearest_neighbor_interpolation;
use crate::padding::PaddingMode;
use trimorph_image::Image;

/// Interpolation mode for the resize and warp operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationMode {
    /// Bilinear interpolation
    #[default]
    Bilinear,
    /// Nearest neighbor interpolation
    Nearest,
    /// Bicubic interpolation
    Bicubic,
}

/// Kernel for interpolating a pixel value
///
/// # Arguments
///
/// * `image` - The input image container with shape (height, width, C).
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `interpolation` - The interpolation mode to use.
/// * `border` - How taps outside the image are resolved.
///
/// # Returns
///
/// The interpolated pixel values for every channel.
pub fn interpolate_pixel<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    interpolation: InterpolationMode,
    border: PaddingMode,
) -> [f32; C] {
    match interpolation {
        InterpolationMode::Bilinear => bilinear_interpolation(image, u, v, border),
        InterpolationMode::Nearest => nearest_neighbor_interpolation(image, u, v, border),
        InterpolationMode::Bicubic => bicubic_interpolation(image, u, v, border),
    }
}

/// Fetch the pixel at integer coordinates, resolving out of range taps with `border`.
#[inline]
pub(crate) fn fetch<const C: usize>(
    image: &Image<f32, C>,
    x: isize,
    y: isize,
    border: PaddingMode,
) -> Option<&[f32]> {
    let ix = border.map_index(x, image.cols())?;
    let iy = border.map_index(y, image.rows())?;
    let base = (iy * image.cols() + ix) * C;
    image.as_slice().get(base..base + C)
}
