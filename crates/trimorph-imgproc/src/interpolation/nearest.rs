use super::interpolate::fetch;
use crate::padding::PaddingMode;
use trimorph_image::Image;

/// Kernel for nearest neighbor interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - How out of range coordinates are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn nearest_neighbor_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    border: PaddingMode,
) -> [f32; C] {
    let mut pixel = [0.0; C];
    if let Some(src) = fetch(image, u.round() as isize, v.round() as isize, border) {
        pixel.copy_from_slice(src);
    }
    pixel
}
