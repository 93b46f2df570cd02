use super::interpolate::fetch;
use crate::padding::PaddingMode;
use trimorph_image::Image;

/// Kernel for bilinear interpolation
///
/// # Arguments
///
/// * `image` - The input image container.
/// * `u` - The x coordinate of the pixel to interpolate.
/// * `v` - The y coordinate of the pixel to interpolate.
/// * `border` - How taps outside the image are resolved.
///
/// # Returns
///
/// The interpolated pixel values.
pub(crate) fn bilinear_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    border: PaddingMode,
) -> [f32; C] {
    let u0 = u.floor();
    let v0 = v.floor();

    let frac_u = u - u0;
    let frac_v = v - v0;

    let iu0 = u0 as isize;
    let iv0 = v0 as isize;

    let taps = [
        (iu0, iv0, (1.0 - frac_u) * (1.0 - frac_v)),
        (iu0 + 1, iv0, frac_u * (1.0 - frac_v)),
        (iu0, iv0 + 1, (1.0 - frac_u) * frac_v),
        (iu0 + 1, iv0 + 1, frac_u * frac_v),
    ];

    let mut pixel = [0.0; C];
    for (x, y, w) in taps {
        // zero weight taps may sit outside a one pixel wide image
        if w == 0.0 {
            continue;
        }
        if let Some(p) = fetch(image, x, y, border) {
            for k in 0..C {
                pixel[k] += p[k] * w;
            }
        }
    }

    pixel
}
