use trimorph_image::{Image, ImageError};

use crate::interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode};
use crate::padding::PaddingMode;
use crate::parallel;

// Twice the signed triangle area below which three points are treated as collinear.
const SINGULAR_EPS: f64 = 1e-9;

/// The inverse of the row major 2x3 affine matrix `m`.
///
/// # Errors
///
/// [`ImageError::SingularTransform`] if the 2x2 linear part has a zero or non
/// finite determinant.
pub fn invert_affine_transform(m: &[f32; 6]) -> Result<[f32; 6], ImageError> {
    let [a, b, tx, c, d, ty] = *m;

    let det = a * d - b * c;
    if det == 0.0 || !det.is_finite() {
        return Err(ImageError::SingularTransform);
    }

    let (ia, ib) = (d / det, -b / det);
    let (ic, id) = (-c / det, a / det);

    Ok([ia, ib, -(ia * tx + ib * ty), ic, id, -(ic * tx + id * ty)])
}

/// Computes the 2x3 affine transform that maps the three `src` points onto the three `dst` points.
///
/// The system is solved in double precision with Cramer's rule.
///
/// # Errors
///
/// Returns [`ImageError::SingularTransform`] if the `src` points are collinear
/// or coincident.
pub fn get_affine_transform(
    src: &[[f32; 2]; 3],
    dst: &[[f32; 2]; 3],
) -> Result<[f32; 6], ImageError> {
    let [x0, y0] = src[0].map(f64::from);
    let [x1, y1] = src[1].map(f64::from);
    let [x2, y2] = src[2].map(f64::from);

    let det = x0 * (y1 - y2) - y0 * (x1 - x2) + (x1 * y2 - x2 * y1);
    if det.abs() < SINGULAR_EPS || !det.is_finite() {
        return Err(ImageError::SingularTransform);
    }

    // solve [x y 1] * [p q r]^T = t for each output coordinate
    let solve = |t0: f64, t1: f64, t2: f64| -> (f64, f64, f64) {
        let p = t0 * (y1 - y2) - y0 * (t1 - t2) + (t1 * y2 - t2 * y1);
        let q = x0 * (t1 - t2) - t0 * (x1 - x2) + (x1 * t2 - x2 * t1);
        let r = x0 * (y1 * t2 - y2 * t1) - y0 * (x1 * t2 - x2 * t1) + t0 * (x1 * y2 - x2 * y1);
        (p / det, q / det, r / det)
    };

    let [u0, v0] = dst[0].map(f64::from);
    let [u1, v1] = dst[1].map(f64::from);
    let [u2, v2] = dst[2].map(f64::from);

    let (a, b, c) = solve(u0, u1, u2);
    let (d, e, f) = solve(v0, v1, v2);

    Ok([a, b, c, d, e, f].map(|x| x as f32))
}

/// Map the point `(x, y)` through the 2x3 matrix `m`.
pub fn transform_point(x: f32, y: f32, m: &[f32; 6]) -> (f32, f32) {
    (
        m[0] * x + m[1] * y + m[2],
        m[3] * x + m[4] * y + m[5],
    )
}

/// Warp `src` into `dst` with the affine matrix `m` mapping source to
/// destination coordinates.
///
/// Every destination pixel is mapped back into `src` through the inverse of
/// `m` and sampled there with `interpolation`; samples outside `src` are
/// resolved with `border`.
///
/// # Errors
///
/// Returns [`ImageError::SingularTransform`] if `m` is not invertible.
///
/// # Example
///
/// ```
/// use trimorph_image::{Image, ImageSize};
/// use trimorph_imgproc::interpolation::InterpolationMode;
/// use trimorph_imgproc::padding::PaddingMode;
/// use trimorph_imgproc::warp::warp_affine;
///
/// let src = Image::<f32, 1>::new(ImageSize { width: 4, height: 1 }, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(ImageSize { width: 2, height: 1 }, 0.0).unwrap();
///
/// // shift left by two pixels
/// let m = [1.0, 0.0, -2.0, 0.0, 1.0, 0.0];
/// warp_affine(&src, &mut dst, &m, InterpolationMode::Nearest, PaddingMode::Constant).unwrap();
///
/// assert_eq!(dst.as_slice(), &[3.0, 4.0]);
/// ```
pub fn warp_affine<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    m: &[f32; 6],
    interpolation: InterpolationMode,
    border: PaddingMode,
) -> Result<(), ImageError> {
    let m_inv = invert_affine_transform(m)?;

    let (map_x, map_y) = meshgrid_from_fn(dst.cols(), dst.rows(), |x, y| {
        transform_point(x as f32, y as f32, &m_inv)
    })?;

    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |&x, &y, dst_pixel| {
        let pixel = interpolate_pixel(src, x, y, interpolation, border);
        dst_pixel.copy_from_slice(&pixel);
    });

    Ok(())
}
