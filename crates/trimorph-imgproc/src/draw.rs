use trimorph_image::Image;

// Tolerance on the edge functions so that pixels lying exactly on a shared
// edge are filled by both neighbouring polygons.
const EDGE_EPS: f32 = 1e-4;

/// Helper function to set a pixel's color, handling bounds checking.
#[inline]
fn set_pixel<T: Copy, const C: usize>(img: &mut Image<T, C>, x: i64, y: i64, color: &[T; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[start..start + C].copy_from_slice(color);
    }
}

/// Returns whether the point `(px, py)` lies inside or on the border of the
/// convex polygon `points` (any winding order).
fn inside_convex(points: &[[f32; 2]], px: f32, py: f32) -> bool {
    let mut has_pos = false;
    let mut has_neg = false;
    for (i, a) in points.iter().enumerate() {
        let b = &points[(i + 1) % points.len()];
        let cross = (b[0] - a[0]) * (py - a[1]) - (b[1] - a[1]) * (px - a[0]);
        if cross > EDGE_EPS {
            has_pos = true;
        } else if cross < -EDGE_EPS {
            has_neg = true;
        }
        if has_pos && has_neg {
            return false;
        }
    }
    true
}

/// Fills a convex polygon on an image inplace.
///
/// A pixel `(x, y)` is filled when its integer coordinate lies inside the
/// polygon or on its border, so two polygons sharing an edge both cover the
/// pixels on that edge.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `points` - The polygon vertices as `[x, y]`, in either winding order.
/// * `color` - The fill color as an array of `C` elements.
///
/// # Example
///
/// ```
/// use trimorph_image::{Image, ImageSize};
/// use trimorph_imgproc::draw::fill_convex_poly;
///
/// let mut mask = Image::<f32, 1>::from_size_val(ImageSize { width: 3, height: 3 }, 0.0).unwrap();
/// fill_convex_poly(&mut mask, &[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0]], [1.0]);
///
/// assert_eq!(mask.as_slice(), &[1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0]);
/// ```
pub fn fill_convex_poly<T: Copy, const C: usize>(
    img: &mut Image<T, C>,
    points: &[[f32; 2]],
    color: [T; C],
) {
    if points.len() < 3 || img.cols() == 0 || img.rows() == 0 {
        return;
    }

    let (mut x_min, mut y_min) = (f32::INFINITY, f32::INFINITY);
    let (mut x_max, mut y_max) = (f32::NEG_INFINITY, f32::NEG_INFINITY);
    for p in points {
        x_min = x_min.min(p[0]);
        y_min = y_min.min(p[1]);
        x_max = x_max.max(p[0]);
        y_max = y_max.max(p[1]);
    }
    if !(x_min.is_finite() && y_min.is_finite() && x_max.is_finite() && y_max.is_finite()) {
        return;
    }

    // clamp the scan window to the image bounds
    let x_start = (x_min - EDGE_EPS).ceil().max(0.0) as i64;
    let y_start = (y_min - EDGE_EPS).ceil().max(0.0) as i64;
    let x_end = ((x_max + EDGE_EPS).floor() as i64).min(img.cols() as i64 - 1);
    let y_end = ((y_max + EDGE_EPS).floor() as i64).min(img.rows() as i64 - 1);

    for y in y_start..=y_end {
        for x in x_start..=x_end {
            if inside_convex(points, x as f32, y as f32) {
                set_pixel(img, x, y, &color);
            }
        }
    }
}
