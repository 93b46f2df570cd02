use trimorph_image::{Image, ImageError, ImageSize};
use trimorph_imgproc::{
    crop::crop_image,
    draw::fill_convex_poly,
    interpolation::InterpolationMode,
    padding::PaddingMode,
    warp::{get_affine_transform, warp_affine},
};
use trimorph_mesh::{triangle_area, Point2, Rect};

// Triangles below this area cover no pixel reliably and have no stable affine solve.
const MIN_TRIANGLE_AREA: f32 = 1e-6;

/// Warp a triangle of each source image onto a target triangle and blend it into `dst`.
///
/// The bounding rectangle of every triangle is extracted, the source patches
/// are warped onto the target patch with the affine transforms defined by the
/// triangle vertices, blended as `(1 - alpha) * warp1 + alpha * warp2` and
/// composited into `dst` through a mask of the target triangle:
/// `dst = dst * (1 - mask) + patch * mask`. Pixels on the triangle edges are
/// part of the mask.
///
/// # Arguments
///
/// * `image1` - The first source image.
/// * `image2` - The second source image.
/// * `dst` - The frame to composite into.
/// * `t1` - The triangle in `image1`.
/// * `t2` - The triangle in `image2`.
/// * `t` - The target triangle in `dst`.
/// * `alpha` - The blend weight of `image2`.
/// * `interpolation` - The interpolation used to sample the source patches.
/// * `border` - The border handling for samples outside the source patches.
///
/// # Returns
///
/// `true` if the triangle was composited, `false` if it was skipped because
/// one of the triangles is degenerate or lies outside its image. A skipped
/// triangle leaves `dst` untouched.
///
/// # Example
///
/// ```
/// use trimorph_image::{Image, ImageSize};
/// use trimorph_imgproc::{interpolation::InterpolationMode, padding::PaddingMode};
/// use trimorph_mesh::Point2;
/// use trimorph_morph::morph_triangle;
///
/// let size = ImageSize { width: 4, height: 4 };
/// let image1 = Image::<f32, 1>::from_size_val(size, 10.0).unwrap();
/// let image2 = Image::<f32, 1>::from_size_val(size, 20.0).unwrap();
/// let mut dst = Image::<f32, 1>::from_size_val(size, 0.0).unwrap();
///
/// let t = [Point2::new(0.0, 0.0), Point2::new(3.0, 0.0), Point2::new(0.0, 3.0)];
/// let composited = morph_triangle(
///     &image1, &image2, &mut dst, &t, &t, &t, 0.5,
///     InterpolationMode::Bilinear, PaddingMode::Reflect101,
/// ).unwrap();
///
/// assert!(composited);
/// assert_eq!(dst.get_pixel(0, 0).unwrap(), &[15.0]);
/// assert_eq!(dst.get_pixel(3, 3).unwrap(), &[0.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn morph_triangle<const C: usize>(
    image1: &Image<f32, C>,
    image2: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    t1: &[Point2; 3],
    t2: &[Point2; 3],
    t: &[Point2; 3],
    alpha: f32,
    interpolation: InterpolationMode,
    border: PaddingMode,
) -> Result<bool, ImageError> {
    if [t1, t2, t].iter().any(|tri| {
        let area = triangle_area(tri);
        area.is_nan() || area < MIN_TRIANGLE_AREA
    }) {
        return Ok(false);
    }

    let Some(rect) = Rect::bounding(t) else {
        return Ok(false);
    };
    let (Some((patch1, local1)), Some((patch2, local2))) =
        (source_patch(image1, t1)?, source_patch(image2, t2)?)
    else {
        return Ok(false);
    };
    let local = to_local(t, &rect);

    let (m1, m2) = match (
        get_affine_transform(&local1, &local),
        get_affine_transform(&local2, &local),
    ) {
        (Ok(m1), Ok(m2)) => (m1, m2),
        (Err(ImageError::SingularTransform), _) | (_, Err(ImageError::SingularTransform)) => {
            return Ok(false)
        }
        (Err(e), _) | (_, Err(e)) => return Err(e),
    };

    let patch_size = ImageSize {
        width: rect.width,
        height: rect.height,
    };

    let mut warp1 = Image::from_size_val(patch_size, 0.0)?;
    let mut warp2 = Image::from_size_val(patch_size, 0.0)?;
    match (
        warp_affine(&patch1, &mut warp1, &m1, interpolation, border),
        warp_affine(&patch2, &mut warp2, &m2, interpolation, border),
    ) {
        (Ok(()), Ok(())) => {}
        (Err(ImageError::SingularTransform), _) | (_, Err(ImageError::SingularTransform)) => {
            return Ok(false)
        }
        (Err(e), _) | (_, Err(e)) => return Err(e),
    }

    let mut mask = Image::<f32, 1>::from_size_val(patch_size, 0.0)?;
    fill_convex_poly(&mut mask, &local, [1.0]);

    composite(dst, &rect, &warp1, &warp2, &mask, alpha);

    Ok(true)
}

// Vertices of `tri` relative to the top left corner of `rect`.
fn to_local(tri: &[Point2; 3], rect: &Rect) -> [[f32; 2]; 3] {
    tri.map(|p| [p.x - rect.x as f32, p.y - rect.y as f32])
}

// The part of `image` under the bounding rectangle of `tri`, with `tri` in patch coordinates.
fn source_patch<const C: usize>(
    image: &Image<f32, C>,
    tri: &[Point2; 3],
) -> Result<Option<(Image<f32, C>, [[f32; 2]; 3])>, ImageError> {
    let bounds = Rect::new(0, 0, image.width(), image.height());
    let Some(rect) = Rect::bounding(tri).and_then(|r| r.intersection(&bounds)) else {
        return Ok(None);
    };

    let mut patch = Image::from_size_val(
        ImageSize {
            width: rect.width,
            height: rect.height,
        },
        0.0,
    )?;
    crop_image(image, &mut patch, rect.x as usize, rect.y as usize)?;

    Ok(Some((patch, to_local(tri, &rect))))
}

// Blend the warped patches and write them into `dst` where the mask is set.
fn composite<const C: usize>(
    dst: &mut Image<f32, C>,
    rect: &Rect,
    warp1: &Image<f32, C>,
    warp2: &Image<f32, C>,
    mask: &Image<f32, 1>,
    alpha: f32,
) {
    let (dst_cols, dst_rows) = (dst.cols() as isize, dst.rows() as isize);
    let patch_cols = rect.width;
    let dst_data = dst.as_slice_mut();

    for ly in 0..rect.height {
        let gy = rect.y + ly as isize;
        if gy < 0 || gy >= dst_rows {
            continue;
        }
        for lx in 0..patch_cols {
            let gx = rect.x + lx as isize;
            if gx < 0 || gx >= dst_cols {
                continue;
            }

            let local = ly * patch_cols + lx;
            let m = mask.as_slice()[local];
            if m == 0.0 {
                continue;
            }

            let src = local * C;
            let offset = (gy as usize * dst_cols as usize + gx as usize) * C;
            let w1 = &warp1.as_slice()[src..src + C];
            let w2 = &warp2.as_slice()[src..src + C];
            for (c, d) in dst_data[offset..offset + C].iter_mut().enumerate() {
                let blended = (1.0 - alpha) * w1[c] + alpha * w2[c];
                *d = *d * (1.0 - m) + blended * m;
            }
        }
    }
}
