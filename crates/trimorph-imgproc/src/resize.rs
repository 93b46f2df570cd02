use crate::interpolation::{grid::meshgrid_from_fn, interpolate_pixel, InterpolationMode};
use crate::padding::PaddingMode;
use crate::parallel;
use trimorph_image::{Image, ImageError};

/// Resize an image to the size of `dst`.
///
/// Pixel centres are aligned, i.e. destination pixel `x` samples the source at
/// `(x + 0.5) * src_width / dst_width - 0.5`, and taps beyond the border
/// replicate the edge pixel.
///
/// # Arguments
///
/// * `src` - The input image container.
/// * `dst` - The output image container, its size is the target size.
/// * `interpolation` - The interpolation mode to use.
///
/// # Errors
///
/// Returns an error if either image is empty.
///
/// # Example
///
/// ```
/// use trimorph_image::{Image, ImageSize};
/// use trimorph_imgproc::interpolation::InterpolationMode;
/// use trimorph_imgproc::resize::resize;
///
/// let image = Image::<_, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0f32; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let new_size = ImageSize {
///     width: 2,
///     height: 3,
/// };
///
/// let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0).unwrap();
///
/// resize(&image, &mut image_resized, InterpolationMode::Nearest).unwrap();
///
/// assert_eq!(image_resized.num_channels(), 3);
/// assert_eq!(image_resized.size().width, 2);
/// assert_eq!(image_resized.size().height, 3);
/// ```
pub fn resize<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    interpolation: InterpolationMode,
) -> Result<(), ImageError> {
    if src.size().is_empty() || dst.size().is_empty() {
        return Err(ImageError::InvalidImageSize(
            src.width(),
            src.height(),
            dst.width(),
            dst.height(),
        ));
    }

    // same size is a plain copy
    if src.size() == dst.size() {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let scale_x = src.width() as f32 / dst.width() as f32;
    let scale_y = src.height() as f32 / dst.height() as f32;

    let (map_x, map_y) = meshgrid_from_fn(dst.cols(), dst.rows(), |x, y| {
        (
            (x as f32 + 0.5) * scale_x - 0.5,
            (y as f32 + 0.5) * scale_y - 0.5,
        )
    })?;

    parallel::par_iter_rows_resample(dst, &map_x, &map_y, |&x, &y, dst_pixel| {
        let pixel = interpolate_pixel(src, x, y, interpolation, PaddingMode::Replicate);
        dst_pixel.copy_from_slice(&pixel);
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use trimorph_image::{Image, ImageError, ImageSize};

    use super::*;

    #[test]
    fn resize_smoke_ch3() -> Result<(), ImageError> {
        let image = Image::<_, 3>::new(
            ImageSize {
                width: 4,
                height: 5,
            },
            vec![0f32; 4 * 5 * 3],
        )?;

        let new_size = ImageSize {
            width: 2,
            height: 3,
        };

        let mut image_resized = Image::<_, 3>::from_size_val(new_size, 0.0)?;

        resize(&image, &mut image_resized, InterpolationMode::Bilinear)?;

        assert_eq!(image_resized.num_channels(), 3);
        assert_eq!(image_resized.size(), new_size);

        Ok(())
    }

    #[test]
    fn resize_nearest_upscale_2x() -> Result<(), ImageError> {
        let image = Image::<_, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![1.0f32, 2.0],
        )?;

        let mut image_resized = Image::<_, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 2,
            },
            0.0,
        )?;

        resize(&image, &mut image_resized, InterpolationMode::Nearest)?;

        // sampling positions -0.25, 0.25, 0.75, 1.25 round to 0, 0, 1, 1
        assert_eq!(
            image_resized.as_slice(),
            &[1.0, 1.0, 2.0, 2.0, 1.0, 1.0, 2.0, 2.0]
        );

        Ok(())
    }

    #[test]
    fn resize_constant_image_any_mode() -> Result<(), ImageError> {
        let image = Image::<_, 2>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            7.0f32,
        )?;
        for mode in [
            InterpolationMode::Nearest,
            InterpolationMode::Bilinear,
            InterpolationMode::Bicubic,
        ] {
            let mut image_resized = Image::<_, 2>::from_size_val(
                ImageSize {
                    width: 7,
                    height: 5,
                },
                0.0,
            )?;
            resize(&image, &mut image_resized, mode)?;
            for v in image_resized.as_slice() {
                assert_abs_diff_eq!(*v, 7.0, epsilon = 1e-4);
            }
        }
        Ok(())
    }

    #[test]
    fn resize_empty_is_error() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        )?;
        let mut dst = Image::<f32, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0.0,
        )?;
        assert!(resize(&image, &mut dst, InterpolationMode::Bilinear).is_err());
        Ok(())
    }
}
