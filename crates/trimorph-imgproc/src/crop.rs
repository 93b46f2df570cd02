use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};
use trimorph_image::{Image, ImageError};

/// Copy the window of `src` whose top left pixel is `(x, y)` into `dst`.
///
/// The window has the size of `dst`. An empty `dst` is a no-op.
///
/// # Errors
///
/// [`ImageError::RegionOutOfBounds`] if the window reaches past the right or
/// bottom edge of `src`.
///
/// # Examples
///
/// ```rust
/// use trimorph_image::{Image, ImageSize};
/// use trimorph_imgproc::crop::crop_image;
///
/// let image = Image::<u8, 1>::new(ImageSize { width: 3, height: 3 }, (0..9).collect()).unwrap();
/// let mut window = Image::<u8, 1>::from_size_val(ImageSize { width: 2, height: 1 }, 0).unwrap();
///
/// crop_image(&image, &mut window, 1, 2).unwrap();
/// assert_eq!(window.as_slice(), &[7, 8]);
/// ```
pub fn crop_image<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    x: usize,
    y: usize,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let (width, height) = (dst.width(), dst.height());

    if x + width > src.width() || y + height > src.height() {
        return Err(ImageError::RegionOutOfBounds(
            x,
            y,
            width,
            height,
            src.width(),
            src.height(),
        ));
    }

    if width == 0 || height == 0 {
        return Ok(());
    }

    let src_stride = src.width() * C;
    let row_len = width * C;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(row_len)
        .enumerate()
        .for_each(|(r, dst_row)| {
            let start = (y + r) * src_stride + x * C;
            dst_row.copy_from_slice(&src_data[start..start + row_len]);
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trimorph_image::ImageSize;

    #[test]
    fn window_of_a_multichannel_image() -> Result<(), ImageError> {
        let image = Image::<u8, 2>::new([3, 3].into(), (0..18).collect())?;
        let mut window = Image::<u8, 2>::from_size_val([2, 2].into(), 0)?;

        crop_image(&image, &mut window, 1, 1)?;

        #[rustfmt::skip]
        assert_eq!(window.as_slice(), &[
            8, 9, 10, 11,
            14, 15, 16, 17,
        ]);
        Ok(())
    }

    #[test]
    fn full_window_is_a_copy() -> Result<(), ImageError> {
        let image = Image::<f32, 1>::new([2, 2].into(), vec![0.5, 1.5, 2.5, 3.5])?;
        let mut window = Image::<f32, 1>::from_size_val(image.size(), 0.0)?;

        crop_image(&image, &mut window, 0, 0)?;
        assert_eq!(window, image);
        Ok(())
    }

    #[test]
    fn window_past_the_border() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val([4, 3].into(), 0)?;
        let mut window = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;

        assert_eq!(
            crop_image(&image, &mut window, 1, 2),
            Err(ImageError::RegionOutOfBounds(1, 2, 2, 2, 4, 3))
        );
        assert!(crop_image(&image, &mut window, 2, 1).is_ok());
        Ok(())
    }
}
