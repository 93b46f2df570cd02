use trimorph_image::{Image, ImageError, ImageSize};

/// How indices outside an image are resolved, for padding and for sampling.
///
/// The examples show the samples left of index 0 for a row `a b c d ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaddingMode {
    /// Outside samples take a constant value, zero when sampling.
    ///
    /// `0 0 0 | a b c d`
    Constant,

    /// The edge sample is repeated.
    ///
    /// `a a a | a b c d`
    Replicate,

    /// Mirrored around the edge sample, which is not repeated.
    ///
    /// `d c b | a b c d`
    #[default]
    Reflect101,

    /// Mirrored including the edge sample.
    ///
    /// `c b a | a b c d`
    Reflect,

    /// Periodic continuation from the opposite edge.
    ///
    /// `x y z | a b c d`
    Wrap,
}

impl PaddingMode {
    /// Maps index `i` to a valid index within `[0, len)` according to the padding mode.
    ///
    /// Returns `None` for [`PaddingMode::Constant`] when `i` is out of range, and
    /// for every mode when `len == 0`. The caller is then expected to use the
    /// constant value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use trimorph_imgproc::padding::PaddingMode;
    ///
    /// assert_eq!(PaddingMode::Reflect101.map_index(-1, 5), Some(1));
    /// assert_eq!(PaddingMode::Reflect.map_index(-1, 5), Some(0));
    /// assert_eq!(PaddingMode::Replicate.map_index(7, 5), Some(4));
    /// assert_eq!(PaddingMode::Wrap.map_index(5, 5), Some(0));
    /// assert_eq!(PaddingMode::Constant.map_index(-1, 5), None);
    /// ```
    #[inline]
    pub fn map_index(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if i >= 0 && (i as usize) < len {
            return Some(i as usize);
        }

        let n = len as isize;
        match self {
            PaddingMode::Constant => None,
            PaddingMode::Replicate => Some(i.clamp(0, n - 1) as usize),
            PaddingMode::Wrap => Some(i.rem_euclid(n) as usize),
            PaddingMode::Reflect => {
                let r = i.rem_euclid(2 * n);
                Some(if r < n { r } else { 2 * n - 1 - r } as usize)
            }
            PaddingMode::Reflect101 => {
                if len == 1 {
                    return Some(0);
                }
                let r = i.rem_euclid(2 * n - 2);
                Some(if r < n { r } else { 2 * n - 2 - r } as usize)
            }
        }
    }
}

/// Pixels added on each side of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding2D {
    /// Rows above.
    pub top: usize,
    /// Rows below.
    pub bottom: usize,
    /// Columns to the left.
    pub left: usize,
    /// Columns to the right.
    pub right: usize,
}

impl Padding2D {
    /// Padding that grows `old_size` to `new_size` keeping the content anchored
    /// at the top-left corner.
    ///
    /// Returns `None` if `new_size` is smaller than `old_size` along any axis.
    pub fn anchored_top_left(old_size: ImageSize, new_size: ImageSize) -> Option<Self> {
        Some(Self {
            top: 0,
            left: 0,
            bottom: new_size.height.checked_sub(old_size.height)?,
            right: new_size.width.checked_sub(old_size.width)?,
        })
    }

    /// The size of an image of `size` once padded.
    pub fn padded_size(&self, size: ImageSize) -> ImageSize {
        ImageSize {
            width: size.width + self.left + self.right,
            height: size.height + self.top + self.bottom,
        }
    }
}

/// Pads `src` into `dst` according to `padding` and `padding_mode`.
///
/// Pixels of `dst` that fall outside the source are filled with
/// `constant_value` for [`PaddingMode::Constant`], or with the source pixel
/// selected by [`PaddingMode::map_index`] otherwise.
///
/// # Errors
///
/// Returns an error if the size of `dst` does not match `src` grown by `padding`.
///
/// # Example
///
/// ```rust
/// use trimorph_image::{Image, ImageSize};
/// use trimorph_imgproc::padding::{spatial_padding, Padding2D, PaddingMode};
///
/// let src = Image::<u8, 1>::new(ImageSize { width: 2, height: 1 }, vec![7, 9]).unwrap();
/// let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 3, height: 2 }, 1).unwrap();
///
/// let padding = Padding2D::anchored_top_left(src.size(), dst.size()).unwrap();
/// spatial_padding(&src, &mut dst, padding, PaddingMode::Constant, [0]).unwrap();
///
/// assert_eq!(dst.as_slice(), &[7, 9, 0, 0, 0, 0]);
/// ```
pub fn spatial_padding<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    padding: Padding2D,
    padding_mode: PaddingMode,
    constant_value: [T; C],
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync,
{
    let expected = padding.padded_size(src.size());
    if dst.size() != expected {
        return Err(ImageError::InvalidImageSize(
            dst.width(),
            dst.height(),
            expected.width,
            expected.height,
        ));
    }

    let (src_cols, src_rows) = (src.cols(), src.rows());
    let dst_cols = dst.cols();
    let src_data = src.as_slice();

    for (y, dst_row) in dst.as_slice_mut().chunks_exact_mut(dst_cols * C).enumerate() {
        let sy = padding_mode.map_index(y as isize - padding.top as isize, src_rows);
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            let sx = padding_mode.map_index(x as isize - padding.left as isize, src_cols);
            match (sx, sy) {
                (Some(sx), Some(sy)) => {
                    let offset = (sy * src_cols + sx) * C;
                    dst_pixel.copy_from_slice(&src_data[offset..offset + C]);
                }
                _ => dst_pixel.copy_from_slice(&constant_value),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_index_reflect101_len5() {
        let mode = PaddingMode::Reflect101;
        let cases = [(-4, 4), (-3, 3), (-1, 1), (0, 0), (4, 4), (5, 3), (6, 2), (8, 0)];
        for (i, expected) in cases {
            assert_eq!(mode.map_index(i, 5), Some(expected), "index {i}");
        }
        for i in -3..=3 {
            assert_eq!(mode.map_index(i, 1), Some(0));
        }
    }

    #[test]
    fn map_index_reflect_and_wrap() {
        assert_eq!(PaddingMode::Reflect.map_index(-2, 4), Some(1));
        assert_eq!(PaddingMode::Reflect.map_index(4, 4), Some(3));
        assert_eq!(PaddingMode::Reflect.map_index(9, 4), Some(1));
        assert_eq!(PaddingMode::Wrap.map_index(-1, 4), Some(3));
        assert_eq!(PaddingMode::Wrap.map_index(9, 4), Some(1));
        assert_eq!(PaddingMode::Replicate.map_index(-9, 4), Some(0));
        assert_eq!(PaddingMode::Replicate.map_index(0, 0), None);
    }

    #[test]
    fn anchored_padding() {
        let old = ImageSize {
            width: 2,
            height: 3,
        };
        let new = ImageSize {
            width: 5,
            height: 3,
        };
        let padding = Padding2D::anchored_top_left(old, new);
        assert_eq!(
            padding,
            Some(Padding2D {
                top: 0,
                bottom: 0,
                left: 0,
                right: 3
            })
        );
        assert_eq!(Padding2D::anchored_top_left(new, old), None);
    }

    #[rustfmt::skip]
    #[test]
    fn spatial_padding_constant_top_left() -> Result<(), ImageError> {
        let src = Image::<u8, 2>::new(
            ImageSize { width: 1, height: 2 },
            vec![1, 2, 3, 4],
        )?;
        let mut dst = Image::<u8, 2>::from_size_val(ImageSize { width: 2, height: 3 }, 9)?;
        let padding = Padding2D::anchored_top_left(src.size(), dst.size())
            .ok_or(ImageError::InvalidImageSize(1, 2, 2, 3))?;

        spatial_padding(&src, &mut dst, padding, PaddingMode::Constant, [0, 0])?;

        assert_eq!(
            dst.as_slice(),
            &[
                1, 2, 0, 0,
                3, 4, 0, 0,
                0, 0, 0, 0,
            ]
        );
        Ok(())
    }

    #[rustfmt::skip]
    #[test]
    fn spatial_padding_reflect101() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3])?;
        let mut dst = Image::<u8, 1>::from_size_val(ImageSize { width: 7, height: 1 }, 0)?;
        let padding = Padding2D { top: 0, bottom: 0, left: 2, right: 2 };

        spatial_padding(&src, &mut dst, padding, PaddingMode::Reflect101, [0])?;

        assert_eq!(dst.as_slice(), &[3, 2, 1, 2, 3, 2, 1]);
        Ok(())
    }

    #[test]
    fn spatial_padding_size_mismatch() -> Result<(), ImageError> {
        let src = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            0,
        )?;
        let mut dst = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0,
        )?;
        let res = spatial_padding(
            &src,
            &mut dst,
            Padding2D::default(),
            PaddingMode::Constant,
            [0],
        );
        assert!(res.is_err());
        Ok(())
    }
}
