use trimorph_image::{Image, ImageError, ImageSize};
use trimorph_imgproc::{
    interpolation::InterpolationMode,
    padding::{spatial_padding, Padding2D, PaddingMode},
    resize::resize,
};
use trimorph_mesh::Point2;

/// Two images and their point sets expressed on one common canvas.
#[derive(Debug, Clone)]
pub struct NormalizedPair<const C: usize> {
    /// The first image, sized to the canvas.
    pub image1: Image<f32, C>,
    /// The second image, sized to the canvas.
    pub image2: Image<f32, C>,
    /// The points of the first image in canvas coordinates.
    pub points1: Vec<Point2>,
    /// The points of the second image in canvas coordinates.
    pub points2: Vec<Point2>,
}

impl<const C: usize> NormalizedPair<C> {
    /// The size of the common canvas.
    pub fn canvas_size(&self) -> ImageSize {
        self.image1.size()
    }
}

/// Bring two images and their point sets onto one common canvas.
///
/// The smaller image is upscaled, never the larger one downscaled:
///
/// * Equal sizes are passed through unchanged.
/// * When one image is at least as large as the other along both axes, the
///   smaller one is resized by the smaller of the two per axis ratios, its
///   points are scaled by the same factor and it is zero padded at the bottom
///   and right to the size of the larger image.
/// * When neither image contains the other, both are zero padded to the
///   per axis maximum size without rescaling and the points are left as they
///   are. Correspondences are not reconciled on this path.
///
/// # Arguments
///
/// * `image1` - The first image.
/// * `image2` - The second image.
/// * `points1` - The points of the first image.
/// * `points2` - The points of the second image.
/// * `interpolation` - The interpolation used when upscaling.
///
/// # Errors
///
/// Returns an error if one of the images is empty.
pub fn normalize_sizes<const C: usize>(
    image1: &Image<f32, C>,
    image2: &Image<f32, C>,
    points1: &[Point2],
    points2: &[Point2],
    interpolation: InterpolationMode,
) -> Result<NormalizedPair<C>, ImageError> {
    let (size1, size2) = (image1.size(), image2.size());
    if size1.is_empty() || size2.is_empty() {
        return Err(ImageError::InvalidImageSize(
            size1.width,
            size1.height,
            size2.width,
            size2.height,
        ));
    }

    if size1 == size2 {
        return Ok(NormalizedPair {
            image1: image1.clone(),
            image2: image2.clone(),
            points1: points1.to_vec(),
            points2: points2.to_vec(),
        });
    }

    let first_contains_second = size1.width >= size2.width && size1.height >= size2.height;
    let second_contains_first = size1.width <= size2.width && size1.height <= size2.height;

    let pair = if first_contains_second {
        log::debug!("Upscaling the second image from {} onto {}", size2, size1);
        let (image2, points2) = upscale_onto(image2, points2, size1, interpolation)?;
        NormalizedPair {
            image1: image1.clone(),
            image2,
            points1: points1.to_vec(),
            points2,
        }
    } else if second_contains_first {
        log::debug!("Upscaling the first image from {} onto {}", size1, size2);
        let (image1, points1) = upscale_onto(image1, points1, size2, interpolation)?;
        NormalizedPair {
            image1,
            image2: image2.clone(),
            points1,
            points2: points2.to_vec(),
        }
    } else {
        let canvas = ImageSize {
            width: size1.width.max(size2.width),
            height: size1.height.max(size2.height),
        };
        log::warn!(
            "Image sizes {} and {} have different aspect relations, padding both to {} without rescaling",
            size1,
            size2,
            canvas
        );
        NormalizedPair {
            image1: pad_to_canvas(image1, canvas)?,
            image2: pad_to_canvas(image2, canvas)?,
            points1: points1.to_vec(),
            points2: points2.to_vec(),
        }
    };

    Ok(pair)
}

// Resize `image` by the largest factor that keeps it inside `canvas`, then pad it to `canvas`.
fn upscale_onto<const C: usize>(
    image: &Image<f32, C>,
    points: &[Point2],
    canvas: ImageSize,
    interpolation: InterpolationMode,
) -> Result<(Image<f32, C>, Vec<Point2>), ImageError> {
    let factor = f64::min(
        canvas.width as f64 / image.width() as f64,
        canvas.height as f64 / image.height() as f64,
    );

    let scaled_size = ImageSize {
        width: ((image.width() as f64 * factor).round() as usize).clamp(1, canvas.width),
        height: ((image.height() as f64 * factor).round() as usize).clamp(1, canvas.height),
    };

    let mut scaled = Image::from_size_val(scaled_size, 0.0)?;
    resize(image, &mut scaled, interpolation)?;

    let points = points.iter().map(|p| p.scale(factor as f32)).collect();

    Ok((pad_to_canvas(&scaled, canvas)?, points))
}

// Zero pad `image` at the bottom and right up to `canvas`.
fn pad_to_canvas<const C: usize>(
    image: &Image<f32, C>,
    canvas: ImageSize,
) -> Result<Image<f32, C>, ImageError> {
    if image.size() == canvas {
        return Ok(image.clone());
    }

    let padding = Padding2D::anchored_top_left(image.size(), canvas).ok_or(
        ImageError::InvalidImageSize(image.width(), image.height(), canvas.width, canvas.height),
    )?;

    let mut padded = Image::from_size_val(canvas, 0.0)?;
    spatial_padding(image, &mut padded, padding, PaddingMode::Constant, [0.0; C])?;

    Ok(padded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn constant(width: usize, height: usize, value: f32) -> Result<Image<f32, 3>, ImageError> {
        Image::from_size_val(ImageSize { width, height }, value)
    }

    #[test]
    fn equal_sizes_pass_through() -> Result<(), ImageError> {
        let image1 = Image::<f32, 1>::new([2, 2].into(), vec![1.0, 2.0, 3.0, 4.0])?;
        let image2 = Image::<f32, 1>::new([2, 2].into(), vec![5.0, 6.0, 7.0, 8.0])?;
        let points1 = [Point2::new(0.5, 1.5)];
        let points2 = [Point2::new(1.0, 0.0)];

        let pair = normalize_sizes(
            &image1,
            &image2,
            &points1,
            &points2,
            InterpolationMode::Bicubic,
        )?;

        assert_eq!(pair.image1, image1);
        assert_eq!(pair.image2, image2);
        assert_eq!(pair.points1, points1);
        assert_eq!(pair.points2, points2);
        Ok(())
    }

    #[test]
    fn upscales_the_second_image() -> Result<(), ImageError> {
        let image1 = constant(8, 6, 0.25)?;
        let image2 = constant(4, 4, 1.0)?;

        let pair = normalize_sizes(
            &image1,
            &image2,
            &[Point2::new(1.0, 1.0)],
            &[Point2::new(2.0, 4.0)],
            InterpolationMode::Bicubic,
        )?;

        assert_eq!(pair.canvas_size(), ImageSize { width: 8, height: 6 });
        assert_eq!(pair.image1, image1);
        assert_eq!(pair.image2.size(), image1.size());
        assert_eq!(pair.points1, vec![Point2::new(1.0, 1.0)]);
        assert_relative_eq!(pair.points2[0].x, 3.0);
        assert_relative_eq!(pair.points2[0].y, 6.0);

        // the 6x6 upscaled content sits at the top left, the rest is zero
        for y in 0..6 {
            for x in 0..8 {
                let expected = if x < 6 { 1.0 } else { 0.0 };
                let pixel = pair.image2.get_pixel(x, y)?;
                for v in pixel {
                    assert_relative_eq!(*v, expected, epsilon = 1e-5);
                }
            }
        }
        Ok(())
    }

    #[test]
    fn upscales_the_first_image() -> Result<(), ImageError> {
        let image1 = constant(3, 5, 1.0)?;
        let image2 = constant(9, 10, 0.5)?;

        let pair = normalize_sizes(
            &image1,
            &image2,
            &[Point2::new(2.0, 4.0)],
            &[Point2::new(1.0, 1.0)],
            InterpolationMode::Bilinear,
        )?;

        // min(9 / 3, 10 / 5) = 2
        assert_eq!(pair.canvas_size(), image2.size());
        assert_eq!(pair.points1, vec![Point2::new(4.0, 8.0)]);
        assert_eq!(pair.points2, vec![Point2::new(1.0, 1.0)]);
        assert_relative_eq!(pair.image1.get_pixel(5, 9)?[0], 1.0, epsilon = 1e-5);
        assert_eq!(pair.image1.get_pixel(6, 0)?, &[0.0; 3]);
        assert_eq!(pair.image2, image2);
        Ok(())
    }

    #[test]
    fn mixed_relation_pads_both() -> Result<(), ImageError> {
        let image1 = constant(6, 3, 1.0)?;
        let image2 = constant(3, 6, 2.0)?;
        let points1 = [Point2::new(5.0, 2.0)];
        let points2 = [Point2::new(2.0, 5.0)];

        let pair = normalize_sizes(
            &image1,
            &image2,
            &points1,
            &points2,
            InterpolationMode::Bicubic,
        )?;

        assert_eq!(pair.canvas_size(), ImageSize { width: 6, height: 6 });
        assert_eq!(pair.image2.size(), ImageSize { width: 6, height: 6 });
        assert_eq!(pair.points1, points1);
        assert_eq!(pair.points2, points2);
        assert_eq!(pair.image1.get_pixel(5, 2)?, &[1.0; 3]);
        assert_eq!(pair.image1.get_pixel(5, 3)?, &[0.0; 3]);
        assert_eq!(pair.image2.get_pixel(2, 5)?, &[2.0; 3]);
        assert_eq!(pair.image2.get_pixel(3, 5)?, &[0.0; 3]);
        Ok(())
    }

    #[test]
    fn empty_image_is_rejected() -> Result<(), ImageError> {
        let image1 = constant(0, 3, 1.0)?;
        let image2 = constant(3, 3, 1.0)?;
        let res = normalize_sizes(&image1, &image2, &[], &[], InterpolationMode::Bicubic);
        assert!(res.is_err());
        Ok(())
    }
}
