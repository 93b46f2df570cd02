use std::sync::atomic::{AtomicBool, Ordering};

use trimorph_image::{Image, ImageDtype, ImageSize};
use trimorph_imgproc::{
    crop::crop_image,
    interpolation::InterpolationMode,
    padding::PaddingMode,
    parallel::{try_map_indexed, ExecutionStrategy},
};
use trimorph_mesh::{triangulate, Point2, Rect, Triangle};

use crate::{
    boundary::synthesize_boundary_points,
    error::MorphError,
    scale::{normalize_sizes, NormalizedPair},
    triangle::morph_triangle,
};

/// Parameters of a morph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MorphConfig {
    /// Weight of the second point set in the mesh, in `[0, 1]`.
    ///
    /// The mesh is built once from this weight and stays fixed for every
    /// frame; only the color blend changes from frame to frame.
    pub alpha: f32,
    /// Number of frames to produce, at least one.
    pub steps: usize,
    /// Interpolation used to upscale the smaller image.
    pub resize_interpolation: InterpolationMode,
    /// Interpolation used to warp the triangles.
    pub warp_interpolation: InterpolationMode,
    /// Border handling of the triangle warp.
    pub warp_border: PaddingMode,
    /// How frames are scheduled.
    pub strategy: ExecutionStrategy,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            steps: 2,
            resize_interpolation: InterpolationMode::Bicubic,
            warp_interpolation: InterpolationMode::Bilinear,
            warp_border: PaddingMode::Reflect101,
            strategy: ExecutionStrategy::Parallel,
        }
    }
}

impl MorphConfig {
    fn validate(&self) -> Result<(), MorphError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(MorphError::InvalidArgument(format!(
                "alpha must be in [0, 1], got {}",
                self.alpha
            )));
        }
        if self.steps == 0 {
            return Err(MorphError::InvalidArgument(
                "steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bookkeeping of a morph run.
#[derive(Debug, Clone, PartialEq)]
pub struct MorphStats {
    /// Size of the common canvas the frames were rendered on.
    pub canvas_size: ImageSize,
    /// Region of the canvas kept in every frame.
    pub crop: Rect,
    /// Number of correspondences after the border points were added.
    pub num_points: usize,
    /// Number of triangles in the mesh.
    pub num_triangles: usize,
    /// Number of degenerate triangles skipped, per frame.
    pub skipped_triangles: Vec<usize>,
}

/// The frames of a morph together with its statistics.
#[derive(Debug, Clone)]
pub struct MorphOutput<T, const C: usize> {
    /// The cropped frames, from the first image towards the second.
    pub frames: Vec<Image<T, C>>,
    /// Statistics of the run.
    pub stats: MorphStats,
}

/// Morphs between two images along a triangle mesh.
///
/// # Example
///
/// ```
/// use trimorph_image::{Image, ImageSize};
/// use trimorph_mesh::Point2;
/// use trimorph_morph::{MorphConfig, Morpher};
///
/// let size = ImageSize { width: 32, height: 24 };
/// let image1 = Image::<u8, 3>::from_size_val(size, 40).unwrap();
/// let image2 = Image::<u8, 3>::from_size_val(size, 200).unwrap();
/// let points = vec![Point2::new(15.0, 12.0)];
///
/// let morpher = Morpher::new(MorphConfig { steps: 3, ..Default::default() });
/// let output = morpher.run(&image1, &image2, &points, &points).unwrap();
///
/// assert_eq!(output.frames.len(), 3);
/// assert_eq!(output.stats.num_points, 9);
/// assert_eq!(output.frames[1].get_pixel(5, 5).unwrap(), &[120, 120, 120]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Morpher {
    config: MorphConfig,
}

impl Morpher {
    /// Create a new morpher.
    pub fn new(config: MorphConfig) -> Self {
        Self { config }
    }

    /// The configuration of the morpher.
    pub fn config(&self) -> &MorphConfig {
        &self.config
    }

    /// Morph `image1` into `image2`.
    ///
    /// See [`Morpher::run_with_cancel`].
    pub fn run<T: ImageDtype, const C: usize>(
        &self,
        image1: &Image<T, C>,
        image2: &Image<T, C>,
        points1: &[Point2],
        points2: &[Point2],
    ) -> Result<MorphOutput<T, C>, MorphError> {
        self.run_with_cancel(image1, image2, points1, points2, &AtomicBool::new(false))
    }

    /// Morph `image1` into `image2`, checking `cancel` before every frame.
    ///
    /// The images are brought onto a common canvas, both point sets are
    /// extended with correspondences on the canvas border and the averaged
    /// point set is triangulated once. Every frame `k` then warps all
    /// triangles of both images onto the mesh, blends them with weight
    /// `k / (steps - 1)` (zero for a single frame) in mesh order and is
    /// cropped to the region free of guessed margins.
    ///
    /// # Arguments
    ///
    /// * `image1` - The image the morph starts from.
    /// * `image2` - The image the morph ends at.
    /// * `points1` - Feature points in `image1`.
    /// * `points2` - The corresponding feature points in `image2`.
    /// * `cancel` - Set to abort the run before the next frame starts.
    ///
    /// # Errors
    ///
    /// * [`MorphError::InvalidArgument`] for an alpha outside `[0, 1]`, zero
    ///   steps, empty images, empty, mismatched or non finite point sets, or
    ///   correspondences that disagree so much near the border that no
    ///   region is left after cropping.
    /// * [`MorphError::Geometry`] if the mesh cannot be resolved to the points.
    /// * [`MorphError::Cancelled`] if `cancel` was set.
    pub fn run_with_cancel<T: ImageDtype, const C: usize>(
        &self,
        image1: &Image<T, C>,
        image2: &Image<T, C>,
        points1: &[Point2],
        points2: &[Point2],
        cancel: &AtomicBool,
    ) -> Result<MorphOutput<T, C>, MorphError> {
        self.config.validate()?;
        validate_inputs(image1.size(), image2.size(), points1, points2)?;

        let MorphConfig {
            alpha,
            steps,
            resize_interpolation,
            warp_interpolation,
            warp_border,
            strategy,
        } = self.config;

        let now = std::time::Instant::now();

        let NormalizedPair {
            image1,
            image2,
            mut points1,
            mut points2,
        } = normalize_sizes(
            &image1.convert::<f32>(),
            &image2.convert::<f32>(),
            points1,
            points2,
            resize_interpolation,
        )?;
        let canvas_size = image1.size();

        let crop = synthesize_boundary_points(canvas_size, &mut points1, &mut points2, alpha)?;
        if crop.is_empty() {
            return Err(MorphError::InvalidArgument(format!(
                "the correspondences disagree too much near the canvas border, crop {:?} is empty",
                crop
            )));
        }

        let points = points1
            .iter()
            .zip(points2.iter())
            .map(|(p1, p2)| weighted_average_point(p1, p2, alpha))
            .collect::<Vec<_>>();

        let canvas = Rect::new(0, 0, canvas_size.width, canvas_size.height);
        let triangles = triangulate(canvas, &points)?;

        log::debug!(
            "Canvas {}, {} points, {} triangles, crop {:?}",
            canvas_size,
            points.len(),
            triangles.len(),
            crop
        );

        let weights = blend_weights(steps);
        let mesh = Mesh {
            points1: &points1,
            points2: &points2,
            points: &points,
            triangles: &triangles,
        };

        let rendered = try_map_indexed(strategy, steps, |k| {
            if cancel.load(Ordering::Relaxed) {
                return Err(MorphError::Cancelled);
            }

            let now = std::time::Instant::now();
            let mut frame = Image::<f32, C>::from_size_val(canvas_size, 0.0)?;
            let skipped = mesh.render(
                &image1,
                &image2,
                &mut frame,
                weights[k],
                warp_interpolation,
                warp_border,
            )?;
            if skipped > 0 {
                log::warn!("Frame {}: skipped {} degenerate triangles", k, skipped);
            }

            let mut cropped = Image::<f32, C>::from_size_val(
                ImageSize {
                    width: crop.width,
                    height: crop.height,
                },
                0.0,
            )?;
            crop_image(&frame, &mut cropped, crop.x as usize, crop.y as usize)?;

            log::debug!("Frame {} rendered in {:?}", k, now.elapsed());

            Ok((cropped.convert::<T>(), skipped))
        })?;

        let (frames, skipped_triangles): (Vec<_>, Vec<_>) = rendered.into_iter().unzip();

        log::debug!("Morphed {} frames in {:?}", frames.len(), now.elapsed());

        Ok(MorphOutput {
            frames,
            stats: MorphStats {
                canvas_size,
                crop,
                num_points: points.len(),
                num_triangles: triangles.len(),
                skipped_triangles,
            },
        })
    }
}

// The shared mesh with the vertex positions in both images and in the frame.
struct Mesh<'a> {
    points1: &'a [Point2],
    points2: &'a [Point2],
    points: &'a [Point2],
    triangles: &'a [Triangle],
}

impl Mesh<'_> {
    // Composite every triangle into `frame` in mesh order, returning the number skipped.
    fn render<const C: usize>(
        &self,
        image1: &Image<f32, C>,
        image2: &Image<f32, C>,
        frame: &mut Image<f32, C>,
        weight: f32,
        interpolation: InterpolationMode,
        border: PaddingMode,
    ) -> Result<usize, MorphError> {
        let mut skipped = 0;
        for triangle in self.triangles {
            let t1 = triangle.map(|i| self.points1[i]);
            let t2 = triangle.map(|i| self.points2[i]);
            let t = triangle.map(|i| self.points[i]);

            let composited = morph_triangle(
                image1,
                image2,
                frame,
                &t1,
                &t2,
                &t,
                weight,
                interpolation,
                border,
            )?;
            if !composited {
                log::debug!("Skipping degenerate triangle {:?}", triangle);
                skipped += 1;
            }
        }
        Ok(skipped)
    }
}

fn validate_inputs(
    size1: ImageSize,
    size2: ImageSize,
    points1: &[Point2],
    points2: &[Point2],
) -> Result<(), MorphError> {
    if size1.is_empty() || size2.is_empty() {
        return Err(MorphError::InvalidArgument(format!(
            "images must not be empty, got {} and {}",
            size1, size2
        )));
    }
    if points1.len() != points2.len() {
        return Err(MorphError::InvalidArgument(format!(
            "point sets have different lengths: {} and {}",
            points1.len(),
            points2.len()
        )));
    }
    if points1.is_empty() {
        return Err(MorphError::InvalidArgument(
            "at least one point correspondence is required".to_string(),
        ));
    }
    if let Some(p) = points1.iter().chain(points2).find(|p| !p.is_finite()) {
        return Err(MorphError::InvalidArgument(format!(
            "point ({}, {}) is not finite",
            p.x, p.y
        )));
    }
    Ok(())
}

/// The point `(1 - alpha) * p1 + alpha * p2`.
///
/// # Example
///
/// ```
/// use trimorph_mesh::Point2;
/// use trimorph_morph::weighted_average_point;
///
/// let p = weighted_average_point(&Point2::new(0.0, 0.0), &Point2::new(10.0, 4.0), 0.5);
/// assert_eq!(p, Point2::new(5.0, 2.0));
/// ```
pub fn weighted_average_point(p1: &Point2, p2: &Point2, alpha: f32) -> Point2 {
    p1.lerp(p2, alpha)
}

/// `steps` evenly spaced blend weights from 0 to 1, both included.
///
/// A single step yields only the weight 0.
///
/// # Example
///
/// ```
/// use trimorph_morph::blend_weights;
///
/// assert_eq!(blend_weights(3), vec![0.0, 0.5, 1.0]);
/// assert_eq!(blend_weights(1), vec![0.0]);
/// ```
pub fn blend_weights(steps: usize) -> Vec<f32> {
    match steps {
        0 => Vec::new(),
        1 => vec![0.0],
        n => (0..n)
            .map(|k| (k as f64 / (n - 1) as f64) as f32)
            .collect(),
    }
}

/// Morph `image1` into `image2` in `steps` frames.
///
/// Uses [`MorphConfig::default`] for everything but `alpha` and `steps`.
///
/// # Arguments
///
/// * `image1` - The image the morph starts from.
/// * `image2` - The image the morph ends at.
/// * `points1` - Feature points in `image1`.
/// * `points2` - The corresponding feature points in `image2`.
/// * `alpha` - Weight of `points2` in the mesh, in `[0, 1]`.
/// * `steps` - Number of frames, at least one.
///
/// # Errors
///
/// See [`Morpher::run_with_cancel`].
pub fn morph<T: ImageDtype, const C: usize>(
    image1: &Image<T, C>,
    image2: &Image<T, C>,
    points1: &[Point2],
    points2: &[Point2],
    alpha: f32,
    steps: usize,
) -> Result<Vec<Image<T, C>>, MorphError> {
    let morpher = Morpher::new(MorphConfig {
        alpha,
        steps,
        ..Default::default()
    });
    Ok(morpher.run(image1, image2, points1, points2)?.frames)
}
