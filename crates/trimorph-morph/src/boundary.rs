use trimorph_image::ImageSize;
use trimorph_mesh::{Point2, Rect};

use crate::error::MorphError;

/// Where a synthesized point sits along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// On the first row or column of the canvas.
    Low,
    /// On the last row or column of the canvas.
    High,
    /// At the coordinate of the selected user point.
    Along,
}

/// The eight canvas anchors, in the order they are synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Anchor {
    LeftMid,
    RightMid,
    TopMid,
    BottomMid,
    BottomLeft,
    BottomRight,
    TopRight,
    TopLeft,
}

impl Anchor {
    const ALL: [Anchor; 8] = [
        Anchor::LeftMid,
        Anchor::RightMid,
        Anchor::TopMid,
        Anchor::BottomMid,
        Anchor::BottomLeft,
        Anchor::BottomRight,
        Anchor::TopRight,
        Anchor::TopLeft,
    ];

    fn placement(&self) -> (Placement, Placement) {
        match self {
            Anchor::LeftMid => (Placement::Low, Placement::Along),
            Anchor::RightMid => (Placement::High, Placement::Along),
            Anchor::TopMid => (Placement::Along, Placement::Low),
            Anchor::BottomMid => (Placement::Along, Placement::High),
            Anchor::BottomLeft => (Placement::Low, Placement::High),
            Anchor::BottomRight => (Placement::High, Placement::High),
            Anchor::TopRight => (Placement::High, Placement::Low),
            Anchor::TopLeft => (Placement::Low, Placement::Low),
        }
    }

    fn is_corner(&self) -> bool {
        !matches!(
            self,
            Anchor::LeftMid | Anchor::RightMid | Anchor::TopMid | Anchor::BottomMid
        )
    }

    // Selection key and whether the key is maximized.
    fn key(&self, p: &Point2, extent: &Extent) -> (f32, bool) {
        let Extent {
            x_max,
            y_max,
            x_mean,
            y_mean,
        } = *extent;
        match self {
            Anchor::LeftMid => (p.x + (y_mean - p.y).abs(), false),
            Anchor::RightMid => ((x_max - p.x) + (y_mean - p.y).abs(), false),
            Anchor::TopMid => ((x_mean - p.x).abs() + p.y, false),
            Anchor::BottomMid => ((x_mean - p.x).abs() + (y_max - p.y), false),
            Anchor::BottomLeft => ((x_max - p.x) + p.y, true),
            Anchor::BottomRight => (p.x + p.y, true),
            Anchor::TopRight => (p.x + (y_max - p.y), true),
            Anchor::TopLeft => (p.x + p.y, false),
        }
    }

    // Index of the first point with the best key.
    fn select(&self, points: &[Point2], extent: &Extent) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, p) in points.iter().enumerate() {
            let (key, maximize) = self.key(p, extent);
            let better = match best {
                None => true,
                Some((_, best_key)) if maximize => key > best_key,
                Some((_, best_key)) => key < best_key,
            };
            if better {
                best = Some((i, key));
            }
        }
        best.map(|(i, _)| i)
    }
}

#[derive(Debug, Clone, Copy)]
struct Extent {
    x_max: f32,
    y_max: f32,
    x_mean: f32,
    y_mean: f32,
}

// Coordinates of the synthesized pair along one axis, given the half delta `d`
// between the selected point and its partner.
fn place(placement: Placement, along: f32, max: f32, d: f32) -> (f32, f32) {
    match placement {
        Placement::Low => (d.abs() + d, d.abs() - d),
        Placement::High => (max - d.abs() + d, max - d.abs() - d),
        Placement::Along => (along + d, along - d),
    }
}

/// Extend both point sets with correspondences on the canvas border.
///
/// For each of the four mid edge anchors and the four corners of the canvas,
/// in the order left, right, top, bottom, bottom left, bottom right, top
/// right, top left, the point of `points1` closest to the anchor is selected
/// (by a Manhattan style key, the first point wins ties) together with its
/// partner in `points2`. Half of their coordinate difference, truncated
/// towards zero, splits the new anchor pair symmetrically around the canvas
/// border. Mid edge points are appended right away and take part in the
/// selection of later anchors; the corners are appended last.
///
/// # Arguments
///
/// * `canvas` - The size of the common canvas.
/// * `points1` - The points of the first image, extended in place.
/// * `points2` - The points of the second image, extended in place.
/// * `alpha` - The blend weight of the mesh, scaling how much margin the crop removes.
///
/// # Returns
///
/// The crop rectangle on the canvas that excludes the guessed margins. It is
/// empty when the margins overlap.
///
/// # Errors
///
/// Returns [`MorphError::InvalidArgument`] if the point sets are empty or have
/// different lengths.
///
/// # Example
///
/// ```
/// use trimorph_image::ImageSize;
/// use trimorph_mesh::{Point2, Rect};
/// use trimorph_morph::synthesize_boundary_points;
///
/// let mut points1 = vec![Point2::new(5.0, 5.0)];
/// let mut points2 = points1.clone();
/// let crop = synthesize_boundary_points(
///     ImageSize { width: 11, height: 11 },
///     &mut points1,
///     &mut points2,
///     0.5,
/// ).unwrap();
///
/// assert_eq!(points1.len(), 9);
/// assert_eq!(points1[1], Point2::new(0.0, 5.0));
/// assert_eq!(crop, Rect::new(0, 0, 10, 10));
/// ```
pub fn synthesize_boundary_points(
    canvas: ImageSize,
    points1: &mut Vec<Point2>,
    points2: &mut Vec<Point2>,
    alpha: f32,
) -> Result<Rect, MorphError> {
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

    let x_max = canvas.width.saturating_sub(1) as f32;
    let y_max = canvas.height.saturating_sub(1) as f32;
    let extent = Extent {
        x_max,
        y_max,
        x_mean: (x_max / 2.0).trunc(),
        y_mean: (y_max / 2.0).trunc(),
    };

    let margin_scale = 2.0 * (1.0 - alpha);
    let (mut crop_x_min, mut crop_x_max) = (0.0f32, x_max);
    let (mut crop_y_min, mut crop_y_max) = (0.0f32, y_max);

    let mut corners1 = Vec::with_capacity(4);
    let mut corners2 = Vec::with_capacity(4);

    for anchor in Anchor::ALL {
        let Some(i) = anchor.select(points1, &extent) else {
            continue;
        };
        let (p1, p2) = (points1[i], points2[i]);
        let dx = ((p1.x - p2.x) / 2.0).trunc();
        let dy = ((p1.y - p2.y) / 2.0).trunc();

        let (x_placement, y_placement) = anchor.placement();
        let (x1, x2) = place(x_placement, p1.x, x_max, dx);
        let (y1, y2) = place(y_placement, p1.y, y_max, dy);

        match x_placement {
            Placement::Low => crop_x_min = crop_x_min.max(dx.abs() * margin_scale),
            Placement::High => crop_x_max = crop_x_max.min(x_max - dx.abs() * margin_scale),
            Placement::Along => {}
        }
        match y_placement {
            Placement::Low => crop_y_min = crop_y_min.max(dy.abs() * margin_scale),
            Placement::High => crop_y_max = crop_y_max.min(y_max - dy.abs() * margin_scale),
            Placement::Along => {}
        }

        log::trace!(
            "{:?}: selected point {} -> ({}, {}) / ({}, {})",
            anchor,
            i,
            x1,
            y1,
            x2,
            y2
        );

        if anchor.is_corner() {
            corners1.push(Point2::new(x1, y1));
            corners2.push(Point2::new(x2, y2));
        } else {
            points1.push(Point2::new(x1, y1));
            points2.push(Point2::new(x2, y2));
        }
    }

    points1.extend(corners1);
    points2.extend(corners2);

    let x = crop_x_min.trunc() as isize;
    let y = crop_y_min.trunc() as isize;
    let width = (crop_x_max.trunc() as isize - x).max(0) as usize;
    let height = (crop_y_max.trunc() as isize - y).max(0) as usize;

    Ok(Rect::new(x, y, width, height))
}
