use crate::geometry::{Point2, Rect};

// Distance of the seed vertices from the canvas, in multiples of the larger
// canvas side. Circumcircles through a seed vertex and a hull edge of length
// `L` bulge into the canvas by roughly `L^2 / (8 * SEED_SCALE * side)`.
const SEED_SCALE: f64 = 100.0;

// Number of seed vertices stored at the front of the vertex list.
const NUM_SEEDS: usize = 3;

/// Incremental Delaunay triangulation of points inside a rectangle.
///
/// Uses Bowyer-Watson insertion: the triangulation starts from a single seed
/// triangle that encloses the rectangle, every inserted point removes the
/// triangles whose circumcircle contains it and re-triangulates the cavity.
/// Triangles touching a seed vertex are never reported.
///
/// # Example
///
/// ```
/// use trimorph_mesh::{Delaunay, Point2, Rect};
///
/// let mut delaunay = Delaunay::new(Rect::new(0, 0, 10, 10));
/// for p in [(0.0, 0.0), (9.0, 0.0), (9.0, 9.0), (0.0, 9.0)] {
///     delaunay.insert(Point2::from(p));
/// }
/// assert_eq!(delaunay.triangle_list().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct Delaunay {
    rect: Rect,
    // seed vertices first, then the inserted points in insertion order
    vertices: Vec<[f64; 2]>,
    points: Vec<Point2>,
    // counter clockwise vertex indices
    triangles: Vec<[usize; 3]>,
}

impl Delaunay {
    /// Create an empty triangulation accepting points inside `rect`.
    ///
    /// Points are accepted on the closed region `[x, x + width] x [y, y + height]`.
    pub fn new(rect: Rect) -> Self {
        let side = rect.width.max(rect.height).max(1) as f64;
        let m = SEED_SCALE * side;
        let cx = rect.x as f64 + rect.width as f64 / 2.0;
        let cy = rect.y as f64 + rect.height as f64 / 2.0;

        let vertices = vec![
            [cx - 2.0 * m, cy - m],
            [cx + 2.0 * m, cy - m],
            [cx, cy + 2.0 * m],
        ];

        Self {
            rect,
            vertices,
            points: Vec::new(),
            triangles: vec![[0, 1, 2]],
        }
    }

    /// The rectangle accepted points must lie in.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Number of points inserted so far.
    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    /// Insert a point into the triangulation.
    ///
    /// Returns `false` and leaves the triangulation untouched when the point is
    /// not finite, lies outside the rectangle or repeats an already inserted
    /// point.
    pub fn insert(&mut self, p: Point2) -> bool {
        if !p.is_finite() {
            log::warn!("Skipping non finite point ({}, {})", p.x, p.y);
            return false;
        }
        if !self.rect.contains_closed(&p) {
            log::warn!(
                "Skipping point ({}, {}) outside of the triangulation bounds {:?}",
                p.x,
                p.y,
                self.rect
            );
            return false;
        }
        if self.points.contains(&p) {
            log::debug!("Skipping duplicated point ({}, {})", p.x, p.y);
            return false;
        }

        let pv = [p.x as f64, p.y as f64];
        let (bad, good): (Vec<[usize; 3]>, Vec<[usize; 3]>) = self
            .triangles
            .iter()
            .partition(|t| self.in_circumcircle(t, pv));

        // cavity boundary: edges of removed triangles not shared with another
        // removed triangle. Shared edges appear with opposite orientation.
        let mut boundary = Vec::with_capacity(bad.len() + 2);
        for t in &bad {
            for (a, b) in [(t[0], t[1]), (t[1], t[2]), (t[2], t[0])] {
                let shared = bad
                    .iter()
                    .any(|o| [(o[0], o[1]), (o[1], o[2]), (o[2], o[0])].contains(&(b, a)));
                if !shared {
                    boundary.push((a, b));
                }
            }
        }

        let index = self.vertices.len();
        self.vertices.push(pv);
        self.points.push(p);

        self.triangles = good;
        self.triangles
            .extend(boundary.into_iter().map(|(a, b)| [a, b, index]));

        true
    }

    /// Insert every point of `points`, returning how many were accepted.
    pub fn insert_all(&mut self, points: &[Point2]) -> usize {
        points.iter().filter(|p| self.insert(**p)).count()
    }

    /// The triangles between inserted points, as vertex coordinates.
    ///
    /// Triangles are reported counter clockwise in the `x` right, `y` up
    /// convention (clockwise on screen).
    pub fn triangle_list(&self) -> Vec<[Point2; 3]> {
        self.triangles
            .iter()
            .filter(|t| t.iter().all(|&i| i >= NUM_SEEDS))
            .map(|t| t.map(|i| self.points[i - NUM_SEEDS]))
            .collect()
    }

    fn in_circumcircle(&self, t: &[usize; 3], p: [f64; 2]) -> bool {
        let [a, b, c] = t.map(|i| self.vertices[i]);
        in_circle(a, b, c, p) > 0.0
    }
}

/// Positive when `a, b, c` turn counter clockwise in the `x` right, `y` up
/// convention.
pub(crate) fn orient(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

// Positive when `p` lies strictly inside the circumcircle of the counter
// clockwise triangle `a, b, c`.
fn in_circle(a: [f64; 2], b: [f64; 2], c: [f64; 2], p: [f64; 2]) -> f64 {
    let (adx, ady) = (a[0] - p[0], a[1] - p[1]);
    let (bdx, bdy) = (b[0] - p[0], b[1] - p[1]);
    let (cdx, cdy) = (c[0] - p[0], c[1] - p[1]);

    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;

    adx * (bdy * cd - bd * cdy) - ady * (bdx * cd - bd * cdx) + ad * (bdx * cdy - bdy * cdx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(t: &[Point2; 3]) -> f64 {
        let [a, b, c] = t.map(|p| [p.x as f64, p.y as f64]);
        orient(a, b, c).abs() / 2.0
    }

    #[test]
    fn in_circle_sign() {
        let (a, b, c) = ([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]);
        assert!(orient(a, b, c) > 0.0);
        assert!(in_circle(a, b, c, [0.5, 0.5 - 1e-3]) > 0.0);
        assert!(in_circle(a, b, c, [2.0, 2.0]) < 0.0);
        assert_eq!(in_circle(a, b, c, [1.0, 1.0]), 0.0);
    }

    #[test]
    fn empty_and_single_point() {
        let mut d = Delaunay::new(Rect::new(0, 0, 4, 4));
        assert!(d.triangle_list().is_empty());
        assert!(d.insert(Point2::new(1.0, 1.0)));
        assert!(d.triangle_list().is_empty());
        assert_eq!(d.num_points(), 1);
    }

    #[test]
    fn rejects_duplicates_outside_and_nan() {
        let mut d = Delaunay::new(Rect::new(0, 0, 10, 10));
        assert!(d.insert(Point2::new(2.0, 2.0)));
        assert!(!d.insert(Point2::new(2.0, 2.0)));
        assert!(!d.insert(Point2::new(-1.0, 2.0)));
        assert!(!d.insert(Point2::new(2.0, 10.5)));
        assert!(!d.insert(Point2::new(f32::NAN, 2.0)));
        assert!(d.insert(Point2::new(10.0, 10.0)));
        assert_eq!(d.num_points(), 2);
    }

    #[test]
    fn square_with_center() {
        let mut d = Delaunay::new(Rect::new(0, 0, 11, 11));
        let accepted = d.insert_all(&[
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
            Point2::new(5.0, 5.0),
        ]);
        assert_eq!(accepted, 5);

        let triangles = d.triangle_list();
        assert_eq!(triangles.len(), 4);
        assert!(triangles
            .iter()
            .all(|t| t.contains(&Point2::new(5.0, 5.0))));
        let total: f64 = triangles.iter().map(area).sum();
        approx::assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_circumcircle_property() {
        let points: Vec<Point2> = [
            (0.0, 0.0),
            (40.0, 0.0),
            (40.0, 30.0),
            (0.0, 30.0),
            (12.0, 7.0),
            (25.0, 11.0),
            (31.0, 22.0),
            (8.0, 19.0),
            (20.0, 26.0),
            (17.0, 15.0),
        ]
        .into_iter()
        .map(Point2::from)
        .collect();

        let mut d = Delaunay::new(Rect::new(0, 0, 41, 31));
        d.insert_all(&points);
        let triangles = d.triangle_list();

        let total: f64 = triangles.iter().map(area).sum();
        approx::assert_relative_eq!(total, 1200.0, epsilon = 1e-6);

        for t in &triangles {
            let [a, b, c] = t.map(|p| [p.x as f64, p.y as f64]);
            assert!(orient(a, b, c) > 0.0);
            for p in &points {
                if t.contains(p) {
                    continue;
                }
                assert!(in_circle(a, b, c, [p.x as f64, p.y as f64]) <= 0.0);
            }
        }
    }
}
