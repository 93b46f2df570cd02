/// A 2D point in pixel coordinates.
///
/// `x` grows to the right and `y` grows downwards, as in image space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2 {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point2 {
    /// Create a new point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Scale both coordinates by `factor`.
    pub fn scale(&self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Linear blend `(1 - alpha) * self + alpha * other`.
    ///
    /// # Example
    ///
    /// ```
    /// use trimorph_mesh::Point2;
    ///
    /// let p = Point2::new(0.0, 10.0).lerp(&Point2::new(4.0, 20.0), 0.25);
    /// assert_eq!(p, Point2::new(1.0, 12.5));
    /// ```
    pub fn lerp(&self, other: &Point2, alpha: f32) -> Self {
        Self::new(
            (1.0 - alpha) * self.x + alpha * other.x,
            (1.0 - alpha) * self.y + alpha * other.y,
        )
    }

    /// The point as an `[x, y]` array.
    pub fn to_array(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

impl From<[f32; 2]> for Point2 {
    fn from(p: [f32; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<(f32, f32)> for Point2 {
    fn from(p: (f32, f32)) -> Self {
        Self::new(p.0, p.1)
    }
}

/// An axis aligned rectangle on the integer pixel grid.
///
/// The rectangle spans the columns `x..x + width` and rows `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rect {
    /// Left column.
    pub x: isize,
    /// Top row.
    pub y: isize,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl Rect {
    /// Create a new rectangle.
    pub const fn new(x: isize, y: isize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The smallest rectangle containing the integer parts of all `points`.
    ///
    /// Follows the convention of rasterizing floating point outlines: the
    /// left/top edge is the floor of the minimum and the rectangle extends to
    /// include the pixel holding the floor of the maximum.
    ///
    /// Returns `None` for an empty slice or non finite coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use trimorph_mesh::{Point2, Rect};
    ///
    /// let r = Rect::bounding(&[
    ///     Point2::new(1.5, 2.0),
    ///     Point2::new(4.2, 2.9),
    ///     Point2::new(2.0, 6.0),
    /// ]).unwrap();
    /// assert_eq!(r, Rect::new(1, 2, 4, 5));
    /// ```
    pub fn bounding(points: &[Point2]) -> Option<Self> {
        let first = points.first()?;
        let (mut x_min, mut y_min, mut x_max, mut y_max) = (first.x, first.y, first.x, first.y);
        for p in points {
            if !p.is_finite() {
                return None;
            }
            x_min = x_min.min(p.x);
            y_min = y_min.min(p.y);
            x_max = x_max.max(p.x);
            y_max = y_max.max(p.y);
        }

        let x = x_min.floor() as isize;
        let y = y_min.floor() as isize;
        let width = (x_max.floor() as isize - x + 1) as usize;
        let height = (y_max.floor() as isize - y + 1) as usize;

        Some(Self::new(x, y, width, height))
    }

    /// One past the last column.
    pub fn right(&self) -> isize {
        self.x + self.width as isize
    }

    /// One past the last row.
    pub fn bottom(&self) -> isize {
        self.y + self.height as isize
    }

    /// Number of pixels covered.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether the rectangle covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Whether `p` lies in the closed region `[x, x + width] x [y, y + height]`.
    pub fn contains_closed(&self, p: &Point2) -> bool {
        let (x, y) = (p.x as f64, p.y as f64);
        x >= self.x as f64 && x <= self.right() as f64 && y >= self.y as f64 && y <= self.bottom() as f64
    }

    /// The overlap of two rectangles, or `None` if they do not overlap.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            return None;
        }
        Some(Rect::new(x, y, (right - x) as usize, (bottom - y) as usize))
    }
}
