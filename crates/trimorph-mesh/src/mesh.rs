use crate::{
    delaunay::{orient, Delaunay},
    error::MeshError,
    geometry::{Point2, Rect},
};

/// A triangle as three indices into a point set.
pub type Triangle = [usize; 3];

/// Triangulate `points` inside `rect` and resolve every triangle to point indices.
///
/// Points outside the closed rectangle are left out of the triangulation.
/// Repeated points are triangulated once and resolve to their first index.
///
/// # Arguments
///
/// * `rect` - The triangulation bounds.
/// * `points` - The point set to triangulate.
///
/// # Returns
///
/// The triangles in the order produced by the triangulation, each one
/// holding three distinct indices into `points`.
///
/// # Errors
///
/// * [`MeshError::EmptyBounds`] if `rect` has no area.
/// * [`MeshError::NonFinitePoint`] if a point has a NaN or infinite coordinate.
/// * [`MeshError::UnmatchedVertex`] if a triangle vertex has no exact match in `points`.
///
/// # Example
///
/// ```
/// use trimorph_mesh::{triangulate, Point2, Rect};
///
/// let points = [
///     Point2::new(0.0, 0.0),
///     Point2::new(4.0, 0.0),
///     Point2::new(0.0, 4.0),
///     Point2::new(50.0, 50.0),
/// ];
/// let triangles = triangulate(Rect::new(0, 0, 5, 5), &points).unwrap();
/// assert_eq!(triangles.len(), 1);
/// let mut t = triangles[0];
/// t.sort();
/// assert_eq!(t, [0, 1, 2]);
/// ```
pub fn triangulate(rect: Rect, points: &[Point2]) -> Result<Vec<Triangle>, MeshError> {
    if rect.is_empty() {
        return Err(MeshError::EmptyBounds(rect.width, rect.height));
    }
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return Err(MeshError::NonFinitePoint(p.x, p.y));
    }

    let mut delaunay = Delaunay::new(rect);
    let accepted = delaunay.insert_all(points);

    let triangles = delaunay
        .triangle_list()
        .iter()
        .map(|t| {
            let mut indices = [0; 3];
            for (index, vertex) in indices.iter_mut().zip(t) {
                *index = points
                    .iter()
                    .position(|p| p == vertex)
                    .ok_or(MeshError::UnmatchedVertex(vertex.x, vertex.y))?;
            }
            Ok(indices)
        })
        .collect::<Result<Vec<_>, MeshError>>()?;

    log::debug!(
        "Triangulated {} of {} points into {} triangles",
        accepted,
        points.len(),
        triangles.len()
    );

    Ok(triangles)
}

/// Unsigned area of the triangle `t`.
///
/// # Example
///
/// ```
/// use trimorph_mesh::{triangle_area, Point2};
///
/// let t = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(0.0, 3.0)];
/// assert_eq!(triangle_area(&t), 6.0);
/// ```
pub fn triangle_area(t: &[Point2; 3]) -> f32 {
    let [a, b, c] = t.map(|p| [p.x as f64, p.y as f64]);
    (orient(a, b, c).abs() / 2.0) as f32
}
