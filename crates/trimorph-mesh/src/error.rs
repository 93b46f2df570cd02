/// An error type for the mesh module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MeshError {
    /// A triangulation vertex could not be matched to an input point.
    #[error("Triangle vertex ({0}, {1}) does not match any input point")]
    UnmatchedVertex(f32, f32),

    /// The triangulation bounds are empty.
    #[error("Triangulation bounds must have a positive size, got {0}x{1}")]
    EmptyBounds(usize, usize),

    /// A point has a non finite coordinate.
    #[error("Point ({0}, {1}) has a non finite coordinate")]
    NonFinitePoint(f32, f32),
}
