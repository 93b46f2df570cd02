use trimorph_image::ImageError;
use trimorph_imgproc::parallel::ParallelError;
use trimorph_mesh::MeshError;

/// An error type for the morph module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum MorphError {
    /// The inputs were rejected before any processing started.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The triangulation does not match the point set.
    #[error(transparent)]
    Geometry(#[from] MeshError),

    /// An image operation failed.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// The frame scheduler failed.
    #[error(transparent)]
    Parallel(#[from] ParallelError),

    /// The morph was aborted before all frames were rendered.
    #[error("Morph cancelled")]
    Cancelled,
}
