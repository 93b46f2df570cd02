use rayon::prelude::*;
use thiserror::Error;

use trimorph_image::Image;

/// Errors raised while setting up a thread pool.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// rayon could not build the pool.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// A pool of zero threads was requested.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Scheduling of independent work items such as the frames of a morph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Items are spread over the global rayon pool.
    #[default]
    Parallel,

    /// Items run one after another on the calling thread.
    Serial,

    /// Items are spread over a pool of `n` threads built for the call.
    Fixed(usize),
}

/// Resample `dst` row by row in parallel.
///
/// For every destination pixel `f` gets the source coordinates stored at the
/// same position in `map_x` and `map_y`, and the pixel to write.
pub fn par_iter_rows_resample<const C: usize>(
    dst: &mut Image<f32, C>,
    map_x: &Image<f32, 1>,
    map_y: &Image<f32, 1>,
    f: impl Fn(&f32, &f32, &mut [f32]) + Send + Sync,
) {
    let width = dst.width();
    if width == 0 {
        return;
    }

    dst.as_slice_mut()
        .par_chunks_exact_mut(width * C)
        .zip(map_x.as_slice().par_chunks_exact(width))
        .zip(map_y.as_slice().par_chunks_exact(width))
        .for_each(|((dst_row, xs), ys)| {
            for (pixel, (x, y)) in dst_row.chunks_exact_mut(C).zip(xs.iter().zip(ys)) {
                f(x, y, pixel);
            }
        });
}

/// Evaluate `op` for every index in `0..count` with the given strategy.
///
/// Results are returned in index order regardless of the strategy. The first
/// error (in index order for [`ExecutionStrategy::Serial`], any for the
/// parallel strategies) is returned.
///
/// # Example
///
/// ```
/// use trimorph_imgproc::parallel::{try_map_indexed, ExecutionStrategy, ParallelError};
///
/// let squares: Result<Vec<usize>, ParallelError> =
///     try_map_indexed(ExecutionStrategy::Parallel, 4, |i| Ok(i * i));
/// assert_eq!(squares, Ok(vec![0, 1, 4, 9]));
/// ```
pub fn try_map_indexed<T, E, F>(
    strategy: ExecutionStrategy,
    count: usize,
    op: F,
) -> Result<Vec<T>, E>
where
    T: Send,
    E: Send + From<ParallelError>,
    F: Fn(usize) -> Result<T, E> + Sync + Send,
{
    match strategy {
        ExecutionStrategy::Serial => (0..count).map(op).collect(),
        ExecutionStrategy::Parallel => (0..count).into_par_iter().map(op).collect(),
        ExecutionStrategy::Fixed(n) => {
            if n == 0 {
                return Err(ParallelError::InvalidThreadCount(n).into());
            }
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| ParallelError::BuildError(e.to_string()))?;

            pool.install(|| (0..count).into_par_iter().map(op).collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trimorph_image::{ImageError, ImageSize};

    #[test]
    fn test_map_serial() {
        let res: Result<Vec<usize>, ParallelError> =
            try_map_indexed(ExecutionStrategy::Serial, 4, |i| Ok(i * 2));
        assert_eq!(res, Ok(vec![0, 2, 4, 6]));
    }

    #[test]
    fn test_map_parallel_keeps_order() {
        let res: Result<Vec<usize>, ParallelError> =
            try_map_indexed(ExecutionStrategy::Parallel, 100, |i| Ok(i + 1));
        assert_eq!(res, Ok((1..=100).collect::<Vec<_>>()));
    }

    #[test]
    fn test_map_fixed_success() {
        let res: Result<Vec<usize>, ParallelError> =
            try_map_indexed(ExecutionStrategy::Fixed(2), 3, Ok);
        assert_eq!(res, Ok(vec![0, 1, 2]));
    }

    #[test]
    fn test_map_fixed_error() {
        let res: Result<Vec<usize>, ParallelError> =
            try_map_indexed(ExecutionStrategy::Fixed(0), 3, Ok);
        assert_eq!(res, Err(ParallelError::InvalidThreadCount(0)));
    }

    #[test]
    fn test_map_propagates_error() {
        let res: Result<Vec<usize>, ParallelError> =
            try_map_indexed(ExecutionStrategy::Serial, 5, |i| {
                if i == 3 {
                    Err(ParallelError::BuildError("boom".into()))
                } else {
                    Ok(i)
                }
            });
        assert!(res.is_err());
    }

    #[test]
    fn test_resample_rows() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let mut dst = Image::<f32, 2>::from_size_val(size, 0.0)?;
        let map_x = Image::<f32, 1>::new(size, vec![0.0, 1.0, 0.0, 1.0])?;
        let map_y = Image::<f32, 1>::new(size, vec![0.0, 0.0, 1.0, 1.0])?;

        par_iter_rows_resample(&mut dst, &map_x, &map_y, |&x, &y, pixel| {
            pixel[0] = x;
            pixel[1] = y;
        });

        assert_eq!(dst.as_slice(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        Ok(())
    }
}
