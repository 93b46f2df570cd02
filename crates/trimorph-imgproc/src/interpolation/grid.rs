use trimorph_image::{Image, ImageError, ImageSize};

/// Create a meshgrid of x and y coordinates computed by a function.
///
/// # Arguments
///
/// * `cols` - The number of columns indicating the width of the grid
/// * `rows` - The number of rows indicating the height of the grid
/// * `f` - Maps a destination `(x, y)` to the `(u, v)` coordinates to store.
///
/// # Returns
///
/// A tuple of single channel images of shape (rows, cols) containing the x and y coordinates
pub fn meshgrid_from_fn(
    cols: usize,
    rows: usize,
    f: impl Fn(usize, usize) -> (f32, f32),
) -> Result<(Image<f32, 1>, Image<f32, 1>), ImageError> {
    let mut map_x = Vec::with_capacity(rows * cols);
    let mut map_y = Vec::with_capacity(rows * cols);

    for y in 0..rows {
        for x in 0..cols {
            let (u, v) = f(x, y);
            map_x.push(u);
            map_y.push(v);
        }
    }

    let size = ImageSize {
        width: cols,
        height: rows,
    };

    Ok((Image::new(size, map_x)?, Image::new(size, map_y)?))
}
