use trimorph_image::{Image, ImageDtype};
use trimorph_mesh::Rect;

/// Find the largest region around the image centre that is free of black pixels.
///
/// Starting from a small rectangle at the centre, each side is pushed
/// outwards in steps of 2 % of the image dimension for as long as the next
/// column or row to be included contains no black pixel, i.e. no pixel whose
/// channels are all zero. A side stops growing at the first black pixel or at
/// the image border.
///
/// This trims the zero padding and unfilled margins a morph can leave at the
/// border of a frame, also when the margin is not a straight line.
///
/// # Example
///
/// ```
/// use trimorph_image::{Image, ImageSize};
/// use trimorph_mesh::Rect;
/// use trimorph_morph::auto_crop_bounds;
///
/// let mut data = vec![0u8; 100 * 100];
/// for y in 10..90 {
///     for x in 20..80 {
///         data[y * 100 + x] = 128;
///     }
/// }
/// let image = Image::<u8, 1>::new(ImageSize { width: 100, height: 100 }, data).unwrap();
///
/// assert_eq!(auto_crop_bounds(&image), Rect::new(21, 11, 58, 78));
/// ```
pub fn auto_crop_bounds<T: ImageDtype, const C: usize>(image: &Image<T, C>) -> Rect {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 {
        return Rect::default();
    }

    let x_step = (width * 2 / 100).max(1);
    let y_step = (height * 2 / 100).max(1);

    let mut x_min = (width / 2).saturating_sub(1);
    let mut x_max = (width / 2 + 1).min(width);
    let mut y_min = (height / 2).saturating_sub(1);
    let mut y_max = (height / 2 + 1).min(height);

    let is_black = |x: usize, y: usize| {
        image
            .get_pixel(x, y)
            .map(|pixel| pixel.iter().all(|v| v.is_zero()))
            .unwrap_or(true)
    };

    let (mut left, mut right, mut top, mut bottom) = (true, true, true, true);
    while left || right || top || bottom {
        if left {
            left = x_min >= x_step && (y_min..y_max).all(|y| !is_black(x_min - x_step, y));
            if left {
                x_min -= x_step;
            }
        }
        if bottom {
            bottom = y_max + y_step < height && (x_min..x_max).all(|x| !is_black(x, y_max + y_step));
            if bottom {
                y_max += y_step;
            }
        }
        if right {
            right = x_max + x_step < width && (y_min..y_max).all(|y| !is_black(x_max + x_step, y));
            if right {
                x_max += x_step;
            }
        }
        if top {
            top = y_min >= y_step && (x_min..x_max).all(|x| !is_black(x, y_min - y_step));
            if top {
                y_min -= y_step;
            }
        }
    }

    Rect::new(
        x_min as isize,
        y_min as isize,
        x_max - x_min,
        y_max - y_min,
    )
}
