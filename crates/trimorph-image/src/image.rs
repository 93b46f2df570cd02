use num_traits::Zero;

use crate::error::ImageError;

/// Width and height of an image in pixels.
///
/// # Examples
///
/// ```
/// use trimorph_image::ImageSize;
///
/// let size = ImageSize { width: 4, height: 3 };
/// assert_eq!(size.area(), 12);
/// assert_eq!(size, [4, 3].into());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageSize {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by the size.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Whether one of the dimensions is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from([width, height]: [usize; 2]) -> Self {
        ImageSize { width, height }
    }
}

/// Pixel types an image can be rendered into.
///
/// All resampling happens in `f32`; `from_f32` brings a value back, rounding
/// and saturating for integer types.
pub trait ImageDtype: Copy + Default + Zero + Into<f32> + Send + Sync {
    /// Convert a `f32` sample to the pixel type.
    fn from_f32(x: f32) -> Self;
}

impl ImageDtype for f32 {
    fn from_f32(x: f32) -> Self {
        x
    }
}

impl ImageDtype for u8 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, u8::MAX as f32) as u8
    }
}

impl ImageDtype for u16 {
    fn from_f32(x: f32) -> Self {
        x.round().clamp(0.0, u16::MAX as f32) as u16
    }
}

/// An owned image of `CHANNELS` interleaved channels.
///
/// Pixels are stored row by row, the channels of a pixel next to each other,
/// so the element `(x, y, c)` lives at `(y * width + x) * CHANNELS + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Wrap `data` as an image of the given size.
    ///
    /// # Errors
    ///
    /// [`ImageError::InvalidChannelShape`] if `data` does not hold exactly
    /// `width * height * CHANNELS` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use trimorph_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 2>::new(ImageSize { width: 3, height: 1 }, vec![1, 2, 3, 4, 5, 6]).unwrap();
    /// assert_eq!(image.get_pixel(2, 0).unwrap(), &[5, 6]);
    /// assert!(Image::<u8, 2>::new(image.size(), vec![0; 5]).is_err());
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        let expected = size.area() * CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }
        Ok(Self { size, data })
    }

    /// An image of the given size with every element set to `val`.
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        Image::new(size, vec![val; size.area() * CHANNELS])
    }

    /// Convert every element to another pixel type through `f32`.
    pub fn convert<U>(&self) -> Image<U, CHANNELS>
    where
        T: ImageDtype,
        U: ImageDtype,
    {
        Image {
            size: self.size,
            data: self.data.iter().map(|&x| U::from_f32(x.into())).collect(),
        }
    }

    /// The size of the image.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Number of columns, same as [`Image::width`].
    pub fn cols(&self) -> usize {
        self.size.width
    }

    /// Number of rows, same as [`Image::height`].
    pub fn rows(&self) -> usize {
        self.size.height
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Number of interleaved channels.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// All elements in storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// All elements in storage order, mutably.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Take the element buffer out of the image.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// The channels of the pixel at column `x` and row `y`.
    ///
    /// # Errors
    ///
    /// [`ImageError::PixelIndexOutOfBounds`] if `(x, y)` lies outside the image.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<&[T], ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        let start = (y * self.width() + x) * CHANNELS;
        Ok(&self.data[start..start + CHANNELS])
    }
}
