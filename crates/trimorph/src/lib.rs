#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use trimorph_image as image;

#[doc(inline)]
pub use trimorph_imgproc as imgproc;

#[doc(inline)]
pub use trimorph_mesh as mesh;

#[doc(inline)]
pub use trimorph_morph as morph;
