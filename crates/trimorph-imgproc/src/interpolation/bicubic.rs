use super::interpolate::fetch;
use crate::padding::PaddingMode;
use trimorph_image::Image;

// Keys cubic convolution coefficient, the same value OpenCV uses.
const A: f32 = -0.75;

#[inline]
fn cubic_weights(t: f32) -> [f32; 4] {
    let w0 = ((A * (t + 1.0) - 5.0 * A) * (t + 1.0) + 8.0 * A) * (t + 1.0) - 4.0 * A;
    let w1 = ((A + 2.0) * t - (A + 3.0)) * t * t + 1.0;
    let s = 1.0 - t;
    let w2 = ((A + 2.0) * s - (A + 3.0)) * s * s + 1.0;
    [w0, w1, w2, 1.0 - w0 - w1 - w2]
}

/// Kernel for bicubic interpolation over the 4x4 neighbourhood of `(u, v)`.
pub(crate) fn bicubic_interpolation<const C: usize>(
    image: &Image<f32, C>,
    u: f32,
    v: f32,
    border: PaddingMode,
) -> [f32; C] {
    let u0 = u.floor();
    let v0 = v.floor();
    let wx = cubic_weights(u - u0);
    let wy = cubic_weights(v - v0);
    let (iu0, iv0) = (u0 as isize, v0 as isize);

    let mut pixel = [0.0; C];
    for (j, wyj) in wy.iter().enumerate() {
        for (i, wxi) in wx.iter().enumerate() {
            let w = wxi * wyj;
            if w == 0.0 {
                continue;
            }
            let x = iu0 + i as isize - 1;
            let y = iv0 + j as isize - 1;
            if let Some(p) = fetch(image, x, y, border) {
                for k in 0..C {
                    pixel[k] += p[k] * w;
                }
            }
        }
    }

    pixel
}
