//! Fixed-canvas affine resampling with bilinear interpolation.
//!
//! # Algorithm
//!
//! The warp uses inverse mapping: the forward transform is inverted once,
//! then for each destination pixel we compute the source coordinate it
//! came from and interpolate the four surrounding source pixels.
//!
//! ```text
//! (src_x, src_y) = inverse(dst_x, dst_y)
//! ```
//!
//! A source coordinate is inside the image when it lies in
//! `[0, w-1] x [0, h-1]`. Outside that range the [`EdgePolicy`] decides:
//! `Fill` writes the background, `Wrap` reads cyclically.

use crate::affine::AffineTransform;
use crate::buffer::{clamp_round, Background, ImageBuffer};
use crate::spec::EdgePolicy;
use crate::TransformError;

/// Slack for coordinates that land a hair outside the grid from rounding.
const EDGE_EPSILON: f64 = 1e-9;

/// Apply `transform` (source -> destination) to `image` in one resampling pass.
///
/// The output has the same dimensions, channel count and channel order as
/// the input. Several geometric steps can be folded into one pass by
/// building `transform` with [`crate::affine::compose`].
///
/// # Errors
///
/// `InvalidParameter` when `transform` is singular.
pub fn apply_affine(
    image: &ImageBuffer,
    transform: &AffineTransform,
    edge_policy: EdgePolicy,
    background: Background,
) -> Result<ImageBuffer, TransformError> {
    if transform.is_identity() {
        return Ok(image.clone());
    }

    let inverse = transform.inverse()?;
    let (width, height) = (image.width(), image.height());
    let channels = image.channels() as usize;
    let bg = background.resolve(image.channels(), image.channel_order());

    let mut output = vec![0u8; width as usize * height as usize * channels];

    for (dst_y, row) in output
        .chunks_exact_mut(width as usize * channels)
        .enumerate()
    {
        for (dst_x, px) in row.chunks_exact_mut(channels).enumerate() {
            let (src_x, src_y) = inverse.apply(dst_x as f64, dst_y as f64);
            let written = match edge_policy {
                EdgePolicy::Fill => sample_bilinear_clipped(image, src_x, src_y, px),
                EdgePolicy::Wrap => {
                    sample_bilinear_wrapped(image, src_x, src_y, px);
                    true
                }
            };
            if !written {
                px.copy_from_slice(&bg[..channels]);
            }
        }
    }

    Ok(ImageBuffer::from_parts(
        width,
        height,
        image.channels(),
        image.channel_order(),
        output,
    ))
}

/// Bilinear sample at `(x, y)`, or `false` when the point is outside the image.
fn sample_bilinear_clipped(image: &ImageBuffer, x: f64, y: f64, out: &mut [u8]) -> bool {
    let max_x = (image.width() - 1) as f64;
    let max_y = (image.height() - 1) as f64;

    if !(x >= -EDGE_EPSILON && x <= max_x + EDGE_EPSILON)
        || !(y >= -EDGE_EPSILON && y <= max_y + EDGE_EPSILON)
    {
        return false;
    }

    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let x1 = (x0 + 1).min(max_x as i64);
    let y1 = (y0 + 1).min(max_y as i64);

    blend(image, [x0, x1], [y0, y1], x - x0 as f64, y - y0 as f64, out);
    true
}

/// Bilinear sample at `(x, y)` with toroidal addressing.
fn sample_bilinear_wrapped(image: &ImageBuffer, x: f64, y: f64, out: &mut [u8]) {
    let w = image.width() as f64;
    let h = image.height() as f64;

    let x = x.rem_euclid(w);
    let y = y.rem_euclid(h);

    // rem_euclid can round up to exactly w for tiny negative inputs
    let x0 = (x.floor() as i64).rem_euclid(w as i64);
    let y0 = (y.floor() as i64).rem_euclid(h as i64);
    let x1 = (x0 + 1).rem_euclid(w as i64);
    let y1 = (y0 + 1).rem_euclid(h as i64);

    let fx = (x - x.floor()).clamp(0.0, 1.0);
    let fy = (y - y.floor()).clamp(0.0, 1.0);

    blend(image, [x0, x1], [y0, y1], fx, fy, out);
}

/// Weighted blend of the four neighbours. Indices must be in bounds.
#[inline]
fn blend(image: &ImageBuffer, xs: [i64; 2], ys: [i64; 2], fx: f64, fy: f64, out: &mut [u8]) {
    let (Some(p00), Some(p10), Some(p01), Some(p11)) = (
        image.sample(xs[0], ys[0]),
        image.sample(xs[1], ys[0]),
        image.sample(xs[0], ys[1]),
        image.sample(xs[1], ys[1]),
    ) else {
        return;
    };

    for (i, dst) in out.iter_mut().enumerate() {
        let v = p00[i] as f64 * (1.0 - fx) * (1.0 - fy)
            + p10[i] as f64 * fx * (1.0 - fy)
            + p01[i] as f64 * (1.0 - fx) * fy
            + p11[i] as f64 * fx * fy;
        *dst = clamp_round(v);
    }
}
