//! Canvas resizing by per-axis scale factors.
//!
//! Uses the `image` crate's `Triangle` filter, which is bilinear for
//! magnification and a bilinear-weighted area filter for minification.
//! Resampling is channel-order agnostic, so the samples are handed to the
//! resizer as-is and the original order tag is carried over.

use image::imageops::{self, FilterType};

use crate::affine::validate_scale;
use crate::buffer::ImageBuffer;
use crate::codec::MAX_DECODE_DIMENSION;
use crate::TransformError;

/// Largest width or height the scale operator will produce.
///
/// Three times the decode limit, so any decodable upload fits at the top of
/// the slider range (`scale_x`/`scale_y` up to 3.0).
pub const MAX_OUTPUT_DIMENSION: u32 = MAX_DECODE_DIMENSION * 3;

/// Resize an image to `round(width * sx) x round(height * sy)`.
///
/// Each output dimension is at least 1 pixel.
///
/// # Errors
///
/// `InvalidParameter` when a factor is not strictly positive and finite,
/// or when the output would exceed [`MAX_OUTPUT_DIMENSION`].
pub fn apply_scale(image: &ImageBuffer, sx: f64, sy: f64) -> Result<ImageBuffer, TransformError> {
    validate_scale(sx, sy)?;

    // Fast path: no scaling needed
    if sx == 1.0 && sy == 1.0 {
        return Ok(image.clone());
    }

    let (width, height) = scaled_dimensions(image.width(), image.height(), sx, sy)?;
    if width == image.width() && height == image.height() {
        return Ok(image.clone());
    }

    let pixels = if image.has_alpha() {
        let src = image::RgbaImage::from_raw(image.width(), image.height(), image.pixels().to_vec())
            .ok_or_else(|| shape_error(image))?;
        imageops::resize(&src, width, height, FilterType::Triangle).into_raw()
    } else {
        let src = image::RgbImage::from_raw(image.width(), image.height(), image.pixels().to_vec())
            .ok_or_else(|| shape_error(image))?;
        imageops::resize(&src, width, height, FilterType::Triangle).into_raw()
    };

    Ok(ImageBuffer::from_parts(
        width,
        height,
        image.channels(),
        image.channel_order(),
        pixels,
    ))
}

/// Output dimensions for the given scale factors.
pub fn scaled_dimensions(
    width: u32,
    height: u32,
    sx: f64,
    sy: f64,
) -> Result<(u32, u32), TransformError> {
    let w = (width as f64 * sx).round().max(1.0);
    let h = (height as f64 * sy).round().max(1.0);
    if w > MAX_OUTPUT_DIMENSION as f64 || h > MAX_OUTPUT_DIMENSION as f64 {
        return Err(TransformError::invalid_parameter(
            "scale",
            format!("output {w}x{h} exceeds the {MAX_OUTPUT_DIMENSION}px limit"),
        ));
    }
    Ok((w as u32, h as u32))
}

fn shape_error(image: &ImageBuffer) -> TransformError {
    TransformError::InvalidBuffer {
        expected: image.pixel_count() * image.channels() as usize,
        actual: image.pixels().len(),
    }
}
