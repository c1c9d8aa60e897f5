//! PNG and JPEG encoding.
//!
//! PNG is lossless: a buffer that came out of [`super::decode`] from a PNG
//! round-trips byte-for-byte. JPEG is lossy and drops alpha.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::ImageFormat;
use crate::buffer::{ChannelOrder, ImageBuffer};
use crate::TransformError;

/// Encode a buffer in the requested format.
///
/// Buffers in BGR order are normalised to RGB first.
///
/// # Errors
///
/// Returns `Encode` if the underlying encoder fails.
pub fn encode(image: &ImageBuffer, format: ImageFormat) -> Result<Vec<u8>, TransformError> {
    let rgb = image.to_channel_order(ChannelOrder::Rgb);
    let bytes = match format {
        ImageFormat::Png => encode_png(&rgb)?,
        ImageFormat::Jpeg { quality } => encode_jpeg(&rgb, quality)?,
    };

    tracing::debug!(
        ?format,
        width = image.width(),
        height = image.height(),
        bytes = bytes.len(),
        "encoded image"
    );

    Ok(bytes)
}

fn encode_png(image: &ImageBuffer) -> Result<Vec<u8>, TransformError> {
    let color = if image.has_alpha() {
        ExtendedColorType::Rgba8
    } else {
        ExtendedColorType::Rgb8
    };

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(image.pixels(), image.width(), image.height(), color)
        .map_err(|e| TransformError::Encode(e.to_string()))?;

    Ok(buffer.into_inner())
}

fn encode_jpeg(image: &ImageBuffer, quality: u8) -> Result<Vec<u8>, TransformError> {
    // Clamp quality to valid range (1-100)
    let quality = quality.clamp(1, 100);

    let rgb: Vec<u8> = if image.has_alpha() {
        image
            .pixels()
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    } else {
        image.pixels().to_vec()
    };

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, image.width(), image.height(), ExtendedColorType::Rgb8)
        .map_err(|e| TransformError::Encode(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
