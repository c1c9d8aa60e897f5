//! PNG/JPEG decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, Limits};
use serde::{Deserialize, Serialize};

use super::MAX_DECODE_DIMENSION;
use crate::buffer::ImageBuffer;
use crate::TransformError;

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Decode PNG or JPEG bytes into an [`ImageBuffer`].
///
/// JPEG EXIF orientation is applied so the buffer is upright. Sources with
/// an alpha channel become 4-channel RGBA, everything else 3-channel RGB.
///
/// # Errors
///
/// Returns `InvalidImage` for empty input, unrecognised or unsupported
/// formats, corrupt or truncated data, and images that are zero-sized or
/// wider or taller than [`MAX_DECODE_DIMENSION`]. No partial buffer is ever
/// returned.
pub fn decode(bytes: &[u8]) -> Result<ImageBuffer, TransformError> {
    if bytes.is_empty() {
        return Err(TransformError::InvalidImage("empty input".to_string()));
    }

    let mut reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| TransformError::InvalidImage(e.to_string()))?;

    let format = match reader.format() {
        Some(f @ (image::ImageFormat::Png | image::ImageFormat::Jpeg)) => f,
        Some(other) => {
            return Err(TransformError::InvalidImage(format!(
                "unsupported format: {other:?}"
            )))
        }
        None => {
            return Err(TransformError::InvalidImage(
                "unrecognised image format".to_string(),
            ))
        }
    };

    // The JPEG decoder fills in missing scan data instead of failing
    if format == image::ImageFormat::Jpeg && !has_jpeg_end_marker(bytes) {
        return Err(TransformError::InvalidImage(
            "truncated JPEG: missing end-of-image marker".to_string(),
        ));
    }

    let mut limits = Limits::default();
    limits.max_image_width = Some(MAX_DECODE_DIMENSION);
    limits.max_image_height = Some(MAX_DECODE_DIMENSION);
    reader.limits(limits);

    let img = reader
        .decode()
        .map_err(|e| TransformError::InvalidImage(e.to_string()))?;

    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(TransformError::InvalidImage(format!(
            "zero-sized image ({width}x{height})"
        )));
    }
    if width > MAX_DECODE_DIMENSION || height > MAX_DECODE_DIMENSION {
        return Err(TransformError::InvalidImage(format!(
            "image {width}x{height} exceeds the {MAX_DECODE_DIMENSION}px limit"
        )));
    }

    let orientation = if format == image::ImageFormat::Jpeg {
        extract_orientation(bytes)
    } else {
        Orientation::Normal
    };
    let img = apply_orientation(img, orientation);

    let buffer = if img.color().has_alpha() {
        ImageBuffer::from_rgba_image(img.into_rgba8())
    } else {
        ImageBuffer::from_rgb_image(img.into_rgb8())
    };

    tracing::debug!(
        ?format,
        ?orientation,
        width = buffer.width(),
        height = buffer.height(),
        channels = buffer.channels(),
        "decoded image"
    );

    Ok(buffer)
}

/// Extract EXIF orientation from image bytes (for external use).
///
/// Returns `Orientation::Normal` if no EXIF data is found.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

/// Whether JPEG bytes end with EOI (`FF D9`), ignoring trailing zero padding.
fn has_jpeg_end_marker(bytes: &[u8]) -> bool {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0x00)
        .map_or(0, |i| i + 1);
    bytes[..end].ends_with(&[0xFF, 0xD9])
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
