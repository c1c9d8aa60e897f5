//! Image codec for warpframe.
//!
//! This module provides functionality for:
//! - Decoding uploaded PNG and baseline JPEG bytes into an [`ImageBuffer`](crate::ImageBuffer)
//! - Applying JPEG EXIF orientation so every buffer starts upright
//! - Encoding a buffer back to lossless PNG or lossy JPEG
//!
//! All operations are synchronous and work on in-memory bytes; reading
//! files is left to the caller.
//!
//! # Examples
//!
//! ```ignore
//! use warpframe_core::codec::{decode, encode, ImageFormat};
//!
//! let image = decode(&upload_bytes)?;
//! let png = encode(&image, ImageFormat::Png)?;
//! ```

mod decode;
mod encode;

use serde::{Deserialize, Serialize};

pub use decode::{decode, get_orientation, Orientation};
pub use encode::encode;

/// Largest width or height accepted from an upload.
pub const MAX_DECODE_DIMENSION: u32 = 16_384;

/// Default JPEG quality when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Lossy JPEG with quality 1-100 (values outside are clamped).
    Jpeg { quality: u8 },
}

impl ImageFormat {
    /// JPEG at [`DEFAULT_JPEG_QUALITY`].
    pub fn jpeg() -> Self {
        ImageFormat::Jpeg {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg { .. } => "jpg",
        }
    }

    /// `<stem>.<extension>`, e.g. `transformed_image.png`.
    pub fn file_name(self, stem: &str) -> String {
        format!("{stem}.{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names() {
        assert_eq!(ImageFormat::Png.file_name("transformed_image"), "transformed_image.png");
        assert_eq!(ImageFormat::jpeg().file_name("rotate_image"), "rotate_image.jpg");
    }

    #[test]
    fn test_default_is_png() {
        assert_eq!(ImageFormat::default(), ImageFormat::Png);
    }

    #[test]
    fn test_format_serde() {
        let f: ImageFormat = serde_json::from_str(r#"{"format": "jpeg", "quality": 75}"#).unwrap();
        assert_eq!(f, ImageFormat::Jpeg { quality: 75 });
        let f: ImageFormat = serde_json::from_str(r#"{"format": "png"}"#).unwrap();
        assert_eq!(f, ImageFormat::Png);
    }
}
