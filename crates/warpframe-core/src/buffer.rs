//! In-memory raster representation.
//!
//! [`ImageBuffer`] is immutable once constructed: every operator returns a
//! new buffer and never touches its input, so one decoded upload can be
//! reused across any number of pipeline runs.

use serde::{Deserialize, Serialize};

use crate::TransformError;

/// Layout of the colour channels inside each pixel.
///
/// Geometric operators do not care about channel order. Brightness in
/// [`BrightnessMode::ValueChannelScale`](crate::BrightnessMode) converts
/// explicitly based on this tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Red, green, blue (and alpha last when present).
    #[default]
    Rgb,
    /// Blue, green, red (and alpha last when present).
    Bgr,
}

/// Colour used for destination pixels that map outside the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    /// Fully transparent when the buffer has alpha, black otherwise.
    #[default]
    Auto,
    /// Explicit colour, given as RGBA regardless of the buffer's layout.
    Color([u8; 4]),
}

impl Background {
    /// Resolve to a pixel in the layout of a buffer with the given shape.
    ///
    /// Only the first `channels` entries of the result are meaningful.
    pub fn resolve(self, channels: u8, order: ChannelOrder) -> [u8; 4] {
        match self {
            Background::Auto => [0, 0, 0, 0],
            Background::Color([r, g, b, a]) => {
                let a = if channels == 4 { a } else { 255 };
                match order {
                    ChannelOrder::Rgb => [r, g, b, a],
                    ChannelOrder::Bgr => [b, g, r, a],
                }
            }
        }
    }
}

/// A decoded raster image with 8-bit interleaved samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    channels: u8,
    channel_order: ChannelOrder,
    pixels: Vec<u8>,
}

impl ImageBuffer {
    /// Create a buffer from raw parts, validating the shape.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` when a dimension is zero or `channels` is not 3 or 4.
    /// - `InvalidBuffer` when `pixels.len() != width * height * channels`.
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        channel_order: ChannelOrder,
        pixels: Vec<u8>,
    ) -> Result<Self, TransformError> {
        if width == 0 || height == 0 {
            return Err(TransformError::invalid_parameter(
                "dimensions",
                format!("width and height must be non-zero, got {width}x{height}"),
            ));
        }
        if channels != 3 && channels != 4 {
            return Err(TransformError::invalid_parameter(
                "channels",
                format!("must be 3 or 4, got {channels}"),
            ));
        }
        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected {
            return Err(TransformError::InvalidBuffer {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            channel_order,
            pixels,
        })
    }

    /// Create a 3-channel RGB buffer.
    pub fn rgb(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TransformError> {
        Self::new(width, height, 3, ChannelOrder::Rgb, pixels)
    }

    /// Create a 4-channel RGBA buffer.
    pub fn rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, TransformError> {
        Self::new(width, height, 4, ChannelOrder::Rgb, pixels)
    }

    /// Construct from parts already known to be consistent.
    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        channels: u8,
        channel_order: ChannelOrder,
        pixels: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * channels as usize,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            channel_order,
            pixels,
        }
    }

    /// Create a buffer from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_parts(width, height, 3, ChannelOrder::Rgb, img.into_raw())
    }

    /// Create a buffer from an `image::RgbaImage`.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::from_parts(width, height, 4, ChannelOrder::Rgb, img.into_raw())
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Samples per pixel (3 or 4).
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Channel layout tag.
    pub fn channel_order(&self) -> ChannelOrder {
        self.channel_order
    }

    /// Whether the last channel is alpha.
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Row-major, channel-interleaved samples.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consume the buffer and return its samples.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Byte offset of pixel `(x, y)`, or `None` when out of bounds.
    #[inline]
    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * self.channels as usize)
    }

    /// Read the pixel at `(x, y)`.
    ///
    /// Returns `None` outside the image; callers resolve that through
    /// their own edge policy.
    #[inline]
    pub fn sample(&self, x: i64, y: i64) -> Option<&[u8]> {
        self.offset(x, y)
            .map(|idx| &self.pixels[idx..idx + self.channels as usize])
    }

    /// Return a copy of this buffer with pixel `(x, y)` replaced.
    ///
    /// Single-pixel edits for callers; the operators build whole rows
    /// directly instead of copying the buffer per pixel.
    ///
    /// Extra entries in `pixel` are ignored and missing ones leave the
    /// original sample in place. Out-of-bounds coordinates return an
    /// unchanged copy.
    pub fn with_sample(&self, x: i64, y: i64, pixel: &[u8]) -> Self {
        let mut out = self.clone();
        if let Some(idx) = self.offset(x, y) {
            let dst = &mut out.pixels[idx..idx + self.channels as usize];
            for (d, s) in dst.iter_mut().zip(pixel) {
                *d = *s;
            }
        }
        out
    }

    /// Return a copy with the colour channels laid out in `order`.
    pub fn to_channel_order(&self, order: ChannelOrder) -> Self {
        if order == self.channel_order {
            return self.clone();
        }
        let mut pixels = self.pixels.clone();
        for px in pixels.chunks_exact_mut(self.channels as usize) {
            px.swap(0, 2);
        }
        Self::from_parts(self.width, self.height, self.channels, order, pixels)
    }
}

/// Clamp a sample to `[0, 255]` and round to nearest.
#[inline]
pub(crate) fn clamp_round(v: f64) -> u8 {
    v.clamp(0.0, 255.0).round() as u8
}

/// Clamp a sample to `[0, 255]` and truncate toward zero.
#[inline]
pub(crate) fn clamp_floor(v: f64) -> u8 {
    v.clamp(0.0, 255.0) as u8
}
