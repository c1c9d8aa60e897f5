//! WASM-compatible wrapper types for image data.
//!
//! [`JsImageBuffer`] owns a core [`ImageBuffer`] and exposes its dimensions
//! and pixel bytes to JavaScript.

use warpframe_core::{ImageBuffer, TransformError};
use wasm_bindgen::prelude::*;

/// A decoded or transformed image, held in WASM memory.
///
/// # Memory Management
///
/// Calling `pixels()` copies the samples out to a JavaScript `Uint8Array`.
/// Keep images in WASM memory between pipeline runs and only extract pixels
/// when drawing.
#[wasm_bindgen]
pub struct JsImageBuffer {
    inner: ImageBuffer,
}

#[wasm_bindgen]
impl JsImageBuffer {
    /// Create an image from raw interleaved samples.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - 3 for RGB, 4 for RGBA
    /// * `pixels` - Row-major samples, `width * height * channels` bytes
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<JsImageBuffer, JsValue> {
        Self::try_new(width, height, channels, pixels).map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// 3 (RGB) or 4 (RGBA)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels()
    }

    #[wasm_bindgen(getter)]
    pub fn has_alpha(&self) -> bool {
        self.inner.has_alpha()
    }

    /// Number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns the samples as a Uint8Array (always RGB order).
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup automatically.
    pub fn free(self) {}
}

impl JsImageBuffer {
    pub(crate) fn try_new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, TransformError> {
        ImageBuffer::new(width, height, channels, Default::default(), pixels).map(Self::from)
    }

    pub(crate) fn as_core(&self) -> &ImageBuffer {
        &self.inner
    }
}

impl From<ImageBuffer> for JsImageBuffer {
    fn from(inner: ImageBuffer) -> Self {
        Self { inner }
    }
}

/// Map a core error to a JS exception value.
pub(crate) fn to_js_error(e: TransformError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_image_buffer_creation() {
        let img = JsImageBuffer::try_new(100, 50, 3, vec![0u8; 100 * 50 * 3]).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.channels(), 3);
        assert!(!img.has_alpha());
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_js_image_buffer_pixels() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8, 4, 2];
        let img = JsImageBuffer::try_new(2, 1, 4, pixels.clone()).unwrap();
        assert!(img.has_alpha());
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_try_new_rejects_bad_length() {
        let err = JsImageBuffer::try_new(10, 10, 3, vec![0u8; 20]).err().unwrap();
        assert!(matches!(err, TransformError::InvalidBuffer { .. }));
    }

    #[test]
    fn test_from_core() {
        let core = ImageBuffer::rgb(4, 2, vec![7u8; 24]).unwrap();
        let js = JsImageBuffer::from(core.clone());
        assert_eq!(js.as_core(), &core);
    }
}
