//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_png, encode_jpeg } from '@warpframe/wasm';
//!
//! const png = encode_png(result);
//! const blob = new Blob([png], { type: 'image/png' });
//!
//! const jpeg = encode_jpeg(result, 85);
//! ```

use crate::types::{to_js_error, JsImageBuffer};
use warpframe_core::codec::{self, ImageFormat, DEFAULT_JPEG_QUALITY};
use wasm_bindgen::prelude::*;

/// Encode an image as lossless PNG. Alpha is kept.
#[wasm_bindgen]
pub fn encode_png(image: &JsImageBuffer) -> Result<Vec<u8>, JsValue> {
    codec::encode(image.as_core(), ImageFormat::Png).map_err(to_js_error)
}

/// Encode an image as JPEG.
///
/// # Arguments
///
/// * `image` - The image to encode (alpha is dropped)
/// * `quality` - 1-100, defaults to 90 when omitted; out-of-range values are clamped
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsImageBuffer, quality: Option<u8>) -> Result<Vec<u8>, JsValue> {
    let quality = quality.unwrap_or(DEFAULT_JPEG_QUALITY);
    codec::encode(image.as_core(), ImageFormat::Jpeg { quality }).map_err(to_js_error)
}

/// Descriptive download name for a result, e.g. `rotate_image.png`.
///
/// `name` is a branch name from `run_branches`, or `transformed` for a
/// chained result.
#[wasm_bindgen]
pub fn result_file_name(name: &str, jpeg: bool) -> String {
    let format = if jpeg {
        ImageFormat::jpeg()
    } else {
        ImageFormat::Png
    };
    format.file_name(&format!("{name}_image"))
}
