//! Image decoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image } from '@warpframe/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const image = decode_image(bytes);
//! console.log(`Decoded ${image.width}x${image.height}, ${image.channels} channels`);
//! ```

use crate::types::{to_js_error, JsImageBuffer};
use warpframe_core::codec;
use wasm_bindgen::prelude::*;

/// Decode PNG or JPEG bytes.
///
/// JPEG EXIF orientation is applied. Images with alpha decode to 4 channels,
/// everything else to 3.
///
/// # Errors
///
/// Throws for empty input, unsupported formats and corrupt or truncated data.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsImageBuffer, JsValue> {
    codec::decode(bytes)
        .map(JsImageBuffer::from)
        .map_err(to_js_error)
}

/// EXIF orientation value (1-8) of the given bytes, 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    codec::get_orientation(bytes) as u8
}
