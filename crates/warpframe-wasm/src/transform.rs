//! WASM bindings for the individual operators.
//!
//! Each binding applies one operator to a fresh copy of the input; the
//! source image is never modified. Uncovered regions use the automatic
//! background (transparent with alpha, black otherwise).

use crate::types::{to_js_error, JsImageBuffer};
use warpframe_core::transform as ops;
use warpframe_core::{Background, BrightnessMode, EdgePolicy};
use wasm_bindgen::prelude::*;

/// Scale intensity by `factor`.
///
/// # Arguments
///
/// * `factor` - 1.0 is unchanged, 0.0 is black; must be >= 0
/// * `value_channel` - Scale the HSV value channel instead of each sample
#[wasm_bindgen]
pub fn apply_brightness(
    image: &JsImageBuffer,
    factor: f64,
    value_channel: bool,
) -> Result<JsImageBuffer, JsValue> {
    let mode = if value_channel {
        BrightnessMode::ValueChannelScale
    } else {
        BrightnessMode::PixelMultiply
    };
    ops::apply_brightness(image.as_core(), factor, mode)
        .map(JsImageBuffer::from)
        .map_err(to_js_error)
}

/// Rotate clockwise about the centre. The canvas keeps its size.
///
/// ```typescript
/// const rotated = apply_rotation(source, 30.0);
/// ```
#[wasm_bindgen]
pub fn apply_rotation(image: &JsImageBuffer, angle_degrees: f64) -> Result<JsImageBuffer, JsValue> {
    ops::apply_rotation(image.as_core(), angle_degrees, Background::Auto)
        .map(JsImageBuffer::from)
        .map_err(to_js_error)
}

/// Resize by independent horizontal and vertical factors.
#[wasm_bindgen]
pub fn apply_scale(image: &JsImageBuffer, sx: f64, sy: f64) -> Result<JsImageBuffer, JsValue> {
    ops::apply_scale(image.as_core(), sx, sy)
        .map(JsImageBuffer::from)
        .map_err(to_js_error)
}

/// Shift content by `(tx, ty)` pixels.
///
/// With `wrap`, content leaving one edge re-enters at the opposite edge;
/// otherwise the exposed area is filled.
#[wasm_bindgen]
pub fn apply_translation(
    image: &JsImageBuffer,
    tx: f64,
    ty: f64,
    wrap: bool,
) -> Result<JsImageBuffer, JsValue> {
    let edge_policy = if wrap { EdgePolicy::Wrap } else { EdgePolicy::Fill };
    ops::apply_translation(image.as_core(), tx, ty, edge_policy, Background::Auto)
        .map(JsImageBuffer::from)
        .map_err(to_js_error)
}

/// Shear anchored at the top-left corner.
#[wasm_bindgen]
pub fn apply_skew(image: &JsImageBuffer, kx: f64, ky: f64) -> Result<JsImageBuffer, JsValue> {
    ops::apply_skew(image.as_core(), kx, ky, Background::Auto)
        .map(JsImageBuffer::from)
        .map_err(to_js_error)
}
