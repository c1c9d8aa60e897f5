//! WASM bindings for the transformation pipeline.
//!
//! Parameters arrive as plain JS objects and are decoded with
//! `serde-wasm-bindgen`. Missing fields take their identity values, and an
//! omitted `config` uses the default pipeline configuration.
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, run_pipeline, run_branches } from '@warpframe/wasm';
//!
//! const source = decode_image(bytes);
//!
//! // Re-run on every slider change; `source` is never modified
//! const result = run_pipeline(source, { rotation: 15, scale_x: 0.8, scale_y: 0.8 });
//!
//! // One result per geometric operation, all from the brightened base
//! for (const { name, image } of run_branches(source, { brightness: 1.4, skew_x: 0.2 })) {
//!   draw(name, image);
//! }
//! ```

use serde::de::DeserializeOwned;
use warpframe_core::{
    CompositionMode, ImageBuffer, Pipeline, PipelineConfig, PipelineOutput, TransformError,
    TransformParams, TransformSpec,
};
use wasm_bindgen::prelude::*;

use crate::types::{to_js_error, JsImageBuffer};

/// Apply every slider in canonical order and return the final image.
///
/// # Arguments
///
/// * `image` - Source image
/// * `params` - `TransformParams`-shaped object (`brightness`, `rotation`, ...)
/// * `config` - Optional `{ background, branch_base }`
#[wasm_bindgen]
pub fn run_pipeline(
    image: &JsImageBuffer,
    params: JsValue,
    config: JsValue,
) -> Result<JsImageBuffer, JsValue> {
    let params: TransformParams = parse_or_default(params, "params")?;
    let config: PipelineConfig = parse_or_default(config, "config")?;
    chain_params(image.as_core(), &params, config)
        .map(JsImageBuffer::from)
        .map_err(to_js_error)
}

/// Apply an explicit operation list in the given order.
///
/// `spec` is an array such as
/// `[{ op: "skew", kx: 0.2, ky: 0 }, { op: "rotate", angle_degrees: 45 }]`.
#[wasm_bindgen]
pub fn run_spec(
    image: &JsImageBuffer,
    spec: JsValue,
    config: JsValue,
) -> Result<JsImageBuffer, JsValue> {
    let spec: TransformSpec = parse(spec, "spec")?;
    let config: PipelineConfig = parse_or_default(config, "config")?;
    Pipeline::new(config)
        .chain(image.as_core(), &spec)
        .map(JsImageBuffer::from)
        .map_err(to_js_error)
}

/// Branch mode: returns an array of `{ name, image }` objects.
///
/// Brightness (or the configured `branch_base`) is applied first; each
/// remaining operation that changes the image is then applied to that base
/// independently.
#[wasm_bindgen]
pub fn run_branches(
    image: &JsImageBuffer,
    params: JsValue,
    config: JsValue,
) -> Result<js_sys::Array, JsValue> {
    let params: TransformParams = parse_or_default(params, "params")?;
    let config: PipelineConfig = parse_or_default(config, "config")?;
    let results = branch_params(image.as_core(), &params, config).map_err(to_js_error)?;

    let array = js_sys::Array::new();
    for (name, result) in results {
        let entry = js_sys::Object::new();
        js_sys::Reflect::set(&entry, &"name".into(), &name.into())?;
        js_sys::Reflect::set(&entry, &"image".into(), &JsImageBuffer::from(result).into())?;
        array.push(&entry);
    }
    Ok(array)
}

pub(crate) fn chain_params(
    image: &ImageBuffer,
    params: &TransformParams,
    config: PipelineConfig,
) -> Result<ImageBuffer, TransformError> {
    Pipeline::new(config).chain(image, &params.to_spec()?)
}

/// Branch results for the sliders that are off their identity position.
pub(crate) fn branch_params(
    image: &ImageBuffer,
    params: &TransformParams,
    config: PipelineConfig,
) -> Result<Vec<(String, ImageBuffer)>, TransformError> {
    params.validate()?;
    let identity = TransformParams::default().to_spec()?;
    let spec: TransformSpec = params
        .to_spec()?
        .operations()
        .iter()
        .zip(identity.operations())
        .filter(|(op, unchanged)| op != unchanged)
        .map(|(op, _)| *op)
        .collect();

    match Pipeline::new(config).run(image, &spec, CompositionMode::Branch)? {
        PipelineOutput::Branches { results, .. } => {
            Ok(results.into_iter().map(|r| (r.name, r.image)).collect())
        }
        PipelineOutput::Single(result) => Ok(vec![("transformed".to_string(), result)]),
    }
}

fn parse<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

fn parse_or_default<T: DeserializeOwned + Default>(value: JsValue, what: &str) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    parse(value, what)
}
