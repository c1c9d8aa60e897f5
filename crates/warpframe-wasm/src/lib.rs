//! Warpframe WASM - WebAssembly bindings for Warpframe
//!
//! This crate exposes the warpframe-core pipeline to JavaScript/TypeScript
//! editors.
//!
//! # Module Structure
//!
//! - `types` - `JsImageBuffer`, the image handle passed between calls
//! - `decode` - PNG/JPEG decoding
//! - `encode` - PNG/JPEG encoding and download names
//! - `transform` - One binding per operator
//! - `pipeline` - Chained and branched runs driven by slider values
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, run_pipeline, encode_png } from '@warpframe/wasm';
//!
//! await init();
//!
//! const source = decode_image(new Uint8Array(await file.arrayBuffer()));
//! const result = run_pipeline(source, { brightness: 1.3, rotation: -20 });
//! const png = encode_png(result);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod pipeline;
mod transform;
mod types;

pub use decode::{decode_image, get_orientation};
pub use encode::{encode_jpeg, encode_png, result_file_name};
pub use pipeline::{run_branches, run_pipeline, run_spec};
pub use transform::{apply_brightness, apply_rotation, apply_scale, apply_skew, apply_translation};
pub use types::JsImageBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
