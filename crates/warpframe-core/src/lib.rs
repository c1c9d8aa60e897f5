//! Warpframe Core - Image transformation library
//!
//! This crate provides the core functionality for Warpframe: decoding
//! uploads into pixel buffers, brightness and geometric operators, a
//! pipeline that chains or branches them, and PNG/JPEG encoding.
//!
//! ```ignore
//! use warpframe_core::{codec, CompositionMode, Pipeline, TransformParams};
//!
//! let image = codec::decode(&upload)?;
//! let params = TransformParams { rotation: 30.0, ..Default::default() };
//! let output = Pipeline::default().run(&image, &params.to_spec()?, CompositionMode::Chain)?;
//! let files = output.encode(codec::ImageFormat::Png)?;
//! ```

pub mod affine;
pub mod buffer;
pub mod codec;
pub mod error;
pub mod params;
pub mod pipeline;
pub mod spec;
pub mod transform;

pub use affine::AffineTransform;
pub use buffer::{Background, ChannelOrder, ImageBuffer};
pub use codec::ImageFormat;
pub use error::TransformError;
pub use params::TransformParams;
pub use pipeline::{
    BranchResult, CompositionMode, EncodedImage, Pipeline, PipelineConfig, PipelineOutput,
};
pub use spec::{BrightnessMode, EdgePolicy, Operation, OperationKind, TransformSpec};
