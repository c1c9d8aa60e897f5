//! Error types shared by the codec, the operators and the pipeline.

use thiserror::Error;

/// Errors produced anywhere in the transformation pipeline.
///
/// Per-pixel numeric overflow is never an error: samples are clamped to
/// `[0, 255]` instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransformError {
    /// The input bytes could not be decoded into a usable image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A parameter is out of range or would produce a degenerate transform.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter (e.g. `sx`, `factor`).
        name: &'static str,
        /// Human-readable explanation.
        reason: String,
    },

    /// Raw pixel data does not match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidBuffer { expected: usize, actual: usize },

    /// The encoder rejected the buffer.
    #[error("Encoding failed: {0}")]
    Encode(String),
}

impl TransformError {
    /// Shorthand for building an [`TransformError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(parameter = name, %reason, "rejected parameter");
        Self::InvalidParameter { name, reason }
    }

    /// Returns true for [`TransformError::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }

    /// Returns true for [`TransformError::InvalidImage`].
    pub fn is_invalid_image(&self) -> bool {
        matches!(self, Self::InvalidImage(_))
    }
}
