//! Operation descriptors and the ordered [`TransformSpec`].
//!
//! A spec is built fresh for every pipeline invocation from the caller's
//! current parameter values and is consumed once.

use serde::{Deserialize, Serialize};

use crate::affine::{validate_scale, validate_shear};
use crate::buffer::{Background, ImageBuffer};
use crate::transform::{apply_brightness, apply_rotation, apply_scale, apply_skew, apply_translation};
use crate::TransformError;

/// How brightness is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BrightnessMode {
    /// Multiply every colour sample by the factor.
    #[default]
    PixelMultiply,
    /// Scale only the HSV value channel, preserving hue and saturation.
    ValueChannelScale,
}

/// What happens to content shifted past the canvas edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgePolicy {
    /// Discard content that leaves the canvas and fill the exposed area
    /// with the background.
    #[default]
    Fill,
    /// Toroidal addressing: content leaving one edge re-enters at the
    /// opposite edge.
    Wrap,
}

/// The kind of an [`Operation`], without its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperationKind {
    Brightness,
    Rotate,
    Scale,
    Translate,
    Skew,
}

impl OperationKind {
    /// Stable lowercase name, used to label branch results.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::Brightness => "brightness",
            OperationKind::Rotate => "rotate",
            OperationKind::Scale => "scale",
            OperationKind::Translate => "translate",
            OperationKind::Skew => "skew",
        }
    }
}

/// A single image-to-image operation with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Operation {
    /// Scale intensity by `factor` (>= 0, 1.0 is the identity).
    Brightness {
        factor: f64,
        #[serde(default)]
        mode: BrightnessMode,
    },
    /// Rotate clockwise about the image centre on a fixed-size canvas.
    Rotate { angle_degrees: f64 },
    /// Resize the canvas to `round(w*sx) x round(h*sy)`.
    Scale { sx: f64, sy: f64 },
    /// Shift content by `(tx, ty)` pixels on a fixed-size canvas.
    Translate {
        tx: f64,
        ty: f64,
        #[serde(default)]
        edge_policy: EdgePolicy,
    },
    /// Shear `[[1, kx], [ky, 1]]` on a fixed-size canvas.
    Skew { kx: f64, ky: f64 },
}

impl Operation {
    /// The operation's kind.
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Brightness { .. } => OperationKind::Brightness,
            Operation::Rotate { .. } => OperationKind::Rotate,
            Operation::Scale { .. } => OperationKind::Scale,
            Operation::Translate { .. } => OperationKind::Translate,
            Operation::Skew { .. } => OperationKind::Skew,
        }
    }

    /// Check parameters without touching any pixels.
    pub fn validate(&self) -> Result<(), TransformError> {
        match *self {
            Operation::Brightness { factor, .. } => validate_brightness(factor),
            Operation::Rotate { angle_degrees } => require_finite("angle_degrees", angle_degrees),
            Operation::Scale { sx, sy } => validate_scale(sx, sy),
            Operation::Translate { tx, ty, .. } => {
                require_finite("tx", tx)?;
                require_finite("ty", ty)
            }
            Operation::Skew { kx, ky } => validate_shear(kx, ky),
        }
    }

    /// Apply this operation to `image`, producing a new buffer.
    pub fn apply(
        &self,
        image: &ImageBuffer,
        background: Background,
    ) -> Result<ImageBuffer, TransformError> {
        tracing::trace!(operation = ?self, "applying operation");
        match *self {
            Operation::Brightness { factor, mode } => apply_brightness(image, factor, mode),
            Operation::Rotate { angle_degrees } => apply_rotation(image, angle_degrees, background),
            Operation::Scale { sx, sy } => apply_scale(image, sx, sy),
            Operation::Translate {
                tx,
                ty,
                edge_policy,
            } => apply_translation(image, tx, ty, edge_policy, background),
            Operation::Skew { kx, ky } => apply_skew(image, kx, ky, background),
        }
    }
}

pub(crate) fn validate_brightness(factor: f64) -> Result<(), TransformError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(TransformError::invalid_parameter(
            "factor",
            format!("brightness factor must be finite and >= 0, got {factor}"),
        ));
    }
    Ok(())
}

pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<(), TransformError> {
    if !value.is_finite() {
        return Err(TransformError::invalid_parameter(
            name,
            format!("must be finite, got {value}"),
        ));
    }
    Ok(())
}

/// An ordered sequence of operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransformSpec {
    operations: Vec<Operation>,
}

impl TransformSpec {
    /// Create an empty spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation, builder style.
    pub fn with(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    /// Append an operation.
    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// The operations in application order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Validate every operation, stopping at the first failure.
    pub fn validate(&self) -> Result<(), TransformError> {
        self.operations.iter().try_for_each(Operation::validate)
    }
}

impl From<Vec<Operation>> for TransformSpec {
    fn from(operations: Vec<Operation>) -> Self {
        Self { operations }
    }
}

impl FromIterator<Operation> for TransformSpec {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}
