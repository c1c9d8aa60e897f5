//! Ordering and composition of operators.
//!
//! A [`Pipeline`] runs a [`TransformSpec`] against a source image in one of
//! two modes:
//!
//! - [`CompositionMode::Chain`]: operations apply strictly in spec order,
//!   each consuming the previous output, so `run([f, g])(img) == g(f(img))`.
//! - [`CompositionMode::Branch`]: the operations whose kind is listed in
//!   [`PipelineConfig::branch_base`] (brightness by default) are chained to
//!   build a shared base image, then every remaining operation is applied
//!   independently to that base and returned as a named sibling result.
//!
//! The whole spec is validated before any pixel work starts, including the
//! canvas size every scale step will produce, and the first failing
//! operator aborts the run. The source image is only borrowed, so
//! one decoded upload can be re-run on every parameter change.
//!
//! ```ignore
//! use warpframe_core::{codec, CompositionMode, Operation, Pipeline, TransformSpec};
//!
//! let image = codec::decode(&bytes)?;
//! let spec = TransformSpec::new()
//!     .with(Operation::Rotate { angle_degrees: 15.0 })
//!     .with(Operation::Scale { sx: 0.5, sy: 0.5 });
//! let output = Pipeline::default().run(&image, &spec, CompositionMode::Chain)?;
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::{Background, ImageBuffer};
use crate::codec::{self, ImageFormat};
use crate::spec::{Operation, OperationKind, TransformSpec};
use crate::transform::scaled_dimensions;
use crate::TransformError;

/// Stem used for the chain-mode result's download name.
pub const CHAIN_RESULT_NAME: &str = "transformed";

/// How operators are composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompositionMode {
    /// Apply operations sequentially to one evolving buffer.
    #[default]
    Chain,
    /// Apply non-base operations independently to a shared base buffer.
    Branch,
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Fill colour for regions uncovered by geometric operators.
    pub background: Background,
    /// Operation kinds that build the shared base in branch mode.
    pub branch_base: Vec<OperationKind>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            background: Background::Auto,
            branch_base: vec![OperationKind::Brightness],
        }
    }
}

/// One named result of a branch-mode run.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchResult {
    /// Operation name, suffixed `-2`, `-3`, ... when a kind repeats.
    pub name: String,
    pub image: ImageBuffer,
}

/// Encoded form of a pipeline result.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub name: String,
    /// Descriptive download name, e.g. `transformed_image.png`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Result of [`Pipeline::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutput {
    /// Chain mode: the final buffer.
    Single(ImageBuffer),
    /// Branch mode: the shared base and one result per remaining operation.
    Branches {
        base: ImageBuffer,
        results: Vec<BranchResult>,
    },
}

impl PipelineOutput {
    /// All result images with their names, in spec order.
    ///
    /// Chain mode yields a single entry named [`CHAIN_RESULT_NAME`]. Branch
    /// mode yields the sibling results; the base is available separately.
    pub fn images(&self) -> Vec<(&str, &ImageBuffer)> {
        match self {
            PipelineOutput::Single(image) => vec![(CHAIN_RESULT_NAME, image)],
            PipelineOutput::Branches { results, .. } => results
                .iter()
                .map(|r| (r.name.as_str(), &r.image))
                .collect(),
        }
    }

    /// Look up a result by name.
    pub fn get(&self, name: &str) -> Option<&ImageBuffer> {
        self.images()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, image)| image)
    }

    /// The chain-mode buffer, or `None` for branch output.
    pub fn into_single(self) -> Option<ImageBuffer> {
        match self {
            PipelineOutput::Single(image) => Some(image),
            PipelineOutput::Branches { .. } => None,
        }
    }

    /// Encode every result image.
    pub fn encode(&self, format: ImageFormat) -> Result<Vec<EncodedImage>, TransformError> {
        self.images()
            .into_iter()
            .map(|(name, image)| {
                Ok(EncodedImage {
                    name: name.to_string(),
                    file_name: format.file_name(&format!("{name}_image")),
                    bytes: codec::encode(image, format)?,
                })
            })
            .collect()
    }
}

/// Stateless runner for transform specs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run `spec` against `image` in the given mode.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` from validation (before any resampling), or the
    /// first error raised by an operator. No partial output is returned.
    pub fn run(
        &self,
        image: &ImageBuffer,
        spec: &TransformSpec,
        mode: CompositionMode,
    ) -> Result<PipelineOutput, TransformError> {
        tracing::debug!(
            ?mode,
            operations = spec.len(),
            width = image.width(),
            height = image.height(),
            "running pipeline"
        );
        match mode {
            CompositionMode::Chain => self.chain(image, spec).map(PipelineOutput::Single),
            CompositionMode::Branch => self.branch(image, spec),
        }
    }

    /// Chain mode: apply every operation in order.
    pub fn chain(
        &self,
        image: &ImageBuffer,
        spec: &TransformSpec,
    ) -> Result<ImageBuffer, TransformError> {
        spec.validate()?;
        planned_dimensions(image, spec.operations())?;
        self.apply_all(image, spec.operations().iter())
    }

    /// Branch mode: build the base, then fan out the remaining operations.
    pub fn branch(
        &self,
        image: &ImageBuffer,
        spec: &TransformSpec,
    ) -> Result<PipelineOutput, TransformError> {
        spec.validate()?;

        let (base_ops, branch_ops): (Vec<&Operation>, Vec<&Operation>) = spec
            .operations()
            .iter()
            .partition(|op| self.config.branch_base.contains(&op.kind()));

        let base_size = planned_dimensions(image, base_ops.iter().copied())?;
        for op in &branch_ops {
            plan_step(base_size, op)?;
        }

        let base = self.apply_all(image, base_ops.into_iter())?;

        let names = branch_names(&branch_ops);
        let results = branch_ops
            .into_iter()
            .zip(names)
            .map(|(op, name)| {
                Ok(BranchResult {
                    name,
                    image: op.apply(&base, self.config.background)?,
                })
            })
            .collect::<Result<Vec<_>, TransformError>>()?;

        Ok(PipelineOutput::Branches { base, results })
    }

    fn apply_all<'a>(
        &self,
        image: &ImageBuffer,
        operations: impl Iterator<Item = &'a Operation>,
    ) -> Result<ImageBuffer, TransformError> {
        let mut current: Option<ImageBuffer> = None;
        for op in operations {
            let source = current.as_ref().unwrap_or(image);
            current = Some(op.apply(source, self.config.background)?);
        }
        Ok(current.unwrap_or_else(|| image.clone()))
    }
}

/// Run with the default configuration.
pub fn run(
    image: &ImageBuffer,
    spec: &TransformSpec,
    mode: CompositionMode,
) -> Result<PipelineOutput, TransformError> {
    Pipeline::default().run(image, spec, mode)
}

/// Canvas size after `operations`, checked step by step without touching pixels.
fn planned_dimensions<'a>(
    image: &ImageBuffer,
    operations: impl IntoIterator<Item = &'a Operation>,
) -> Result<(u32, u32), TransformError> {
    operations
        .into_iter()
        .try_fold((image.width(), image.height()), plan_step)
}

fn plan_step(size: (u32, u32), op: &Operation) -> Result<(u32, u32), TransformError> {
    match *op {
        Operation::Scale { sx, sy } => scaled_dimensions(size.0, size.1, sx, sy),
        _ => Ok(size),
    }
}

/// Unique names for branch results: `rotate`, `rotate-2`, ...
fn branch_names(operations: &[&Operation]) -> Vec<String> {
    let mut seen: Vec<(OperationKind, usize)> = Vec::new();
    operations
        .iter()
        .map(|op| {
            let kind = op.kind();
            let count = match seen.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, n)) => {
                    *n += 1;
                    *n
                }
                None => {
                    seen.push((kind, 1));
                    1
                }
            };
            if count == 1 {
                kind.name().to_string()
            } else {
                format!("{}-{count}", kind.name())
            }
        })
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
