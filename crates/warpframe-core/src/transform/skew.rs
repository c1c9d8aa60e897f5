//! Shear on a fixed-size canvas.

use crate::affine::shear;
use crate::buffer::{Background, ImageBuffer};
use crate::spec::EdgePolicy;
use crate::transform::apply_affine;
use crate::TransformError;

/// Skew an image with the shear matrix `[[1, kx], [ky, 1]]`.
///
/// The shear is anchored at the top-left corner: a source pixel at
/// `(x, y)` lands at `(x + kx*y, ky*x + y)`. Uncovered regions take
/// `background`.
///
/// # Errors
///
/// `InvalidParameter` when a factor is not finite or `|kx * ky| >= 1`.
pub fn apply_skew(
    image: &ImageBuffer,
    kx: f64,
    ky: f64,
    background: Background,
) -> Result<ImageBuffer, TransformError> {
    let matrix = shear(kx, ky)?;

    if kx == 0.0 && ky == 0.0 {
        return Ok(image.clone());
    }

    apply_affine(image, &matrix, EdgePolicy::Fill, background)
}
