//! Image rotation about the centre on a fixed-size canvas.
//!
//! The rotation uses inverse mapping through [`apply_affine`]: for each
//! pixel in the output image we compute which source position it came
//! from and interpolate bilinearly.
//!
//! For rotation by angle θ about centre `(cx, cy)`, the forward transform is:
//! ```text
//! dst_x = (src_x - cx) * cos(θ) - (src_y - cy) * sin(θ) + cx
//! dst_y = (src_x - cx) * sin(θ) + (src_y - cy) * cos(θ) + cy
//! ```
//!
//! The centre is the middle of the pixel grid, `((w-1)/2, (h-1)/2)`, so a
//! 180° turn maps pixels exactly onto pixels.

use crate::affine::rotation;
use crate::buffer::{Background, ImageBuffer};
use crate::spec::{require_finite, EdgePolicy};
use crate::transform::apply_affine;
use crate::TransformError;

/// Rotate an image clockwise by `angle_degrees` about its centre.
///
/// The canvas keeps the input's dimensions. Corners that rotate out of the
/// frame are lost and uncovered areas take `background`.
///
/// # Errors
///
/// `InvalidParameter` when the angle is not finite.
pub fn apply_rotation(
    image: &ImageBuffer,
    angle_degrees: f64,
    background: Background,
) -> Result<ImageBuffer, TransformError> {
    require_finite("angle_degrees", angle_degrees)?;

    // Fast path: no rotation needed (including multiples of 360)
    if angle_degrees.rem_euclid(360.0) == 0.0 {
        return Ok(image.clone());
    }

    let (cx, cy) = center(image);
    apply_affine(
        image,
        &rotation(angle_degrees, cx, cy),
        EdgePolicy::Fill,
        background,
    )
}

/// Centre of the pixel grid.
fn center(image: &ImageBuffer) -> (f64, f64) {
    (
        (image.width() as f64 - 1.0) / 2.0,
        (image.height() as f64 - 1.0) / 2.0,
    )
}
