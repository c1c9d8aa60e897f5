//! Translation on a fixed-size canvas with an explicit edge policy.

use crate::affine::translation;
use crate::buffer::{Background, ImageBuffer};
use crate::spec::{require_finite, EdgePolicy};
use crate::transform::apply_affine;
use crate::TransformError;

/// Shift image content by `(tx, ty)` pixels.
///
/// Positive `tx` moves content right, positive `ty` moves it down. With
/// [`EdgePolicy::Fill`] the exposed region takes `background`; with
/// [`EdgePolicy::Wrap`] content leaving one edge re-enters on the opposite
/// edge. Integer offsets copy pixels exactly; fractional offsets are
/// interpolated bilinearly.
///
/// # Errors
///
/// `InvalidParameter` when an offset is not finite.
pub fn apply_translation(
    image: &ImageBuffer,
    tx: f64,
    ty: f64,
    edge_policy: EdgePolicy,
    background: Background,
) -> Result<ImageBuffer, TransformError> {
    require_finite("tx", tx)?;
    require_finite("ty", ty)?;

    if tx == 0.0 && ty == 0.0 {
        return Ok(image.clone());
    }

    apply_affine(image, &translation(tx, ty), edge_policy, background)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 RGB image with a single nonzero pixel.
    fn single_pixel(x: usize, y: usize) -> ImageBuffer {
        let mut pixels = vec![0u8; 27];
        let idx = (y * 3 + x) * 3;
        pixels[idx..idx + 3].copy_from_slice(&[90, 160, 250]);
        ImageBuffer::rgb(3, 3, pixels).unwrap()
    }

    #[test]
    fn test_zero_translation_is_identity() {
        let img = single_pixel(1, 1);
        for policy in [EdgePolicy::Fill, EdgePolicy::Wrap] {
            assert_eq!(
                apply_translation(&img, 0.0, 0.0, policy, Background::Auto).unwrap(),
                img
            );
        }
    }

    #[test]
    fn test_fill_moves_pixel_right() {
        let img = single_pixel(1, 1);
        let out = apply_translation(&img, 1.0, 0.0, EdgePolicy::Fill, Background::Auto).unwrap();
        assert_eq!(out, single_pixel(2, 1));
    }

    #[test]
    fn test_fill_zeroes_vacated_column() {
        let img = ImageBuffer::rgb(3, 3, vec![200u8; 27]).unwrap();
        let out = apply_translation(&img, 1.0, 0.0, EdgePolicy::Fill, Background::Auto).unwrap();
        for y in 0..3 {
            assert_eq!(out.sample(0, y), Some(&[0u8, 0, 0][..]));
            assert_eq!(out.sample(1, y), Some(&[200u8, 200, 200][..]));
            assert_eq!(out.sample(2, y), Some(&[200u8, 200, 200][..]));
        }
    }

    #[test]
    fn test_fill_discards_pixel_leaving_canvas() {
        let img = single_pixel(2, 1);
        let out = apply_translation(&img, 1.0, 0.0, EdgePolicy::Fill, Background::Auto).unwrap();
        assert!(out.pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_wrap_reenters_left_edge() {
        let img = single_pixel(2, 1);
        let out = apply_translation(&img, 1.0, 0.0, EdgePolicy::Wrap, Background::Auto).unwrap();
        assert_eq!(out, single_pixel(0, 1));
    }

    #[test]
    fn test_wrap_negative_and_vertical() {
        let img = single_pixel(0, 0);
        let out = apply_translation(&img, -1.0, -1.0, EdgePolicy::Wrap, Background::Auto).unwrap();
        assert_eq!(out, single_pixel(2, 2));
    }

    #[test]
    fn test_wrap_large_offset() {
        let img = single_pixel(1, 0);
        // 7 mod 3 == 1
        let out = apply_translation(&img, 7.0, 0.0, EdgePolicy::Wrap, Background::Auto).unwrap();
        assert_eq!(out, single_pixel(2, 0));
    }

    #[test]
    fn test_fill_with_custom_background() {
        let img = single_pixel(1, 1);
        let out = apply_translation(
            &img,
            0.0,
            2.0,
            EdgePolicy::Fill,
            Background::Color([255, 0, 0, 255]),
        )
        .unwrap();
        assert_eq!(out.sample(0, 0), Some(&[255u8, 0, 0][..]));
        assert_eq!(out.sample(1, 1), Some(&[255u8, 0, 0][..]));
    }

    #[test]
    fn test_non_finite_offset_rejected() {
        let img = single_pixel(1, 1);
        let err = apply_translation(&img, f64::INFINITY, 0.0, EdgePolicy::Fill, Background::Auto)
            .unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
