//! Brightness adjustment.
//!
//! Two modes are supported, selected explicitly:
//!
//! - [`BrightnessMode::PixelMultiply`]: `out = floor(clamp(in * factor, 0, 255))`
//!   for every colour sample. `255 * 0.5` becomes `127`.
//! - [`BrightnessMode::ValueChannelScale`]: convert to HSV, scale `V` by the
//!   factor, clamp it to `[0, 1]`, convert back rounding to nearest. Hue and
//!   saturation are preserved.
//!
//! Alpha is never modified.

use crate::buffer::{clamp_floor, clamp_round, ChannelOrder, ImageBuffer};
use crate::spec::{validate_brightness, BrightnessMode};
use crate::TransformError;

/// Apply a brightness factor to an image.
///
/// # Errors
///
/// `InvalidParameter` when `factor` is negative or not finite.
pub fn apply_brightness(
    image: &ImageBuffer,
    factor: f64,
    mode: BrightnessMode,
) -> Result<ImageBuffer, TransformError> {
    validate_brightness(factor)?;

    // Early exit if no adjustment
    if factor == 1.0 {
        return Ok(image.clone());
    }

    let channels = image.channels() as usize;
    let mut pixels = image.pixels().to_vec();

    match mode {
        BrightnessMode::PixelMultiply => {
            for px in pixels.chunks_exact_mut(channels) {
                for sample in &mut px[..3] {
                    *sample = clamp_floor(*sample as f64 * factor);
                }
            }
        }
        BrightnessMode::ValueChannelScale => {
            let (ri, bi) = match image.channel_order() {
                ChannelOrder::Rgb => (0, 2),
                ChannelOrder::Bgr => (2, 0),
            };
            for px in pixels.chunks_exact_mut(channels) {
                let (h, s, v) = rgb_to_hsv(px[ri], px[1], px[bi]);
                let (r, g, b) = hsv_to_rgb(h, s, (v * factor).clamp(0.0, 1.0));
                px[ri] = r;
                px[1] = g;
                px[bi] = b;
            }
        }
    }

    Ok(ImageBuffer::from_parts(
        image.width(),
        image.height(),
        image.channels(),
        image.channel_order(),
        pixels,
    ))
}

/// Convert RGB (0-255) to HSV (h: 0-360, s: 0-1, v: 0-1).
fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let rf = r as f64 / 255.0;
    let gf = g as f64 / 255.0;
    let bf = b as f64 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let v = max;
    let s = if max > 0.0 { delta / max } else { 0.0 };

    let h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (((gf - bf) / delta).rem_euclid(6.0))
    } else if max == gf {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };

    (h, s, v)
}

/// Convert HSV (h: 0-360, s: 0-1, v: 0-1) to RGB (0-255).
fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let h = h.rem_euclid(360.0);

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (
        clamp_round((r + m) * 255.0),
        clamp_round((g + m) * 255.0),
        clamp_round((b + m) * 255.0),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_4x4() -> ImageBuffer {
        ImageBuffer::rgb(4, 4, vec![255u8; 4 * 4 * 3]).unwrap()
    }

    #[test]
    fn test_identity_factor() {
        let img = ImageBuffer::rgb(2, 1, vec![10, 20, 30, 40, 50, 60]).unwrap();
        for mode in [BrightnessMode::PixelMultiply, BrightnessMode::ValueChannelScale] {
            assert_eq!(apply_brightness(&img, 1.0, mode).unwrap(), img);
        }
    }

    #[test]
    fn test_pixel_multiply_halves_white_with_floor() {
        let result = apply_brightness(&white_4x4(), 0.5, BrightnessMode::PixelMultiply).unwrap();
        assert!(result.pixels().iter().all(|&v| v == 127));
    }

    #[test]
    fn test_value_scale_halves_white_with_round() {
        let result =
            apply_brightness(&white_4x4(), 0.5, BrightnessMode::ValueChannelScale).unwrap();
        assert!(result.pixels().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_pixel_multiply_clamps_high() {
        let img = ImageBuffer::rgb(1, 1, vec![100, 200, 250]).unwrap();
        let result = apply_brightness(&img, 2.0, BrightnessMode::PixelMultiply).unwrap();
        assert_eq!(result.pixels(), &[200, 255, 255]);
    }

    #[test]
    fn test_zero_factor_is_black() {
        let img = ImageBuffer::rgb(1, 1, vec![100, 200, 250]).unwrap();
        for mode in [BrightnessMode::PixelMultiply, BrightnessMode::ValueChannelScale] {
            let result = apply_brightness(&img, 0.0, mode).unwrap();
            assert_eq!(result.pixels(), &[0, 0, 0]);
        }
    }

    #[test]
    fn test_value_scale_preserves_hue_when_clamping() {
        // Pixel-multiply would clip red and shift the hue; value scaling keeps
        // the channel ratios.
        let img = ImageBuffer::rgb(1, 1, vec![200, 100, 50]).unwrap();
        let result = apply_brightness(&img, 2.0, BrightnessMode::ValueChannelScale).unwrap();
        let (h0, s0, _) = rgb_to_hsv(200, 100, 50);
        let p = result.pixels();
        assert_eq!(p[0], 255);
        let (h1, s1, v1) = rgb_to_hsv(p[0], p[1], p[2]);
        assert!((h0 - h1).abs() < 1.0, "hue moved from {} to {}", h0, h1);
        assert!((s0 - s1).abs() < 0.01);
        assert!((v1 - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_value_scale_respects_bgr_order() {
        let rgb = ImageBuffer::rgb(1, 1, vec![200, 100, 50]).unwrap();
        let bgr = rgb.to_channel_order(ChannelOrder::Bgr);

        let from_rgb = apply_brightness(&rgb, 0.7, BrightnessMode::ValueChannelScale).unwrap();
        let from_bgr = apply_brightness(&bgr, 0.7, BrightnessMode::ValueChannelScale).unwrap();
        assert_eq!(from_bgr.to_channel_order(ChannelOrder::Rgb), from_rgb);
    }

    #[test]
    fn test_alpha_untouched() {
        let img = ImageBuffer::rgba(1, 1, vec![100, 100, 100, 77]).unwrap();
        for mode in [BrightnessMode::PixelMultiply, BrightnessMode::ValueChannelScale] {
            let result = apply_brightness(&img, 2.5, mode).unwrap();
            assert_eq!(result.pixels()[3], 77);
            assert_eq!(result.pixels()[0], 250);
        }
    }

    #[test]
    fn test_negative_factor_rejected() {
        let err = apply_brightness(&white_4x4(), -0.5, BrightnessMode::PixelMultiply).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_input_not_mutated() {
        let img = white_4x4();
        let _ = apply_brightness(&img, 0.25, BrightnessMode::PixelMultiply).unwrap();
        assert!(img.pixels().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_hsv_conversion_roundtrip() {
        let colors = [
            (255u8, 0u8, 0u8), // Red
            (0, 255, 0),       // Green
            (0, 0, 255),       // Blue
            (255, 255, 0),     // Yellow
            (128, 128, 128),   // Gray
            (12, 200, 99),
        ];

        for (r, g, b) in colors {
            let (h, s, v) = rgb_to_hsv(r, g, b);
            assert_eq!(hsv_to_rgb(h, s, v), (r, g, b), "roundtrip for {:?}", (r, g, b));
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn rgba_strategy() -> impl Strategy<Value = ImageBuffer> {
        (1u32..=16, 1u32..=16).prop_flat_map(|(w, h)| {
            let size = (w * h * 4) as usize;
            prop::collection::vec(any::<u8>(), size..=size)
                .prop_map(move |pixels| ImageBuffer::rgba(w, h, pixels).unwrap())
        })
    }

    fn mode_strategy() -> impl Strategy<Value = BrightnessMode> {
        prop_oneof![
            Just(BrightnessMode::PixelMultiply),
            Just(BrightnessMode::ValueChannelScale)
        ]
    }

    proptest! {
        /// Property: pixel-multiply is exactly min(255, floor(in * factor)).
        #[test]
        fn prop_pixel_multiply_clamps(img in rgba_strategy(), factor in 0.0f64..=10.0) {
            let out = apply_brightness(&img, factor, BrightnessMode::PixelMultiply).unwrap();
            for (src, dst) in img.pixels().chunks_exact(4).zip(out.pixels().chunks_exact(4)) {
                for c in 0..3 {
                    let expected = (src[c] as f64 * factor).min(255.0).floor() as u8;
                    prop_assert_eq!(dst[c], expected);
                }
            }
        }

        /// Property: alpha and shape are preserved in both modes.
        #[test]
        fn prop_alpha_and_shape_preserved(
            img in rgba_strategy(),
            factor in 0.0f64..=3.0,
            mode in mode_strategy(),
        ) {
            let out = apply_brightness(&img, factor, mode).unwrap();
            prop_assert_eq!((out.width(), out.height(), out.channels()), (img.width(), img.height(), 4));
            for (src, dst) in img.pixels().chunks_exact(4).zip(out.pixels().chunks_exact(4)) {
                prop_assert_eq!(src[3], dst[3]);
            }
        }

        /// Property: darkening never raises a colour sample.
        #[test]
        fn prop_darkening_is_monotonic(img in rgba_strategy(), factor in 0.0f64..=1.0) {
            let out = apply_brightness(&img, factor, BrightnessMode::PixelMultiply).unwrap();
            for (src, dst) in img.pixels().chunks_exact(4).zip(out.pixels().chunks_exact(4)) {
                for c in 0..3 {
                    prop_assert!(dst[c] <= src[c]);
                }
            }
        }
    }
}
