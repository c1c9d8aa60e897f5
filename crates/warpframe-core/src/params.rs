//! Flat slider-value parameters for UI layers.
//!
//! [`TransformParams`] mirrors the controls of an interactive editor: one
//! value per slider, all at their identity positions by default. It is
//! validated against the slider ranges and turned into a [`TransformSpec`]
//! in the fixed order brightness, rotate, scale, translate, skew.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::affine::validate_shear;
use crate::spec::{BrightnessMode, EdgePolicy, Operation, TransformSpec};
use crate::TransformError;

pub const BRIGHTNESS_RANGE: RangeInclusive<f64> = 0.0..=3.0;
pub const ROTATION_RANGE: RangeInclusive<f64> = -180.0..=360.0;
/// Lower bound is exclusive: a scale of zero is rejected.
pub const SCALE_RANGE: RangeInclusive<f64> = 0.0..=3.0;
pub const TRANSLATION_RANGE: RangeInclusive<f64> = -200.0..=200.0;
pub const SKEW_RANGE: RangeInclusive<f64> = -1.0..=1.0;

/// Current slider values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformParams {
    pub brightness: f64,
    pub brightness_mode: BrightnessMode,
    /// Degrees, clockwise.
    pub rotation: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Pixels, positive is right.
    pub translate_x: f64,
    /// Pixels, positive is down.
    pub translate_y: f64,
    pub edge_policy: EdgePolicy,
    pub skew_x: f64,
    pub skew_y: f64,
}

impl Default for TransformParams {
    fn default() -> Self {
        Self {
            brightness: 1.0,
            brightness_mode: BrightnessMode::default(),
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            edge_policy: EdgePolicy::default(),
            skew_x: 0.0,
            skew_y: 0.0,
        }
    }
}

impl TransformParams {
    /// Check every value against its slider range.
    pub fn validate(&self) -> Result<(), TransformError> {
        check_range("brightness", self.brightness, &BRIGHTNESS_RANGE)?;
        check_range("rotation", self.rotation, &ROTATION_RANGE)?;
        for (name, value) in [("scale_x", self.scale_x), ("scale_y", self.scale_y)] {
            check_range(name, value, &SCALE_RANGE)?;
            if value <= 0.0 {
                return Err(TransformError::invalid_parameter(
                    name,
                    format!("must be > 0, got {value}"),
                ));
            }
        }
        check_range("translate_x", self.translate_x, &TRANSLATION_RANGE)?;
        check_range("translate_y", self.translate_y, &TRANSLATION_RANGE)?;
        check_range("skew_x", self.skew_x, &SKEW_RANGE)?;
        check_range("skew_y", self.skew_y, &SKEW_RANGE)?;
        validate_shear(self.skew_x, self.skew_y)
    }

    /// Validate and build the spec in canonical order.
    ///
    /// Every slider contributes an operation, identity values included; the
    /// operators short-circuit identities to a copy.
    pub fn to_spec(&self) -> Result<TransformSpec, TransformError> {
        self.validate()?;
        Ok(TransformSpec::new()
            .with(Operation::Brightness {
                factor: self.brightness,
                mode: self.brightness_mode,
            })
            .with(Operation::Rotate {
                angle_degrees: self.rotation,
            })
            .with(Operation::Scale {
                sx: self.scale_x,
                sy: self.scale_y,
            })
            .with(Operation::Translate {
                tx: self.translate_x,
                ty: self.translate_y,
                edge_policy: self.edge_policy,
            })
            .with(Operation::Skew {
                kx: self.skew_x,
                ky: self.skew_y,
            }))
    }
}

fn check_range(
    name: &'static str,
    value: f64,
    range: &RangeInclusive<f64>,
) -> Result<(), TransformError> {
    if !range.contains(&value) {
        return Err(TransformError::invalid_parameter(
            name,
            format!(
                "{value} is outside [{}, {}]",
                range.start(),
                range.end()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::OperationKind;

    #[test]
    fn test_default_is_valid() {
        assert!(TransformParams::default().validate().is_ok());
    }

    #[test]
    fn test_to_spec_canonical_order() {
        let spec = TransformParams::default().to_spec().unwrap();
        let kinds: Vec<_> = spec.operations().iter().map(|op| op.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                OperationKind::Brightness,
                OperationKind::Rotate,
                OperationKind::Scale,
                OperationKind::Translate,
                OperationKind::Skew,
            ]
        );
    }

    #[test]
    fn test_to_spec_carries_values() {
        let params = TransformParams {
            brightness: 1.5,
            brightness_mode: BrightnessMode::ValueChannelScale,
            translate_x: -40.0,
            edge_policy: EdgePolicy::Wrap,
            ..Default::default()
        };
        let spec = params.to_spec().unwrap();
        assert_eq!(
            spec.operations()[0],
            Operation::Brightness {
                factor: 1.5,
                mode: BrightnessMode::ValueChannelScale
            }
        );
        assert_eq!(
            spec.operations()[3],
            Operation::Translate {
                tx: -40.0,
                ty: 0.0,
                edge_policy: EdgePolicy::Wrap
            }
        );
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let cases = [
            TransformParams {
                brightness: 3.5,
                ..Default::default()
            },
            TransformParams {
                rotation: -181.0,
                ..Default::default()
            },
            TransformParams {
                scale_x: 0.0,
                ..Default::default()
            },
            TransformParams {
                scale_y: 3.1,
                ..Default::default()
            },
            TransformParams {
                translate_y: 250.0,
                ..Default::default()
            },
            TransformParams {
                skew_x: -1.5,
                ..Default::default()
            },
            TransformParams {
                brightness: f64::NAN,
                ..Default::default()
            },
        ];
        for params in cases {
            assert!(
                params.validate().unwrap_err().is_invalid_parameter(),
                "{params:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_singular_skew_rejected() {
        let params = TransformParams {
            skew_x: 1.0,
            skew_y: 1.0,
            ..Default::default()
        };
        assert!(params.to_spec().unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_range_bounds_accepted() {
        let params = TransformParams {
            brightness: 3.0,
            rotation: 360.0,
            scale_x: 3.0,
            scale_y: 0.1,
            translate_x: -200.0,
            translate_y: 200.0,
            skew_x: 1.0,
            skew_y: 0.5,
            ..Default::default()
        };
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let params: TransformParams =
            serde_json::from_str(r#"{"rotation": 30, "edge_policy": "wrap"}"#).unwrap();
        assert_eq!(params.rotation, 30.0);
        assert_eq!(params.edge_policy, EdgePolicy::Wrap);
        assert_eq!(params.brightness, 1.0);
        assert_eq!(params.scale_x, 1.0);
    }
}
