//! 2D affine matrices for rotate, scale, translate and skew.
//!
//! # Convention
//!
//! An [`AffineTransform`] maps **source** pixel coordinates to
//! **destination** pixel coordinates:
//!
//! ```text
//! | x' |   | a  b  c |   | x |
//! | y' | = | d  e  f | * | y |
//!                        | 1 |
//! ```
//!
//! Resampling walks the destination grid and pulls from the source, so it
//! inverts the matrix exactly once per operator (see
//! [`crate::transform::apply_affine`]).
//!
//! The y axis points down, so a positive rotation angle turns content
//! clockwise on screen.

use serde::{Deserialize, Serialize};

use crate::TransformError;

/// Tolerance below which a determinant counts as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// A 2x3 affine matrix in row-major order `[a, b, c, d, e, f]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineTransform {
    m: [f64; 6],
}

impl Default for AffineTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl AffineTransform {
    /// The identity transform.
    pub const fn identity() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
        }
    }

    /// Build from raw coefficients, rejecting singular or non-finite matrices.
    pub fn from_matrix(m: [f64; 6]) -> Result<Self, TransformError> {
        if m.iter().any(|v| !v.is_finite()) {
            return Err(TransformError::invalid_parameter(
                "matrix",
                "coefficients must be finite",
            ));
        }
        let t = Self { m };
        if t.determinant().abs() < SINGULAR_EPSILON {
            return Err(TransformError::invalid_parameter(
                "matrix",
                "linear part is singular",
            ));
        }
        Ok(t)
    }

    /// The raw coefficients `[a, b, c, d, e, f]`.
    pub fn matrix(&self) -> [f64; 6] {
        self.m
    }

    /// Determinant of the linear part, `a*e - b*d`.
    pub fn determinant(&self) -> f64 {
        let [a, b, _, d, e, _] = self.m;
        a * e - b * d
    }

    /// Whether this is exactly the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Map a point through the transform.
    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let [a, b, c, d, e, f] = self.m;
        (a * x + b * y + c, d * x + e * y + f)
    }

    /// Matrix product `self * other`: `other` is applied first.
    pub fn multiply(&self, other: &AffineTransform) -> AffineTransform {
        let [a1, b1, c1, d1, e1, f1] = self.m;
        let [a2, b2, c2, d2, e2, f2] = other.m;
        AffineTransform {
            m: [
                a1 * a2 + b1 * d2,
                a1 * b2 + b1 * e2,
                a1 * c2 + b1 * f2 + c1,
                d1 * a2 + e1 * d2,
                d1 * b2 + e1 * e2,
                d1 * c2 + e1 * f2 + f1,
            ],
        }
    }

    /// Apply `self`, then `next`.
    pub fn then(&self, next: &AffineTransform) -> AffineTransform {
        next.multiply(self)
    }

    /// The inverse transform.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when the linear part is singular.
    pub fn inverse(&self) -> Result<AffineTransform, TransformError> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return Err(TransformError::invalid_parameter(
                "matrix",
                format!("cannot invert singular transform (det = {det})"),
            ));
        }
        let [a, b, c, d, e, f] = self.m;
        let ia = e / det;
        let ib = -b / det;
        let id = -d / det;
        let ie = a / det;
        Ok(AffineTransform {
            m: [ia, ib, -(ia * c + ib * f), id, ie, -(id * c + ie * f)],
        })
    }
}

/// Rotation by `angle_degrees` (clockwise on screen) about `(center_x, center_y)`.
///
/// The angle is reduced mod 360 first, and quarter turns produce exact
/// matrices so repeated runs are bit-identical.
pub fn rotation(angle_degrees: f64, center_x: f64, center_y: f64) -> AffineTransform {
    let normalized = angle_degrees.rem_euclid(360.0);
    let (sin, cos) = if normalized == 0.0 {
        (0.0, 1.0)
    } else if normalized == 90.0 {
        (1.0, 0.0)
    } else if normalized == 180.0 {
        (0.0, -1.0)
    } else if normalized == 270.0 {
        (-1.0, 0.0)
    } else {
        normalized.to_radians().sin_cos()
    };

    let about_origin = AffineTransform {
        m: [cos, -sin, 0.0, sin, cos, 0.0],
    };
    compose(&[
        translation(center_x, center_y),
        about_origin,
        translation(-center_x, -center_y),
    ])
}

/// Axis-aligned scale about the origin.
///
/// # Errors
///
/// `InvalidParameter` unless both factors are finite and strictly positive.
pub fn scaling(sx: f64, sy: f64) -> Result<AffineTransform, TransformError> {
    validate_scale(sx, sy)?;
    Ok(AffineTransform {
        m: [sx, 0.0, 0.0, 0.0, sy, 0.0],
    })
}

/// Pure offset by `(tx, ty)` pixels.
pub fn translation(tx: f64, ty: f64) -> AffineTransform {
    AffineTransform {
        m: [1.0, 0.0, tx, 0.0, 1.0, ty],
    }
}

/// Shear `[[1, kx], [ky, 1]]` anchored at the origin.
///
/// # Errors
///
/// `InvalidParameter` when a factor is not finite or `|kx * ky| >= 1`,
/// which would make the determinant `1 - kx*ky` vanish or flip sign.
pub fn shear(kx: f64, ky: f64) -> Result<AffineTransform, TransformError> {
    validate_shear(kx, ky)?;
    Ok(AffineTransform {
        m: [1.0, kx, 0.0, ky, 1.0, 0.0],
    })
}

/// Left-to-right matrix product of `transforms`.
///
/// `compose(&[a, b, c])` is `a * b * c`: `c` is applied to a point first
/// and `a` last. An empty slice yields the identity.
pub fn compose(transforms: &[AffineTransform]) -> AffineTransform {
    transforms
        .iter()
        .fold(AffineTransform::identity(), |acc, t| acc.multiply(t))
}

pub(crate) fn validate_scale(sx: f64, sy: f64) -> Result<(), TransformError> {
    for (name, v) in [("sx", sx), ("sy", sy)] {
        if !v.is_finite() || v <= 0.0 {
            return Err(TransformError::invalid_parameter(
                name,
                format!("scale factor must be finite and > 0, got {v}"),
            ));
        }
    }
    Ok(())
}

pub(crate) fn validate_shear(kx: f64, ky: f64) -> Result<(), TransformError> {
    for (name, v) in [("kx", kx), ("ky", ky)] {
        if !v.is_finite() {
            return Err(TransformError::invalid_parameter(
                name,
                format!("skew factor must be finite, got {v}"),
            ));
        }
    }
    if (kx * ky).abs() >= 1.0 {
        return Err(TransformError::invalid_parameter(
            "kx*ky",
            format!("|kx * ky| must be < 1 to keep the shear invertible, got {}", kx * ky),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_identity_apply() {
        let t = AffineTransform::identity();
        assert_eq!(t.apply(3.5, -2.0), (3.5, -2.0));
        assert!(t.is_identity());
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        assert!(rotation(0.0, 10.0, 20.0).is_identity());
        assert!(rotation(360.0, 10.0, 20.0).is_identity());
        assert!(rotation(-720.0, 3.0, 4.0).is_identity());
    }

    #[test]
    fn test_rotation_90_is_clockwise() {
        // With y pointing down, "right of centre" moves to "below centre".
        let t = rotation(90.0, 0.0, 0.0);
        assert_point_eq(t.apply(1.0, 0.0), (0.0, 1.0));
        assert_point_eq(t.apply(0.0, 1.0), (-1.0, 0.0));
    }

    #[test]
    fn test_rotation_keeps_center_fixed() {
        let t = rotation(37.0, 12.5, 7.5);
        assert_point_eq(t.apply(12.5, 7.5), (12.5, 7.5));
    }

    #[test]
    fn test_rotation_quarter_turns_are_exact() {
        let t = rotation(-90.0, 0.0, 0.0);
        assert_eq!(t.matrix(), rotation(270.0, 0.0, 0.0).matrix());
        assert_eq!(t.apply(1.0, 0.0), (0.0, -1.0));
    }

    #[test]
    fn test_scaling_rejects_non_positive() {
        assert!(scaling(0.0, 1.0).unwrap_err().is_invalid_parameter());
        assert!(scaling(1.0, -2.0).unwrap_err().is_invalid_parameter());
        assert!(scaling(f64::NAN, 1.0).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_scaling_matrix() {
        let t = scaling(2.0, 0.5).unwrap();
        assert_eq!(t.apply(3.0, 4.0), (6.0, 2.0));
    }

    #[test]
    fn test_translation_matrix() {
        let t = translation(5.0, -3.0);
        assert_eq!(t.apply(1.0, 1.0), (6.0, -2.0));
        assert_eq!(t.determinant(), 1.0);
    }

    #[test]
    fn test_shear_matrix() {
        let t = shear(0.5, 0.0).unwrap();
        assert_eq!(t.apply(0.0, 2.0), (1.0, 2.0));
        assert_eq!(t.determinant(), 1.0);
    }

    #[test]
    fn test_shear_rejects_singular() {
        assert!(shear(1.0, 1.0).unwrap_err().is_invalid_parameter());
        assert!(shear(-1.0, -1.0).unwrap_err().is_invalid_parameter());
        assert!(shear(2.0, 0.5).unwrap_err().is_invalid_parameter());
        assert!(shear(-2.0, 0.75).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_shear_accepts_single_axis_full_range() {
        assert!(shear(1.0, 0.0).is_ok());
        assert!(shear(0.0, -1.0).is_ok());
        assert!(shear(0.9, 0.9).is_ok());
    }

    #[test]
    fn test_compose_order() {
        // compose([a, b]) applies b first.
        let scale = scaling(2.0, 2.0).unwrap();
        let shift = translation(1.0, 0.0);
        let t = compose(&[scale, shift]);
        assert_eq!(t.apply(0.0, 0.0), (2.0, 0.0));

        let t = compose(&[shift, scale]);
        assert_eq!(t.apply(0.0, 0.0), (1.0, 0.0));
    }

    #[test]
    fn test_then_is_application_order() {
        let scale = scaling(2.0, 2.0).unwrap();
        let shift = translation(1.0, 0.0);
        assert_eq!(scale.then(&shift), compose(&[shift, scale]));
    }

    #[test]
    fn test_compose_empty_is_identity() {
        assert!(compose(&[]).is_identity());
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = compose(&[
            rotation(30.0, 5.0, 5.0),
            shear(0.3, -0.2).unwrap(),
            scaling(1.5, 0.75).unwrap(),
        ]);
        let inv = t.inverse().unwrap();
        let (x, y) = t.apply(3.0, 7.0);
        assert_point_eq(inv.apply(x, y), (3.0, 7.0));
    }

    #[test]
    fn test_from_matrix_rejects_singular() {
        let err = AffineTransform::from_matrix([1.0, 1.0, 0.0, 1.0, 1.0, 0.0]).unwrap_err();
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_from_matrix_rejects_non_finite() {
        let err =
            AffineTransform::from_matrix([1.0, 0.0, f64::INFINITY, 0.0, 1.0, 0.0]).unwrap_err();
        assert!(err.is_invalid_parameter());
    }
}
