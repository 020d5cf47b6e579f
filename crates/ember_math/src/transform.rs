// Transform utilities for Mat4
//
// Extends glam::Mat4 with the checks the tracer needs before it trusts a
// camera-to-world matrix. glam::Mat4 already provides transform_point3().

use glam::{Mat4, Vec4};

/// Determinants below this magnitude are treated as singular.
const SINGULAR_EPSILON: f32 = 1e-8;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// True if the bottom row is (0, 0, 0, 1), i.e. the matrix is a 3x4
    /// affine transform (rotation/scale + translation, no projection).
    fn is_affine(&self) -> bool;

    /// True if every element is finite and the matrix can be inverted.
    fn is_invertible(&self) -> bool;

    /// World-space position of the frame's origin (the translation column).
    fn origin(&self) -> glam::Vec3;
}

impl Mat4Ext for Mat4 {
    fn is_affine(&self) -> bool {
        self.row(3) == Vec4::W
    }

    fn is_invertible(&self) -> bool {
        self.is_finite() && self.determinant().abs() > SINGULAR_EPSILON
    }

    fn origin(&self) -> glam::Vec3 {
        self.w_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_transform_point3_translation() {
        let mat = Mat4::from_translation(Vec3::new(10.0, 20.0, 30.0));
        let point = Vec3::new(1.0, 2.0, 3.0);
        let transformed = mat.transform_point3(point);

        assert_eq!(transformed, Vec3::new(11.0, 22.0, 33.0));
    }

    #[test]
    fn test_affine_checks() {
        assert!(Mat4::IDENTITY.is_affine());
        assert!(Mat4::from_rotation_y(0.3).is_affine());

        let proj = Mat4::perspective_rh(1.0, 1.0, 0.1, 100.0);
        assert!(!proj.is_affine());
    }

    #[test]
    fn test_invertible() {
        assert!(Mat4::IDENTITY.is_invertible());
        assert!(Mat4::from_translation(Vec3::ONE).is_invertible());

        // Collapsing one axis makes the matrix singular
        assert!(!Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)).is_invertible());
        assert!(!Mat4::from_translation(Vec3::new(f32::NAN, 0.0, 0.0)).is_invertible());
    }

    #[test]
    fn test_origin() {
        let mat = Mat4::from_translation(Vec3::new(0.0, 1.0, -10.0));
        assert_eq!(mat.origin(), Vec3::new(0.0, 1.0, -10.0));
        assert_eq!(mat.origin(), mat.transform_point3(Vec3::ZERO));
    }
}
