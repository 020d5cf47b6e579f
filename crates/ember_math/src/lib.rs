// Re-export glam for convenience
pub use glam::*;

// Ember math types
mod approx;
mod ray;
mod transform;

pub use approx::{approximately, approximately_zero};
pub use ray::Ray;
pub use transform::Mat4Ext;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_dot_and_normalize() {
        let a = Vec3::new(3.0, 0.0, 4.0);
        assert_eq!(a.dot(Vec3::new(1.0, 2.0, 3.0)), 15.0);

        let n = a.normalize();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_length_is_nan() {
        // Callers rely on this to detect degenerate directions.
        let n = Vec3::ZERO.normalize();
        assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
    }

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_eq!(b - a, Vec2::new(3.0, 4.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
    }
}
