use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Rays built by the tracer carry a unit-length direction; the sphere
/// intersector relies on that (it takes `|D|² = 1`), but the type itself does
/// not enforce it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray from `origin` towards `target`, with a normalized direction.
    ///
    /// Returns `None` when the two points coincide (or are not finite), since
    /// the direction would be NaN.
    pub fn towards(origin: Vec3, target: Vec3) -> Option<Self> {
        let direction = (target - origin).try_normalize()?;
        Some(Self::new(origin, direction))
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Translate the ray origin by `offset`, keeping the direction.
    pub fn translated(&self, offset: Vec3) -> Self {
        Self::new(self.origin + offset, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let direction = Vec3::new(0.0, 1.0, 0.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_towards() {
        let ray = Ray::towards(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO).unwrap();
        assert_eq!(ray.direction, Vec3::new(0.0, 0.0, -1.0));

        // Coincident points have no direction
        assert!(Ray::towards(Vec3::ONE, Vec3::ONE).is_none());
    }

    #[test]
    fn test_ray_translated() {
        let ray = Ray::new(Vec3::ZERO, Vec3::Y).translated(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.direction, Vec3::Y);
    }
}
