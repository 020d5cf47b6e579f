//! Pinhole camera for primary ray generation.
//!
//! Camera space follows the right-handed convention: the camera looks down
//! -Z with +Y up. The image plane sits at `z = -near_clip`; the near clip
//! distance only places that plane, nothing is clipped against it.

use crate::error::{check_resolution, RenderError, RenderResult};
use crate::framebuffer::Color;
use ember_math::{Mat4, Mat4Ext, Ray, Vec3};

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov_y: f32,
    /// Distance from the camera to the image plane
    pub near_clip: f32,
    /// Camera-to-world affine transform
    pub camera_to_world: Mat4,
    /// Color for rays that hit nothing
    pub background: Color,
}

impl Camera {
    /// Create a camera at the world origin looking down -Z.
    pub fn new() -> Self {
        Self {
            fov_y: 60.0,
            near_clip: 0.3,
            camera_to_world: Mat4::IDENTITY,
            background: Color::new(0.192, 0.302, 0.475),
        }
    }

    /// Create a camera at `position` looking at `target`.
    pub fn look_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::new().with_transform(Mat4::look_at_rh(position, target, up).inverse())
    }

    /// Set the camera-to-world transform.
    pub fn with_transform(mut self, camera_to_world: Mat4) -> Self {
        self.camera_to_world = camera_to_world;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, fov_y: f32, near_clip: f32) -> Self {
        self.fov_y = fov_y;
        self.near_clip = near_clip;
        self
    }

    /// Set background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// World-space position of the camera.
    pub fn position(&self) -> Vec3 {
        self.camera_to_world.origin()
    }

    /// Check the lens settings and transform.
    pub fn validate(&self) -> RenderResult<()> {
        if !(self.fov_y > 0.0 && self.fov_y < 180.0) {
            return Err(RenderError::InvalidTransform(format!(
                "field of view must be in (0, 180) degrees, got {}",
                self.fov_y
            )));
        }
        if !(self.near_clip > 0.0 && self.near_clip.is_finite()) {
            return Err(RenderError::InvalidTransform(format!(
                "near clip distance must be positive, got {}",
                self.near_clip
            )));
        }
        if !self.camera_to_world.is_affine() || !self.camera_to_world.is_invertible() {
            return Err(RenderError::InvalidTransform(format!(
                "camera-to-world matrix must be an invertible affine transform: {}",
                self.camera_to_world
            )));
        }
        Ok(())
    }

    /// Prepare primary ray generation for a `width` x `height` image.
    pub fn ray_generator(&self, width: u32, height: u32) -> RenderResult<RayGenerator> {
        self.validate()?;
        check_resolution(width, height)?;

        Ok(RayGenerator {
            width: width as f32,
            height: height as f32,
            aspect: width as f32 / height as f32,
            scale: (self.fov_y.to_radians() * 0.5).tan() * self.near_clip,
            near_clip: self.near_clip,
            origin: self.position(),
            camera_to_world: self.camera_to_world,
        })
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-render cached values for mapping pixels to primary rays.
#[derive(Debug, Clone, Copy)]
pub struct RayGenerator {
    width: f32,
    height: f32,
    aspect: f32,
    scale: f32,
    near_clip: f32,
    origin: Vec3,
    camera_to_world: Mat4,
}

impl RayGenerator {
    /// Width over height, computed in floating point.
    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// Camera-space point on the image plane through the center of pixel (x, y).
    pub fn image_plane_point(&self, x: u32, y: u32) -> Vec3 {
        let cx = (2.0 * (x as f32 + 0.5) / self.width - 1.0) * self.aspect * self.scale;
        let cy = (1.0 - 2.0 * (y as f32 + 0.5) / self.height) * self.scale;
        Vec3::new(cx, cy, -self.near_clip)
    }

    /// Primary ray through the center of pixel (x, y), with a unit direction.
    pub fn ray(&self, x: u32, y: u32) -> Ray {
        let world = self.camera_to_world.transform_point3(self.image_plane_point(x, y));
        Ray::new(self.origin, (world - self.origin).normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::new();
        assert_eq!(camera.position(), Vec3::ZERO);
        assert!(camera.validate().is_ok());
    }

    #[test]
    fn test_center_ray_looks_down_minus_z() {
        let camera = Camera::new().with_lens(90.0, 1.0);
        let rays = camera.ray_generator(3, 3).unwrap();

        let ray = rays.ray(1, 1);
        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }

    #[test]
    fn test_image_plane_corners() {
        // 90 degree fov at distance 1: the plane spans [-1, 1] vertically
        let camera = Camera::new().with_lens(90.0, 1.0);
        let rays = camera.ray_generator(2, 2).unwrap();

        let top_left = rays.image_plane_point(0, 0);
        assert!((top_left - Vec3::new(-0.5, 0.5, -1.0)).length() < 1e-5);

        let bottom_right = rays.image_plane_point(1, 1);
        assert!((bottom_right - Vec3::new(0.5, -0.5, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_aspect_is_not_truncated() {
        let camera = Camera::new();
        let rays = camera.ray_generator(3, 2).unwrap();
        assert_eq!(rays.aspect(), 1.5);
    }

    #[test]
    fn test_look_at() {
        let camera = Camera::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
        assert!((camera.position() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);

        let rays = camera.ray_generator(5, 5).unwrap();
        let ray = rays.ray(2, 2);
        assert!((ray.origin - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert!((ray.direction - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);

        // Camera +X maps to world +X when looking down -Z
        let right = rays.ray(4, 2);
        assert!(right.direction.x > 0.0);
    }

    #[test]
    fn test_translated_camera_moves_origin() {
        let camera = Camera::new().with_transform(Mat4::from_translation(Vec3::new(0.0, 1.0, 10.0)));
        let rays = camera.ray_generator(4, 4).unwrap();
        assert_eq!(rays.ray(0, 0).origin, Vec3::new(0.0, 1.0, 10.0));
    }

    #[test]
    fn test_invalid_camera() {
        let singular = Camera::new().with_transform(Mat4::from_scale(Vec3::new(1.0, 1.0, 0.0)));
        assert!(matches!(singular.validate(), Err(RenderError::InvalidTransform(_))));

        let projective = Camera::new().with_transform(Mat4::perspective_rh(1.0, 1.0, 0.1, 10.0));
        assert!(matches!(projective.validate(), Err(RenderError::InvalidTransform(_))));

        let flat = Camera::new().with_lens(0.0, 0.3);
        assert!(matches!(flat.validate(), Err(RenderError::InvalidTransform(_))));

        let no_plane = Camera::new().with_lens(60.0, 0.0);
        assert!(matches!(no_plane.validate(), Err(RenderError::InvalidTransform(_))));

        assert!(matches!(
            Camera::new().ray_generator(0, 4),
            Err(RenderError::InvalidOptions(_))
        ));
    }
}
