//! Primary-ray sphere tracer.
//!
//! One ray per pixel, nearest sphere by linear scan, local shading only:
//! a UV checkerboard scaled by the facing ratio between the surface normal
//! and the viewing ray. There are no light sources, shadows or secondary rays.

use crate::camera::Camera;
use crate::error::RenderResult;
use crate::framebuffer::{Color, ImageBuffer};
use crate::sphere::Sphere;
use ember_math::{Ray, Vec2};
use serde::{Deserialize, Serialize};

/// Number of checker tiles along each UV axis.
const CHECKER_SCALE: f32 = 4.0;

/// Brightness of the dark checker tiles relative to the surface color.
const CHECKER_DARKEN: f32 = 0.8;

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl RenderOptions {
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
        }
    }
}

/// Nearest intersection found along a ray.
#[derive(Debug, Clone, Copy)]
pub struct Hit<'a> {
    /// Ray parameter of the intersection
    pub t: f32,
    /// The sphere that was hit
    pub sphere: &'a Sphere,
}

/// Find the nearest sphere hit by `ray`.
///
/// On equal distances the sphere earlier in the list wins.
pub fn nearest_hit<'a>(ray: &Ray, spheres: &'a [Sphere]) -> Option<Hit<'a>> {
    let mut nearest: Option<Hit<'a>> = None;

    for sphere in spheres {
        if let Some(t) = sphere.intersect(ray) {
            if nearest.map_or(true, |hit| t < hit.t) {
                nearest = Some(Hit { t, sphere });
            }
        }
    }

    nearest
}

/// Linear blend: `a` at `t = 0`, `b` at `t = 1`.
#[inline]
pub fn mix(a: Color, b: Color, t: f32) -> Color {
    a * (1.0 - t) + b * t
}

/// Checkerboard pattern over UV space, `CHECKER_SCALE` tiles per axis.
#[inline]
fn checker(uv: Vec2) -> bool {
    ((uv.x * CHECKER_SCALE) % 1.0 > 0.5) ^ ((uv.y * CHECKER_SCALE) % 1.0 > 0.5)
}

/// Shade a hit: checkerboard surface color scaled by the facing ratio.
pub fn shade(ray: &Ray, hit: &Hit<'_>) -> Color {
    let point = ray.at(hit.t);
    let surface = hit.sphere.surface_data(point);

    let facing_ratio = surface.normal.dot(-ray.direction).max(0.0);
    let base = hit.sphere.surface_color();
    let pattern = if checker(surface.uv) { 1.0 } else { 0.0 };

    facing_ratio * mix(base, base * CHECKER_DARKEN, pattern)
}

/// Compute the color seen by a ray.
pub fn cast_ray(ray: &Ray, spheres: &[Sphere], background: Color) -> Color {
    match nearest_hit(ray, spheres) {
        Some(hit) => shade(ray, &hit),
        None => background,
    }
}

/// Render the spheres to an image buffer, one primary ray per pixel.
pub fn render(spheres: &[Sphere], camera: &Camera, options: &RenderOptions) -> RenderResult<ImageBuffer> {
    for sphere in spheres {
        sphere.validate()?;
    }
    let rays = camera.ray_generator(options.width, options.height)?;

    if spheres.is_empty() {
        log::warn!("Rendering with no spheres; image will be background only");
    }
    log::debug!(
        "Tracing {}x{} from {} (fov {}, aspect {})",
        options.width,
        options.height,
        camera.position(),
        camera.fov_y,
        rays.aspect()
    );

    let mut image = ImageBuffer::new(options.width, options.height, camera.background);

    for y in 0..options.height {
        for x in 0..options.width {
            let color = cast_ray(&rays.ray(x, y), spheres, camera.background);
            image.set(x, y, color);
        }
    }

    Ok(image)
}
