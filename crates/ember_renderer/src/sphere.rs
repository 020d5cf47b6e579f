//! Sphere primitive for ray tracing.

use crate::error::{RenderError, RenderResult};
use crate::framebuffer::Color;
use ember_math::{approximately_zero, Ray, Vec2, Vec3};
use std::f32::consts::PI;

/// Surface attributes at a point on a sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceData {
    /// Outward unit normal
    pub normal: Vec3,
    /// Spherical UV coordinates, both in [0, 1]
    pub uv: Vec2,
}

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    radius2: f32,
    surface_color: Color,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, surface_color: Color) -> Self {
        Self {
            center,
            radius,
            radius2: radius * radius,
            surface_color,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn surface_color(&self) -> Color {
        self.surface_color
    }

    /// Check that the sphere is finite with a positive radius.
    pub fn validate(&self) -> RenderResult<()> {
        if !self.center.is_finite() || !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(RenderError::InvalidGeometry(format!(
                "sphere at {} needs a finite positive radius, got {}",
                self.center, self.radius
            )));
        }
        Ok(())
    }

    /// Distance along `ray` to the nearest intersection in front of its origin.
    ///
    /// The ray direction is assumed to be unit length. Returns `None` if the
    /// ray misses, or if both intersections lie behind the origin. A ray
    /// starting inside the sphere reports the far (exit) intersection.
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        // |O + tD - C|² = R² with |D|² = 1
        let oc = ray.origin - self.center;
        let a = 1.0;
        let b = 2.0 * ray.direction.dot(oc);
        let c = oc.dot(oc) - self.radius2;

        let (mut x0, mut x1) = solve_quadratic(a, b, c)?;
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
        }

        if x0 < 0.0 {
            x0 = x1;
            if x0 < 0.0 {
                return None;
            }
        }

        Some(x0)
    }

    /// Normal and UV coordinates at a point on the surface.
    pub fn surface_data(&self, hit: Vec3) -> SurfaceData {
        let normal = (hit - self.center).normalize();
        SurfaceData {
            normal,
            uv: sphere_uv(normal),
        }
    }
}

/// Get the UV coordinates for a point on the unit sphere.
///
/// u runs around the y axis (from atan2(z, x)), v runs from the +y pole (0)
/// to the -y pole (1).
fn sphere_uv(p: Vec3) -> Vec2 {
    let u = (1.0 + p.z.atan2(p.x) / PI) * 0.5;
    let v = p.y.clamp(-1.0, 1.0).acos() / PI;
    Vec2::new(u, v)
}

/// Real roots of `a t² + b t + c = 0`, unordered.
///
/// Uses the cancellation-free form `q = -0.5 (b ± √Δ)` with the sign of `b`,
/// then `x0 = q / a`, `x1 = c / q`.
fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }

    if approximately_zero(discriminant) {
        let x = -0.5 * b / a;
        return Some((x, x));
    }

    let sqrtd = discriminant.sqrt();
    let q = if b > 0.0 {
        -0.5 * (b + sqrtd)
    } else {
        -0.5 * (b - sqrtd)
    };

    Some((q / a, c / q))
}
