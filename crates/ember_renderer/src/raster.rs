//! Edge-function triangle rasterizer.
//!
//! Each pixel center is tested against the three edges of a screen-space
//! triangle. Signed edge values double as unnormalized barycentric weights,
//! which interpolate the per-vertex colors across the interior.
//!
//! Screen space has x to the right and y down; pixel (x, y) is sampled at
//! (x + 0.5, y + 0.5).

use crate::error::{check_resolution, RenderError, RenderResult};
use crate::framebuffer::{color_to_rgb, Color, RgbBuffer};
use ember_math::{approximately_zero, Vec2, Vec3};

/// Triangles whose signed area is at or below this fraction of their longest
/// squared edge are rejected as degenerate.
const MIN_RELATIVE_AREA: f32 = 1e-6;

/// Edge function: twice the signed area of the triangle (a, b, c).
///
/// Positive when `c` lies to the left of the directed edge `a -> b` in a
/// y-up frame (to the right on screen, where y points down).
#[inline]
pub fn edge_function(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Fill rule for a single edge.
///
/// A strictly positive edge value is inside. A value on the edge itself is
/// inside only if the edge is horizontal pointing right or points down, so
/// two triangles sharing an edge never both claim its pixels.
#[inline]
fn edge_covers(w: f32, edge: Vec2) -> bool {
    if approximately_zero(w) {
        (approximately_zero(edge.y) && edge.x > 0.0) || edge.y > 0.0
    } else {
        w > 0.0
    }
}

/// A screen-space triangle with one color per vertex.
///
/// Construction validates the geometry and normalizes the winding so the
/// signed area is positive. A triangle given in the opposite winding has
/// `v1`/`v2` (and `c1`/`c2`) swapped; the rendered result is the same.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColoredTriangle {
    vertices: [Vec2; 3],
    colors: [Color; 3],
    area: f32,
}

impl ColoredTriangle {
    /// Create a new triangle from three vertices and their colors.
    pub fn new(v0: Vec2, v1: Vec2, v2: Vec2, c0: Color, c1: Color, c2: Color) -> RenderResult<Self> {
        if !(v0.is_finite() && v1.is_finite() && v2.is_finite()) {
            return Err(RenderError::InvalidGeometry(format!(
                "triangle vertices must be finite, got {v0}, {v1}, {v2}"
            )));
        }

        let signed_area = edge_function(v0, v1, v2);
        let longest_edge2 = (v1 - v0)
            .length_squared()
            .max((v2 - v1).length_squared())
            .max((v0 - v2).length_squared());
        if signed_area.abs() <= MIN_RELATIVE_AREA * longest_edge2 {
            return Err(RenderError::InvalidGeometry(format!(
                "degenerate triangle {v0}, {v1}, {v2} (signed area {signed_area})"
            )));
        }

        let (vertices, colors) = if signed_area > 0.0 {
            ([v0, v1, v2], [c0, c1, c2])
        } else {
            ([v0, v2, v1], [c0, c2, c1])
        };

        Ok(Self {
            vertices,
            colors,
            area: signed_area.abs(),
        })
    }

    /// Create a triangle with a single color at every vertex.
    pub fn solid(v0: Vec2, v1: Vec2, v2: Vec2, color: Color) -> RenderResult<Self> {
        Self::new(v0, v1, v2, color, color, color)
    }

    /// Vertices in normalized (positive area) order.
    pub fn vertices(&self) -> [Vec2; 3] {
        self.vertices
    }

    /// Twice the triangle's area (always positive).
    pub fn area(&self) -> f32 {
        self.area
    }

    /// Normalized barycentric weights of `p`, or `None` if `p` is not covered.
    ///
    /// Weight `i` belongs to vertex `i` in [`vertices`](Self::vertices) order.
    pub fn barycentric(&self, p: Vec2) -> Option<Vec3> {
        let [v0, v1, v2] = self.vertices;

        // Each weight measures p against the edge opposite its vertex
        let w0 = edge_function(v1, v2, p);
        let w1 = edge_function(v2, v0, p);
        let w2 = edge_function(v0, v1, p);

        let covered = edge_covers(w0, v2 - v1) && edge_covers(w1, v0 - v2) && edge_covers(w2, v1 - v0);
        if !covered {
            return None;
        }

        Some(Vec3::new(w0, w1, w2) / self.area)
    }

    /// Blend the vertex colors with the given weights.
    pub fn interpolate(&self, weights: Vec3) -> Color {
        let [c0, c1, c2] = self.colors;
        weights.x * c0 + weights.y * c1 + weights.z * c2
    }
}

/// Rasterize a triangle into a new black `width` x `height` buffer.
pub fn rasterize(triangle: &ColoredTriangle, width: u32, height: u32) -> RenderResult<RgbBuffer> {
    check_resolution(width, height)?;

    let mut buffer = RgbBuffer::new(width, height);
    let covered = rasterize_into(triangle, &mut buffer);
    log::debug!("Rasterized {width}x{height}, {covered} pixels covered");

    Ok(buffer)
}

/// Rasterize a triangle on top of an existing buffer.
///
/// Pixels the triangle does not cover are left untouched. Returns the number
/// of pixels written.
pub fn rasterize_into(triangle: &ColoredTriangle, buffer: &mut RgbBuffer) -> usize {
    let mut covered = 0;

    for y in 0..buffer.height {
        for x in 0..buffer.width {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            if let Some(weights) = triangle.barycentric(p) {
                buffer.set(x, y, color_to_rgb(triangle.interpolate(weights)));
                covered += 1;
            }
        }
    }

    covered
}
