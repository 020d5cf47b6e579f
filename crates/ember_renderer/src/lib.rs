//! Ember Renderer - CPU triangle rasterizer and sphere ray tracer
//!
//! Two independent renderers sharing one output model:
//!
//! - **Rasterizer**: edge-function coverage with barycentric color
//!   interpolation for a single screen-space triangle.
//! - **Tracer**: one primary ray per pixel through a pinhole camera, nearest
//!   sphere by linear scan, checkerboard shading scaled by the facing ratio.
//!
//! Both produce row-major buffers that [`output`] serializes as plain-text PPM.

mod camera;
mod error;
mod framebuffer;
pub mod output;
mod raster;
mod scene;
mod sphere;
mod tracer;

pub use camera::{Camera, RayGenerator};
pub use error::{RenderError, RenderResult};
pub use framebuffer::{clamp_01, color_to_rgb, Color, ImageBuffer, RgbBuffer};
pub use raster::{edge_function, rasterize, rasterize_into, ColoredTriangle};
pub use scene::{CameraDesc, Scene, SphereDesc, TriangleDesc};
pub use sphere::{Sphere, SurfaceData};
pub use tracer::{cast_ray, mix, nearest_hit, render, shade, Hit, RenderOptions};

/// Re-export common math types from ember_math
pub use ember_math::{Mat4, Ray, Vec2, Vec3};
