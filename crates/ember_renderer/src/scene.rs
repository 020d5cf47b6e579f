//! Scene description for hosts that load their input from JSON.
//!
//! Vectors are written as arrays (`[x, y, z]`), colors as linear RGB in 0-1.
//! Everything except the camera has a default, so a minimal scene is just
//! `{"camera": {"position": [0, 0, 5], "target": [0, 0, 0]}}`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::camera::Camera;
use crate::error::RenderResult;
use crate::framebuffer::Color;
use crate::raster::ColoredTriangle;
use crate::sphere::Sphere;
use crate::tracer::RenderOptions;
use ember_math::{Vec2, Vec3};

/// Look-at camera description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDesc {
    pub position: Vec3,
    pub target: Vec3,
    #[serde(default = "default_up")]
    pub up: Vec3,
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_y: f32,
    #[serde(default = "default_near_clip")]
    pub near_clip: f32,
    #[serde(default = "default_background")]
    pub background: Color,
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_fov() -> f32 {
    Camera::new().fov_y
}

fn default_near_clip() -> f32 {
    Camera::new().near_clip
}

fn default_background() -> Color {
    Camera::new().background
}

impl CameraDesc {
    pub fn build(&self) -> Camera {
        Camera::look_at(self.position, self.target, self.up)
            .with_lens(self.fov_y, self.near_clip)
            .with_background(self.background)
    }
}

/// Sphere description.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    pub color: Color,
}

impl SphereDesc {
    pub fn build(&self) -> Sphere {
        Sphere::new(self.center, self.radius, self.color)
    }
}

/// Screen-space triangle description, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangleDesc {
    pub vertices: [Vec2; 3],
    pub colors: [Color; 3],
}

impl TriangleDesc {
    pub fn build(&self) -> RenderResult<ColoredTriangle> {
        let [v0, v1, v2] = self.vertices;
        let [c0, c1, c2] = self.colors;
        ColoredTriangle::new(v0, v1, v2, c0, c1, c2)
    }
}

/// A complete scene: camera and spheres for the tracer, an optional
/// triangle for the rasterizer, and the output resolution shared by both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub camera: CameraDesc,
    #[serde(default)]
    pub options: RenderOptions,
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,
    #[serde(default)]
    pub triangle: Option<TriangleDesc>,
}

impl Scene {
    /// Parse a scene from JSON text.
    pub fn from_json_str(json: &str) -> RenderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> RenderResult<Self> {
        let path = path.as_ref();
        let scene = Self::from_json_str(&fs::read_to_string(path)?)?;
        log::info!(
            "Loaded scene {} ({} spheres, triangle: {})",
            path.display(),
            scene.spheres.len(),
            scene.triangle.is_some()
        );
        Ok(scene)
    }

    /// Serialize the scene as pretty-printed JSON.
    pub fn to_json_string(&self) -> RenderResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn build_camera(&self) -> Camera {
        self.camera.build()
    }

    pub fn build_spheres(&self) -> Vec<Sphere> {
        self.spheres.iter().map(SphereDesc::build).collect()
    }

    pub fn build_triangle(&self) -> RenderResult<Option<ColoredTriangle>> {
        self.triangle.as_ref().map(TriangleDesc::build).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    #[test]
    fn test_minimal_scene_uses_defaults() {
        let scene =
            Scene::from_json_str(r#"{"camera": {"position": [0, 0, 5], "target": [0, 0, 0]}}"#).unwrap();

        assert_eq!(scene.options, RenderOptions::default());
        assert!(scene.spheres.is_empty());
        assert!(scene.triangle.is_none());

        let camera = scene.build_camera();
        assert_eq!(camera.fov_y, Camera::new().fov_y);
        assert!((camera.position() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn test_full_scene() {
        let json = r#"{
            "camera": {
                "position": [0, 1, -10],
                "target": [0, 0, 0],
                "fov_y": 45,
                "near_clip": 0.5,
                "background": [0, 0, 0]
            },
            "options": {"width": 64, "height": 32},
            "spheres": [
                {"center": [0, 0, 0], "radius": 2, "color": [1, 0, 0]},
                {"center": [2, 2, 2], "radius": 2, "color": [0, 1, 0]}
            ],
            "triangle": {
                "vertices": [[0, 0], [10, 0], [0, 10]],
                "colors": [[1, 0, 0], [0, 1, 0], [0, 0, 1]]
            }
        }"#;

        let scene = Scene::from_json_str(json).unwrap();
        assert_eq!(scene.options.width, 64);
        assert_eq!(scene.options.height, 32);

        let spheres = scene.build_spheres();
        assert_eq!(spheres.len(), 2);
        assert_eq!(spheres[1].center(), Vec3::new(2.0, 2.0, 2.0));

        let camera = scene.build_camera();
        assert_eq!(camera.fov_y, 45.0);
        assert_eq!(camera.near_clip, 0.5);
        assert!(camera.validate().is_ok());

        let triangle = scene.build_triangle().unwrap().unwrap();
        assert_eq!(triangle.area(), 100.0);
    }

    #[test]
    fn test_degenerate_triangle_in_scene() {
        let json = r#"{
            "camera": {"position": [0, 0, 5], "target": [0, 0, 0]},
            "triangle": {
                "vertices": [[0, 0], [1, 1], [2, 2]],
                "colors": [[1, 0, 0], [0, 1, 0], [0, 0, 1]]
            }
        }"#;
        let scene = Scene::from_json_str(json).unwrap();
        assert!(matches!(scene.build_triangle(), Err(RenderError::InvalidGeometry(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Scene::from_json_str("{"), Err(RenderError::Scene(_))));
        assert!(matches!(
            Scene::from_json_str(r#"{"spheres": []}"#),
            Err(RenderError::Scene(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let scene = Scene {
            camera: CameraDesc {
                position: Vec3::new(0.0, 1.0, -10.0),
                target: Vec3::ZERO,
                up: Vec3::Y,
                fov_y: 60.0,
                near_clip: 0.3,
                background: Color::ZERO,
            },
            options: RenderOptions::default(),
            spheres: vec![SphereDesc {
                center: Vec3::ZERO,
                radius: 2.0,
                color: Color::new(0.5, 0.25, 1.0),
            }],
            triangle: None,
        };

        let json = scene.to_json_string().unwrap();
        assert_eq!(Scene::from_json_str(&json).unwrap(), scene);
    }
}
