//! Ember demo host.
//!
//! Renders a scene once with each renderer and writes `triangle.ppm` and
//! `tracer.ppm`.
//!
//! Usage: `ember_demo [OUTPUT_DIR] [SCENE.json]`
//!
//! Without a scene file the built-in scene is used: two radius-2 spheres with
//! random colors and one RGB triangle, both at 512x512.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use ember_renderer::{
    output, rasterize, render, CameraDesc, Color, RenderOptions, Scene, SphereDesc, TriangleDesc,
    Vec2, Vec3,
};
use rand::Rng;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let out_dir = args.next().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    let scene = match args.next() {
        Some(path) => Scene::load(&path).with_context(|| format!("Failed to load scene {path}"))?,
        None => default_scene(&mut rand::thread_rng()),
    };

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    render_triangle(&scene, &out_dir)?;
    render_spheres(&scene, &out_dir)?;

    Ok(())
}

/// Two spheres along the diagonal with random surface colors, viewed from
/// behind and slightly above, plus the RGB triangle.
fn default_scene(rng: &mut impl Rng) -> Scene {
    let spheres = (0..2)
        .map(|i| SphereDesc {
            center: Vec3::splat(i as f32 * 2.0),
            radius: 2.0,
            color: Color::new(rng.gen(), rng.gen(), rng.gen()),
        })
        .collect();

    Scene {
        camera: CameraDesc {
            position: Vec3::new(0.0, 1.0, -10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60.0,
            near_clip: 0.3,
            background: Color::new(0.192, 0.302, 0.475),
        },
        options: RenderOptions::default().with_resolution(512, 512),
        spheres,
        triangle: Some(TriangleDesc {
            vertices: [
                Vec2::new(491.407, 411.407),
                Vec2::new(148.593, 68.5928),
                Vec2::new(148.593, 411.407),
            ],
            colors: [
                Color::new(1.0, 0.0, 0.0),
                Color::new(0.0, 1.0, 0.0),
                Color::new(0.0, 0.0, 1.0),
            ],
        }),
    }
}

fn render_triangle(scene: &Scene, out_dir: &Path) -> Result<()> {
    let Some(triangle) = scene.build_triangle().context("Invalid triangle")? else {
        log::info!("Scene has no triangle, skipping rasterizer");
        return Ok(());
    };

    let RenderOptions { width, height } = scene.options;
    let start = Instant::now();
    let buffer = rasterize(&triangle, width, height).context("Rasterization failed")?;
    log::info!("Rasterized {width}x{height} in {:?}", start.elapsed());

    output::save(out_dir.join("triangle.ppm"), &buffer).context("Failed to save triangle image")?;
    Ok(())
}

fn render_spheres(scene: &Scene, out_dir: &Path) -> Result<()> {
    let spheres = scene.build_spheres();
    let camera = scene.build_camera();

    let start = Instant::now();
    let image = render(&spheres, &camera, &scene.options).context("Ray tracing failed")?;
    log::info!(
        "Traced {} spheres at {}x{} in {:?}",
        spheres.len(),
        image.width,
        image.height,
        start.elapsed()
    );

    output::save(out_dir.join("tracer.ppm"), &image.to_rgb()).context("Failed to save tracer image")?;
    Ok(())
}
