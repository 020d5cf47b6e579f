//! Frame buffers shared by both renderers.
//!
//! The ray tracer produces an [`ImageBuffer`] of linear float colors; the
//! rasterizer writes quantized bytes straight into an [`RgbBuffer`]. Both are
//! row-major, addressed as `x + y * width`.

use ember_math::Vec3;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a color to 8-bit RGB.
///
/// Channels are clamped to [0, 1], scaled by 255 and truncated, so values
/// pushed out of range by interpolation or shading saturate instead of
/// wrapping. NaN channels come out as 0.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let r = (255.0 * clamp_01(color.x)) as u8;
    let g = (255.0 * clamp_01(color.y)) as u8;
    let b = (255.0 * clamp_01(color.z)) as u8;
    [r, g, b]
}

/// Float image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Quantize to 8-bit RGB (for display or saving).
    pub fn to_rgb(&self) -> RgbBuffer {
        RgbBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|c| color_to_rgb(*c)).collect(),
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }
}

/// 8-bit RGB buffer, one `[r, g, b]` triple per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<[u8; 3]>,
}

impl RgbBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Iterate over the image rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[[u8; 3]]> {
        // chunks() panics on zero; a zero-width buffer has no pixels anyway
        self.pixels.chunks(self.width.max(1) as usize)
    }

    /// Flatten to `r, g, b, r, g, b, ...` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flatten().copied().collect()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }
}
