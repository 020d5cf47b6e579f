//! Image output.
//!
//! Plain-text PPM (`P3`) is the native format: a header of tag, size and
//! maximum channel value, then one line per image row of space-separated
//! `r g b` triples. Other formats go through the `image` crate.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{RenderError, RenderResult};
use crate::framebuffer::RgbBuffer;

/// Maximum channel value written to the header.
const MAX_VALUE: u32 = 255;

/// Write a buffer as P3 text.
pub fn write_ppm<W: Write>(out: &mut W, buffer: &RgbBuffer) -> std::io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", buffer.width, buffer.height)?;
    writeln!(out, "{MAX_VALUE}")?;

    for row in buffer.rows() {
        for (i, [r, g, b]) in row.iter().enumerate() {
            if i != 0 {
                write!(out, " ")?;
            }
            write!(out, "{r} {g} {b}")?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Save a buffer as a P3 file.
pub fn save_ppm(path: impl AsRef<Path>, buffer: &RgbBuffer) -> RenderResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_ppm(&mut writer, buffer)?;
    writer.flush()?;

    log::info!("Saved {}x{} PPM to {}", buffer.width, buffer.height, path.display());
    Ok(())
}

/// Save a buffer through the `image` crate; the format follows the extension.
pub fn save_png(path: impl AsRef<Path>, buffer: &RgbBuffer) -> RenderResult<()> {
    let path = path.as_ref();
    let image = image::RgbImage::from_raw(buffer.width, buffer.height, buffer.to_bytes())
        .ok_or_else(|| {
            RenderError::InvalidOptions(format!(
                "buffer holds {} pixels, expected {}x{}",
                buffer.pixels.len(),
                buffer.width,
                buffer.height
            ))
        })?;
    image.save(path)?;

    log::info!("Saved {}x{} image to {}", buffer.width, buffer.height, path.display());
    Ok(())
}

/// Save a buffer, choosing P3 text for `.ppm` and the `image` crate otherwise.
pub fn save(path: impl AsRef<Path>, buffer: &RgbBuffer) -> RenderResult<()> {
    let path = path.as_ref();
    let is_ppm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));

    if is_ppm {
        save_ppm(path, buffer)
    } else {
        save_png(path, buffer)
    }
}

/// Parse P3 text into a buffer.
///
/// Whitespace layout is free and `#` starts a comment running to the end of
/// the line. Channels are rescaled to 0-255 if the header's maximum value
/// differs.
pub fn parse_ppm(text: &str) -> RenderResult<RgbBuffer> {
    let mut tokens = text.lines().enumerate().flat_map(|(i, line)| {
        let content = line.split('#').next().unwrap_or("");
        content.split_whitespace().map(move |token| (i + 1, token))
    });

    let last_line = text.lines().count().max(1);
    let mut next = |what: &str| {
        tokens
            .next()
            .ok_or_else(|| RenderError::parse(last_line, format!("unexpected end of file, expected {what}")))
    };

    let (line, magic) = next("format tag")?;
    if magic != "P3" {
        return Err(RenderError::parse(line, format!("expected P3, found '{magic}'")));
    }

    let width = parse_number(next("width")?)?;
    let (line, height_token) = next("height")?;
    let height = parse_number((line, height_token))?;
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| RenderError::parse(line, format!("image size {width}x{height} is too large")))?;
    let (line, max_token) = next("maximum value")?;
    let max_value = parse_number((line, max_token))?;
    if max_value == 0 || max_value > MAX_VALUE {
        return Err(RenderError::parse(
            line,
            format!("maximum value must be in 1..={MAX_VALUE}, got {max_value}"),
        ));
    }

    // Grown as tokens arrive; the header alone is not trusted for sizing
    let mut pixels = Vec::new();
    for _ in 0..pixel_count {
        let mut rgb = [0u8; 3];
        for channel in rgb.iter_mut() {
            let (line, token) = next("channel value")?;
            let value = parse_number((line, token))?;
            if value > max_value {
                return Err(RenderError::parse(
                    line,
                    format!("channel value {value} exceeds maximum {max_value}"),
                ));
            }
            *channel = (value * MAX_VALUE / max_value) as u8;
        }
        pixels.push(rgb);
    }

    if let Some((line, token)) = tokens.next() {
        return Err(RenderError::parse(line, format!("trailing data '{token}'")));
    }

    Ok(RgbBuffer { width, height, pixels })
}

/// Read a P3 file into a buffer.
pub fn read_ppm(path: impl AsRef<Path>) -> RenderResult<RgbBuffer> {
    let text = fs::read_to_string(path)?;
    parse_ppm(&text)
}

fn parse_number((line, token): (usize, &str)) -> RenderResult<u32> {
    token
        .parse()
        .map_err(|_| RenderError::parse(line, format!("expected a non-negative integer, found '{token}'")))
}
