//! Headless capture: PNG screenshots of rendered frames.

use std::error::Error;
use std::fs;
use std::io::BufWriter;
use std::path::Path;

use crate::Console;

/// Render the console's bound screen buffer and save it as a PNG file.
///
/// The render output is packed ARGB32 (`u32` array). This converts to RGBA
/// bytes for the PNG encoder.
pub fn save_screenshot(console: &mut Console, path: &Path) -> Result<(), Box<dyn Error>> {
    let width = console.framebuffer_width();
    let height = console.framebuffer_height();
    let fb = console.render();

    let file = fs::File::create(path)?;
    let w = BufWriter::new(file);
    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;

    // Convert ARGB32 -> RGBA bytes
    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for &pixel in fb {
        rgba.push(((pixel >> 16) & 0xFF) as u8);
        rgba.push(((pixel >> 8) & 0xFF) as u8);
        rgba.push((pixel & 0xFF) as u8);
        rgba.push(((pixel >> 24) & 0xFF) as u8);
    }

    writer.write_image_data(&rgba)?;
    Ok(())
}
