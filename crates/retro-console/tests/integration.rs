//! Integration tests for the retro console.
//!
//! These build a small atlas PNG in memory, boot a console from it, draw
//! through the engine primitives, and verify the rendered output. Artefacts
//! are saved to `test_output/` at the repository root for visual inspection.

use std::path::Path;

use format_atlas::AtlasImage;
use retro_console::{Console, ConsoleConfig, capture::save_screenshot};

/// Output directory for test artefacts (repo root's test_output/).
const OUTPUT_DIR: &str = "../../test_output";

fn ensure_output_dir() {
    let _ = std::fs::create_dir_all(OUTPUT_DIR);
}

/// Encode an RGBA8 image as a PNG in memory.
fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(rgba).unwrap();
    }
    out
}

/// A 4-color atlas: palette row (black, white, red, blue) plus two sprite
/// rows holding a 2×2 red/blue checker at the page origin.
fn test_atlas() -> AtlasImage {
    let black = [0u8, 0, 0, 255];
    let white = [255, 255, 255, 255];
    let red = [255, 0, 0, 255];
    let blue = [0, 0, 255, 255];

    let mut rgba = Vec::new();
    for px in [black, white, red, blue] {
        rgba.extend_from_slice(&px);
    }
    for px in [red, blue, black, black] {
        rgba.extend_from_slice(&px);
    }
    for px in [blue, red, black, black] {
        rgba.extend_from_slice(&px);
    }

    let bytes = encode_png(4, 3, &rgba);
    AtlasImage::from_png_bytes(&bytes).expect("test atlas must decode")
}

fn make_console(width: u32, height: u32, pages: usize) -> Console {
    let config = ConsoleConfig {
        width,
        height,
        pages,
        atlas: test_atlas(),
    };
    Console::new(&config).expect("console must build from the test atlas")
}

#[test]
fn atlas_round_trips_into_page_zero() {
    let console = make_console(8, 8, 2);
    let page = console.vdp().page(0).unwrap();
    // Sprite rows: red=2, blue=3 checker; the rest stays 0.
    assert_eq!(&page[0..2], &[2, 3]);
    assert_eq!(&page[8..10], &[3, 2]);
    assert_eq!(page[4], 0);
}

#[test]
fn draw_blit_render_pipeline() {
    let mut console = make_console(8, 8, 2);
    let vdp = console.vdp_mut();
    vdp.clear(1);
    vdp.blit_from_page(0, 3, 3, 0, 0, 2, 2);

    let fb = console.render();
    // Blitted checker lands through the compositor.
    assert_eq!(fb[3 * 8 + 3], 0xFFFF_0000, "red at (3,3)");
    assert_eq!(fb[3 * 8 + 4], 0xFF00_00FF, "blue at (4,3)");
    // Pixels outside the blit window are untouched.
    assert_eq!(fb[0], 0xFFFF_FFFF, "white background survives");
}

#[test]
fn recolor_via_color_table() {
    let mut console = make_console(8, 8, 1);
    let vdp = console.vdp_mut();
    vdp.clear(0);
    // Draw the sprite with red remapped to white.
    vdp.remap_colors(&[2], &[1]).unwrap();
    vdp.blit_from_page(0, 0, 0, 0, 0, 2, 2);
    let fb = console.render();
    assert_eq!(fb[0], 0xFFFF_FFFF, "red recolored to white");
    assert_eq!(fb[1], 0xFF00_00FF, "blue untouched");
}

#[test]
fn invalid_atlas_is_rejected() {
    // Single-pixel-wide palette row.
    let bytes = encode_png(1, 1, &[0, 0, 0, 255]);
    let atlas = AtlasImage::from_png_bytes(&bytes).unwrap();
    let config = ConsoleConfig {
        width: 8,
        height: 8,
        pages: 1,
        atlas,
    };
    assert!(Console::new(&config).is_err());
}

#[test]
fn screenshot_artefact() {
    ensure_output_dir();

    let mut console = make_console(64, 64, 2);
    let vdp = console.vdp_mut();
    vdp.clear(0);
    vdp.rect_fill(4, 4, 59, 59, 1, 0, 0.5);
    vdp.ellipse_fill(16, 16, 47, 47, 2, 3, 0.5);
    vdp.tri_fill((8, 56), (32, 8), (56, 56), 3, 0, 0.75);
    vdp.line(0, 0, 63, 63, 1, 1, 1.0);

    let path = Path::new(OUTPUT_DIR).join("console_demo.png");
    save_screenshot(&mut console, &path).expect("Failed to save screenshot");
    assert!(path.exists(), "Screenshot should exist");

    // Round-trip: the capture decodes back to the rendered frame.
    let decoded = AtlasImage::load_png(&path).expect("capture must decode");
    assert_eq!(decoded.width, 64);
    assert_eq!(decoded.height, 64);
    let fb = console.render();
    let first = decoded.rgba[0..4].to_vec();
    let argb = fb[0];
    assert_eq!(
        first,
        vec![
            ((argb >> 16) & 0xFF) as u8,
            ((argb >> 8) & 0xFF) as u8,
            (argb & 0xFF) as u8,
            ((argb >> 24) & 0xFF) as u8,
        ]
    );
    eprintln!("Saved demo screenshot to {}", path.display());
}
