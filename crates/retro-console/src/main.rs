//! Headless retro console demo binary.
//!
//! Loads a PNG atlas (top row = palette, remaining rows = page 0 sprite
//! data), draws a scene exercising every engine primitive, and saves the
//! rendered frame as a PNG screenshot.

use std::path::PathBuf;
use std::process;

use format_atlas::AtlasImage;
use retro_console::{Console, ConsoleConfig, capture};

/// Default screen dimensions.
const DEFAULT_WIDTH: u32 = 256;
const DEFAULT_HEIGHT: u32 = 192;
const DEFAULT_PAGES: usize = 4;

struct CliArgs {
    atlas_path: Option<PathBuf>,
    width: u32,
    height: u32,
    pages: usize,
    screenshot_path: PathBuf,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        atlas_path: None,
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        pages: DEFAULT_PAGES,
        screenshot_path: PathBuf::from("screenshot.png"),
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--atlas" => {
                i += 1;
                cli.atlas_path = args.get(i).map(PathBuf::from);
            }
            "--width" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.width = s.parse().unwrap_or(DEFAULT_WIDTH);
                }
            }
            "--height" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.height = s.parse().unwrap_or(DEFAULT_HEIGHT);
                }
            }
            "--pages" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.pages = s.parse().unwrap_or(DEFAULT_PAGES);
                }
            }
            "--screenshot" => {
                i += 1;
                if let Some(s) = args.get(i) {
                    cli.screenshot_path = PathBuf::from(s);
                }
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn print_usage() {
    eprintln!("Usage: retro-console --atlas <atlas.png> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --atlas <path>       PNG atlas: top row = palette, rest = page 0 data");
    eprintln!("  --width <pixels>     Screen width (default {DEFAULT_WIDTH})");
    eprintln!("  --height <pixels>    Screen height (default {DEFAULT_HEIGHT})");
    eprintln!("  --pages <count>      Game-data pages (default {DEFAULT_PAGES})");
    eprintln!("  --screenshot <path>  Output PNG (default screenshot.png)");
}

/// Draw a scene touching every primitive: clear, lines, rectangle, ellipse,
/// triangle, dithered fill, plain and scaled blits from page 0.
fn draw_demo_scene(console: &mut Console) {
    let vdp = console.vdp_mut();
    let w = vdp.width() as i32;
    let h = vdp.height() as i32;
    let n = vdp.palette().len() as i32;

    vdp.clear(0);

    // Dithered sky gradient across the top half.
    vdp.rect_fill(0, 0, w - 1, h / 2, 1, 2 % n, 0.5);

    // Horizon and a sun.
    vdp.line(0, h / 2, w - 1, h / 2, n - 1, n - 1, 1.0);
    vdp.ellipse_fill(w / 2 - 12, 8, w / 2 + 12, 32, n - 1, n - 2, 0.75);

    // A mountain.
    vdp.tri_fill(
        (w / 8, h / 2),
        (w / 2, h / 8),
        (7 * w / 8, h / 2),
        2 % n,
        1,
        0.5,
    );

    // Sprite data from the atlas, plain and 2x scaled.
    vdp.blit_from_page(0, 8, h / 2 + 8, 0, 0, 32, 32);
    vdp.scaled_blit(0, 0, 0, 32, 32, 64, h / 2 + 8, 64, 64);
}

fn main() {
    let cli = parse_args();

    let Some(atlas_path) = cli.atlas_path else {
        eprintln!("An atlas is required.");
        print_usage();
        process::exit(1);
    };

    let atlas = match AtlasImage::load_png(&atlas_path) {
        Ok(atlas) => atlas,
        Err(err) => {
            eprintln!("Failed to load atlas {}: {err}", atlas_path.display());
            process::exit(1);
        }
    };

    let config = ConsoleConfig {
        width: cli.width,
        height: cli.height,
        pages: cli.pages,
        atlas,
    };
    let mut console = match Console::new(&config) {
        Ok(console) => console,
        Err(err) => {
            eprintln!("Failed to create console: {err}");
            process::exit(1);
        }
    };

    draw_demo_scene(&mut console);

    if let Err(err) = capture::save_screenshot(&mut console, &cli.screenshot_path) {
        eprintln!("Failed to save screenshot: {err}");
        process::exit(1);
    }
    eprintln!("Saved screenshot to {}", cli.screenshot_path.display());
}
