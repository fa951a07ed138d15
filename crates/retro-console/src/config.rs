//! Console configuration.

use format_atlas::AtlasImage;

/// Configuration for creating a console instance.
pub struct ConsoleConfig {
    /// Screen width in pixels.
    pub width: u32,
    /// Screen height in pixels.
    pub height: u32,
    /// Number of `width * height` game-data pages.
    pub pages: usize,
    /// Decoded atlas: top row is the palette, remaining rows preload
    /// page 0 (font/sprite data).
    pub atlas: AtlasImage,
}
