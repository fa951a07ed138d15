//! Decoded source image handed to the VDP at construction.
//!
//! The top row defines the palette; every remaining row is sprite/tile data
//! preloaded into page 0. Decoding (PNG or otherwise) happens outside this
//! crate; the VDP only sees raw RGBA8 bytes.

/// An RGBA8 image: `width * height * 4` bytes, row-major, `[r, g, b, a]` per
/// pixel.
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl SourceImage {
    /// Wrap raw RGBA8 bytes.
    ///
    /// # Panics
    ///
    /// Panics if `rgba` is not exactly `width * height * 4` bytes.
    #[must_use]
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        assert_eq!(
            rgba.len(),
            width as usize * height as usize * 4,
            "RGBA buffer size must match dimensions"
        );
        Self {
            width,
            height,
            rgba,
        }
    }

    /// Packed ARGB32 value of the pixel at (x, y).
    pub(crate) fn argb(&self, x: u32, y: u32) -> u32 {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let r = self.rgba[offset];
        let g = self.rgba[offset + 1];
        let b = self.rgba[offset + 2];
        let a = self.rgba[offset + 3];
        crate::palette::pack_argb(r, g, b, a)
    }
}
