//! The VDP chip: construction, screen-target selection, the pixel
//! compositor, block transfer, and render.
//!
//! Every drawing primitive in this crate (including the rasterizers in
//! `raster.rs`) decomposes into [`Vdp::pset_mix`] calls, so the color table
//! filters every pixel write uniformly. The two deliberate exceptions are
//! [`Vdp::clear`], defined as an absolute reset rather than a compositing
//! operation, and direct page access, which edits game data rather than
//! drawing.

use crate::color_table::ColorTable;
use crate::dither;
use crate::error::VdpError;
use crate::memory::PagedMemory;
use crate::palette::Palette;
use crate::source::SourceImage;

/// Indexed-color video display processor.
pub struct Vdp {
    width: u32,
    height: u32,
    palette: Palette,
    table: ColorTable,
    mem: PagedMemory,
    /// Packed ARGB32 output, regenerated in full by every `render` call.
    output: Vec<u32>,
}

impl Vdp {
    /// Create a VDP with a `width * height` screen and `pages` data pages.
    ///
    /// The source image's top row becomes the palette. Every remaining row
    /// is decoded through the palette (exact color match, miss maps to
    /// index 0) and preloaded into page 0 at the matching coordinate, so one
    /// image defines both the palette and an initial sprite/font atlas.
    /// Rows and columns beyond the page extent are clipped, not errors.
    ///
    /// # Errors
    ///
    /// `InvalidPalette` when the top row is not 2..=256 pixels wide.
    pub fn new(
        width: u32,
        height: u32,
        pages: usize,
        source: &SourceImage,
    ) -> Result<Self, VdpError> {
        let palette = Palette::from_image(source)?;
        let table = ColorTable::identity(palette.len());
        let page_size = width as usize * height as usize;
        let mut mem = PagedMemory::new(page_size, pages);

        // Preload page 0 from the sprite rows (row 0 is the palette).
        if let Some(page) = mem.page_mut(0) {
            let max_rows = source.height.saturating_sub(1).min(height);
            let max_cols = source.width.min(width);
            for yy in 0..max_rows {
                for xx in 0..max_cols {
                    let argb = source.argb(xx, yy + 1);
                    let index = palette.index_of(argb).unwrap_or(0);
                    page[(yy * width + xx) as usize] = index;
                }
            }
        }

        Ok(Self {
            width,
            height,
            palette,
            table,
            mem,
            output: vec![0; page_size],
        })
    }

    /// Screen width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Screen height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of data pages.
    #[must_use]
    pub fn pages(&self) -> usize {
        self.mem.pages()
    }

    /// The fixed palette.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    // === Screen target ===

    /// Bind the draw/render target: -1 for the dedicated screen buffer,
    /// 0..pages for a data page (by reference, not copy).
    ///
    /// # Errors
    ///
    /// `OutOfRange` for any other page number. A failed call leaves the
    /// previous binding in place.
    pub fn set_screen_page(&mut self, page: i32) -> Result<(), VdpError> {
        self.mem.bind(page)
    }

    /// Currently bound page, or -1 for the dedicated screen buffer.
    #[must_use]
    pub fn screen_page(&self) -> i32 {
        self.mem.screen_page()
    }

    /// Index bytes of the currently bound screen buffer.
    #[must_use]
    pub fn screen_buffer(&self) -> &[u8] {
        self.mem.screen()
    }

    /// Index bytes of page `p`, if it exists.
    #[must_use]
    pub fn page(&self, p: usize) -> Option<&[u8]> {
        self.mem.page(p)
    }

    /// Mutable index bytes of page `p`, for direct sprite/tile preloading.
    pub fn page_mut(&mut self, p: usize) -> Option<&mut [u8]> {
        self.mem.page_mut(p)
    }

    // === Compositor ===

    /// Plot one pixel with a single color index. Equivalent to
    /// `pset_mix(x, y, c, c, 0.5)`.
    pub fn pset(&mut self, x: i32, y: i32, c: i32) {
        self.pset_mix(x, y, c, c, 0.5);
    }

    /// The pixel compositor: every drawing operation funnels through here.
    ///
    /// `c1`/`c2` wrap modulo the palette size (negatives included). The
    /// dither threshold at (x, y) picks one of the two as the candidate —
    /// `c1` where `threshold < floor(mix * 255)` — giving a stable 4×4
    /// interleave whose density follows `mix`. The candidate is then
    /// resolved through the color table against the pixel's existing index
    /// and written back. Out-of-buffer coordinates are silently ignored.
    pub fn pset_mix(&mut self, x: i32, y: i32, c1: i32, c2: i32, mix: f32) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }

        let i1 = self.palette.wrap(c1);
        let i2 = self.palette.wrap(c2);
        let threshold = (mix * 255.0).floor() as i32;
        let candidate = if i32::from(dither::threshold(x, y)) < threshold {
            i1
        } else {
            i2
        };

        let offset = (y as u32 * self.width + x as u32) as usize;
        let screen = self.mem.screen_mut();
        let existing = screen[offset];
        screen[offset] = self.table.lookup(existing, candidate);
    }

    /// Fill the whole bound buffer with one wrapped index. An absolute
    /// reset: bypasses the color table.
    pub fn clear(&mut self, c: i32) {
        let index = self.palette.wrap(c);
        self.mem.screen_mut().fill(index);
    }

    // === Block transfer ===

    /// Copy a `w * h` window from page `p` onto the bound buffer at
    /// (dx, dy), one compositor call per pixel.
    ///
    /// Source and destination coordinates clip independently; a partial
    /// overlap copies the visible part. Index 0 passes through the default
    /// color table unchanged, so sprites get "index 0 = transparent" with
    /// no extra branch. A bad page number is a silent no-op.
    pub fn blit_from_page(&mut self, p: i32, dx: i32, dy: i32, sx: i32, sy: i32, w: i32, h: i32) {
        if p < 0 || p as usize >= self.mem.pages() {
            return;
        }
        let page = p as usize;

        for yy in 0..h {
            let src_y = sy + yy;
            if src_y < 0 || src_y >= self.height as i32 {
                continue;
            }
            for xx in 0..w {
                let src_x = sx + xx;
                if src_x < 0 || src_x >= self.width as i32 {
                    continue;
                }
                let offset = (src_y as u32 * self.width + src_x as u32) as usize;
                let index = self.mem.page_byte(page, offset);
                self.pset(dx + xx, dy + yy, i32::from(index));
            }
        }
    }

    /// Copy a `sw * sh` window from page `p`, scaled to `dw * dh` on the
    /// bound buffer, nearest-neighbor with independent axis factors.
    ///
    /// Destination pixel (xx, yy) samples source
    /// `(sx + floor(xx*sw/dw), sy + floor(yy*sh/dh))`; flooring keeps the
    /// sampling consistent when `sw`/`sh` are negative (a mirrored source
    /// window). Clipping and compositor routing are identical to
    /// [`Vdp::blit_from_page`].
    pub fn scaled_blit(
        &mut self,
        p: i32,
        sx: i32,
        sy: i32,
        sw: i32,
        sh: i32,
        dx: i32,
        dy: i32,
        dw: i32,
        dh: i32,
    ) {
        if p < 0 || p as usize >= self.mem.pages() || dw <= 0 || dh <= 0 {
            return;
        }
        let page = p as usize;

        for yy in 0..dh {
            let src_y = sy + (yy * sh).div_euclid(dh);
            if src_y < 0 || src_y >= self.height as i32 {
                continue;
            }
            for xx in 0..dw {
                let src_x = sx + (xx * sw).div_euclid(dw);
                if src_x < 0 || src_x >= self.width as i32 {
                    continue;
                }
                let offset = (src_y as u32 * self.width + src_x as u32) as usize;
                let index = self.mem.page_byte(page, offset);
                self.pset(dx + xx, dy + yy, i32::from(index));
            }
        }
    }

    // === Render ===

    /// Materialize the bound buffer into packed ARGB32 output through the
    /// palette: `output[i] = palette[buffer[i]]`, linear scan. Regenerates
    /// the whole output buffer and changes no other engine state.
    pub fn render(&mut self) -> &[u32] {
        let screen = self.mem.screen();
        for (out, &index) in self.output.iter_mut().zip(screen) {
            *out = self.palette.color(usize::from(index));
        }
        &self.output
    }

    /// Output of the most recent [`Vdp::render`] call.
    #[must_use]
    pub fn output(&self) -> &[u32] {
        &self.output
    }

    // === Color table management ===

    /// Restore the default table: index 0 transparent, i >= 1 overwrites.
    pub fn reset_color_table_to_identity(&mut self) {
        self.table.reset_to_identity();
    }

    /// Recolor: drawing `sources[k]` yields `targets[k]` for every existing
    /// pixel value. See [`ColorTable::remap`].
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` when the slices differ in length.
    pub fn remap_colors(&mut self, sources: &[i32], targets: &[i32]) -> Result<(), VdpError> {
        self.table.remap(sources, targets)
    }

    /// Override a single table entry. See [`ColorTable::set_entry`].
    ///
    /// # Errors
    ///
    /// `OutOfRange` unless all three indices are below the palette size.
    pub fn set_color_table_entry(
        &mut self,
        existing: usize,
        incoming: usize,
        result: usize,
    ) -> Result<(), VdpError> {
        self.table.set_entry(existing, incoming, result)
    }

    /// Build a blend table from the palette without installing it. Install
    /// via [`Vdp::set_color_table_from`] when the effect is needed.
    #[must_use]
    pub fn create_blend_table(&self, equation: impl Fn(u32, u32) -> [u8; 4]) -> ColorTable {
        ColorTable::from_blend(&self.palette, equation)
    }

    /// Bulk-install a full table from a flat `N * N` slice.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` when the slice is not exactly `N * N` long.
    pub fn set_color_table_from(&mut self, entries: &[u8]) -> Result<(), VdpError> {
        self.table.load(entries)
    }
}
