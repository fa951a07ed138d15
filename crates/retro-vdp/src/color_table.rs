//! Programmable compositing table.
//!
//! An N×N matrix of palette indices: `table[existing][incoming]` is what a
//! pixel holding `existing` becomes when `incoming` is drawn over it. Every
//! pixel write the VDP performs goes through this lookup, so transparency,
//! stencils, recolors, and blend effects are all table state — data, not
//! code paths — and swappable at runtime.
//!
//! The default (identity) table makes index 0 transparent:
//! `table[e][0] = e`, and `table[e][i] = i` for i >= 1.

use crate::error::VdpError;
use crate::palette::{Palette, unpack_argb};

/// N×N compositing table, stored flat as `entries[e * n + i]`.
pub struct ColorTable {
    n: usize,
    entries: Vec<u8>,
}

impl ColorTable {
    /// The default table for an N-entry palette: index 0 is transparent,
    /// everything else overwrites.
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let mut table = Self {
            n,
            entries: vec![0; n * n],
        };
        table.reset_to_identity();
        table
    }

    /// Build a blend table from a palette: entry (e, i) is the palette index
    /// nearest to `equation(palette[e], palette[i])` by squared Euclidean
    /// distance over all four channels. O(N^3); run at table construction,
    /// not per pixel.
    ///
    /// The equation receives two packed ARGB32 colors and returns blended
    /// `[r, g, b, a]` channels. See [`blend_additive`] and
    /// [`blend_multiply`].
    #[must_use]
    pub fn from_blend(palette: &Palette, equation: impl Fn(u32, u32) -> [u8; 4]) -> Self {
        let n = palette.len();
        let mut entries = Vec::with_capacity(n * n);
        for e in 0..n {
            for i in 0..n {
                let blended = equation(palette.color(e), palette.color(i));
                entries.push(palette.nearest(blended));
            }
        }
        Self { n, entries }
    }

    /// Table dimension (N, the palette size).
    #[must_use]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Flat view of the table, `entries[e * n + i]`.
    #[must_use]
    pub fn entries(&self) -> &[u8] {
        &self.entries
    }

    /// Resolve one pixel write: what does `existing` become when `incoming`
    /// is drawn? Indices wrap modulo N, so a table bulk-loaded with
    /// out-of-palette values cannot push a lookup out of bounds.
    pub(crate) fn lookup(&self, existing: u8, incoming: u8) -> u8 {
        let e = usize::from(existing) % self.n;
        let i = usize::from(incoming) % self.n;
        self.entries[e * self.n + i]
    }

    /// Restore the default invariant: `table[e][0] = e`, `table[e][i] = i`
    /// for i >= 1.
    pub fn reset_to_identity(&mut self) {
        for e in 0..self.n {
            self.entries[e * self.n] = e as u8;
            for i in 1..self.n {
                self.entries[e * self.n + i] = i as u8;
            }
        }
    }

    /// For every existing-row e, set `table[e][sources[k]] = targets[k]`.
    /// Drawing any source index then lands as the matching target,
    /// regardless of what is already on screen — a uniform sprite recolor.
    /// Indices wrap modulo N.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` when the two slices differ in length.
    pub fn remap(&mut self, sources: &[i32], targets: &[i32]) -> Result<(), VdpError> {
        if sources.len() != targets.len() {
            return Err(VdpError::ShapeMismatch {
                expected: sources.len(),
                got: targets.len(),
            });
        }

        let n = self.n as i32;
        for (&source, &target) in sources.iter().zip(targets) {
            let src = source.rem_euclid(n) as usize;
            let tgt = target.rem_euclid(n) as u8;
            for e in 0..self.n {
                self.entries[e * self.n + src] = tgt;
            }
        }
        Ok(())
    }

    /// Set a single entry: drawing `incoming` over `existing` yields
    /// `result`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` unless all three indices are below N.
    pub fn set_entry(
        &mut self,
        existing: usize,
        incoming: usize,
        result: usize,
    ) -> Result<(), VdpError> {
        for index in [existing, incoming, result] {
            if index >= self.n {
                return Err(VdpError::OutOfRange {
                    index: index as i64,
                    limit: self.n,
                });
            }
        }
        self.entries[existing * self.n + incoming] = result as u8;
        Ok(())
    }

    /// Bulk-load a full table from a flat slice of `N * N` entries.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` when the slice is not exactly `N * N` long.
    pub fn load(&mut self, entries: &[u8]) -> Result<(), VdpError> {
        if entries.len() != self.n * self.n {
            return Err(VdpError::ShapeMismatch {
                expected: self.n * self.n,
                got: entries.len(),
            });
        }
        self.entries.copy_from_slice(entries);
        Ok(())
    }
}

/// Additive blend: per-channel sum, clamped to 255. Used for light effects.
#[must_use]
pub fn blend_additive(existing: u32, incoming: u32) -> [u8; 4] {
    let e = unpack_argb(existing);
    let i = unpack_argb(incoming);
    [
        e[0].saturating_add(i[0]),
        e[1].saturating_add(i[1]),
        e[2].saturating_add(i[2]),
        e[3].saturating_add(i[3]),
    ]
}

/// Multiplicative blend: per-channel product normalized by 255. Used for
/// shadow/tint effects.
#[must_use]
pub fn blend_multiply(existing: u32, incoming: u32) -> [u8; 4] {
    let e = unpack_argb(existing);
    let i = unpack_argb(incoming);
    let mul = |a: u8, b: u8| ((u16::from(a) * u16::from(b)) / 255) as u8;
    [
        mul(e[0], i[0]),
        mul(e[1], i[1]),
        mul(e[2], i[2]),
        mul(e[3], i[3]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceImage;

    fn grey_ramp_palette() -> Palette {
        // 0: black, 1: dark grey, 2: light grey, 3: white (all opaque).
        let rgba: Vec<u8> = [0u8, 85, 170, 255]
            .iter()
            .flat_map(|&v| [v, v, v, 255])
            .collect();
        Palette::from_image(&SourceImage::new(4, 1, rgba)).unwrap()
    }

    #[test]
    fn identity_makes_zero_transparent() {
        let table = ColorTable::identity(4);
        for e in 0..4u8 {
            assert_eq!(table.lookup(e, 0), e, "drawing 0 must keep {e}");
            for i in 1..4u8 {
                assert_eq!(table.lookup(e, i), i, "drawing {i} must overwrite");
            }
        }
    }

    #[test]
    fn remap_applies_to_every_existing_row() {
        let mut table = ColorTable::identity(4);
        table.remap(&[1], &[2]).unwrap();
        for e in 0..4u8 {
            assert_eq!(table.lookup(e, 1), 2);
        }
        // Other columns untouched.
        assert_eq!(table.lookup(3, 2), 2);
        assert_eq!(table.lookup(3, 0), 3);
    }

    #[test]
    fn remap_wraps_negative_indices() {
        let mut table = ColorTable::identity(4);
        table.remap(&[-1], &[-3]).unwrap();
        // -1 wraps to 3, -3 wraps to 1.
        assert_eq!(table.lookup(0, 3), 1);
    }

    #[test]
    fn remap_rejects_length_mismatch() {
        let mut table = ColorTable::identity(4);
        assert_eq!(
            table.remap(&[1, 2], &[3]),
            Err(VdpError::ShapeMismatch {
                expected: 2,
                got: 1
            })
        );
    }

    #[test]
    fn set_entry_bounds_checked() {
        let mut table = ColorTable::identity(4);
        table.set_entry(1, 2, 3).unwrap();
        assert_eq!(table.lookup(1, 2), 3);
        assert_eq!(
            table.set_entry(4, 0, 0),
            Err(VdpError::OutOfRange { index: 4, limit: 4 })
        );
        assert_eq!(
            table.set_entry(0, 0, 4),
            Err(VdpError::OutOfRange { index: 4, limit: 4 })
        );
    }

    #[test]
    fn load_requires_exact_shape() {
        let mut table = ColorTable::identity(2);
        table.load(&[0, 1, 1, 0]).unwrap();
        assert_eq!(table.lookup(1, 1), 0);
        assert_eq!(
            table.load(&[0; 3]),
            Err(VdpError::ShapeMismatch {
                expected: 4,
                got: 3
            })
        );
    }

    #[test]
    fn reset_undoes_overrides() {
        let mut table = ColorTable::identity(4);
        table.remap(&[1], &[2]).unwrap();
        table.set_entry(0, 0, 3).unwrap();
        table.reset_to_identity();
        assert_eq!(table.lookup(0, 0), 0);
        assert_eq!(table.lookup(2, 1), 1);
    }

    #[test]
    fn additive_black_over_black_stays_black() {
        let palette = grey_ramp_palette();
        let table = ColorTable::from_blend(&palette, blend_additive);
        assert_eq!(table.lookup(0, 0), 0);
    }

    #[test]
    fn additive_blend_brightens() {
        let palette = grey_ramp_palette();
        let table = ColorTable::from_blend(&palette, blend_additive);
        // dark grey (85) + dark grey (85) = 170 -> light grey.
        assert_eq!(table.lookup(1, 1), 2);
        // light grey + light grey saturates -> white.
        assert_eq!(table.lookup(2, 2), 3);
        assert_eq!(table.lookup(3, 3), 3);
    }

    #[test]
    fn multiply_blend_darkens() {
        let palette = grey_ramp_palette();
        let table = ColorTable::from_blend(&palette, blend_multiply);
        // white * white stays white, anything * black goes black.
        assert_eq!(table.lookup(3, 3), 3);
        assert_eq!(table.lookup(3, 0), 0);
        // light grey (170) * light grey = 113 -> nearest is dark grey (85).
        assert_eq!(table.lookup(2, 2), 1);
    }
}
