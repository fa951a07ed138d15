//! Fixed palette extracted from a source image's top row.
//!
//! Colors are packed ARGB32 (`a << 24 | r << 16 | g << 8 | b`). The palette
//! is immutable after construction; a reverse map from packed color to index
//! is built once so sprite rows can be decoded back to indices.

use std::collections::HashMap;

use crate::error::VdpError;
use crate::source::SourceImage;

/// Pack RGBA channels into an ARGB32 value.
pub(crate) fn pack_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (u32::from(a) << 24) | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
}

/// Unpack an ARGB32 value into `[r, g, b, a]`.
pub(crate) fn unpack_argb(argb: u32) -> [u8; 4] {
    [
        ((argb >> 16) & 0xFF) as u8,
        ((argb >> 8) & 0xFF) as u8,
        (argb & 0xFF) as u8,
        ((argb >> 24) & 0xFF) as u8,
    ]
}

/// Ordered set of 2..=256 packed ARGB32 colors.
pub struct Palette {
    colors: Vec<u32>,
    /// Packed color -> index. On duplicate colors the last index wins.
    reverse: HashMap<u32, u8>,
}

impl Palette {
    /// Extract the palette from the top row of `source`.
    ///
    /// # Errors
    ///
    /// `InvalidPalette` when the row width is outside 2..=256 or the image
    /// has no rows at all.
    pub fn from_image(source: &SourceImage) -> Result<Self, VdpError> {
        let n = source.width;
        if source.height == 0 || !(2..=256).contains(&n) {
            return Err(VdpError::InvalidPalette(n));
        }

        let mut colors = Vec::with_capacity(n as usize);
        let mut reverse = HashMap::with_capacity(n as usize);
        for i in 0..n {
            let argb = source.argb(i, 0);
            colors.push(argb);
            reverse.insert(argb, i as u8);
        }
        Ok(Self { colors, reverse })
    }

    /// Number of palette entries (N).
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// All entries, in palette order.
    #[must_use]
    pub fn colors(&self) -> &[u32] {
        &self.colors
    }

    /// Packed color at `index`. Indices wrap modulo N.
    #[must_use]
    pub fn color(&self, index: usize) -> u32 {
        self.colors[index % self.colors.len()]
    }

    /// Index of an exact packed-color match, if any.
    #[must_use]
    pub fn index_of(&self, argb: u32) -> Option<u8> {
        self.reverse.get(&argb).copied()
    }

    /// Wrap a signed index into 0..N, mapping negative values into range.
    #[must_use]
    pub fn wrap(&self, index: i32) -> u8 {
        let n = self.colors.len() as i32;
        index.rem_euclid(n) as u8
    }

    /// Index of the entry nearest to `[r, g, b, a]` by squared Euclidean
    /// distance over all four channels. Linear scan; run rarely (table
    /// construction, not per-pixel).
    #[must_use]
    pub fn nearest(&self, rgba: [u8; 4]) -> u8 {
        let mut best = 0;
        let mut best_distance = i32::MAX;
        for (i, &color) in self.colors.iter().enumerate() {
            let candidate = unpack_argb(color);
            let mut distance = 0;
            for ch in 0..4 {
                let d = i32::from(rgba[ch]) - i32::from(candidate[ch]);
                distance += d * d;
            }
            if distance < best_distance {
                best_distance = distance;
                best = i as u8;
            }
        }
        best
    }
}
