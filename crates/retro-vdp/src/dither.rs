//! Ordered-dithering threshold table.
//!
//! A fixed 4×4 Bayer matrix, addressed by `(y mod 4, x mod 4)`. Because the
//! threshold depends only on pixel position, interleaving two colors through
//! it is deterministic and stable — no flicker, no dependence on draw order.

/// 4×4 Bayer thresholds, row-major.
const BAYER_4X4: [u8; 16] = [
    15, 135, 45, 165, //
    195, 75, 225, 105, //
    60, 180, 30, 150, //
    240, 120, 210, 90,
];

/// Threshold for the pixel at (x, y). Coordinates must be non-negative.
pub(crate) fn threshold(x: i32, y: i32) -> u8 {
    BAYER_4X4[(((y & 3) << 2) | (x & 3)) as usize]
}
