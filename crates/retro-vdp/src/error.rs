//! VDP error taxonomy.
//!
//! Only three things can fail: palette extraction at construction, screen
//! target selection, and color-table management. Coordinate-level problems
//! (pixels, rectangles, blit windows partially or fully off the buffer) are
//! never errors — they clip silently, since partial off-screen drawing is a
//! normal case for a real-time renderer.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VdpError {
    /// Source image palette row width outside 2..=256 (or no palette row at
    /// all). Raised at construction; fatal.
    InvalidPalette(u32),
    /// Screen-page selection or color-table entry addressing outside valid
    /// bounds.
    OutOfRange { index: i64, limit: usize },
    /// Mismatched argument shapes: remap source/target length mismatch, or a
    /// bulk color-table load that is not exactly N*N entries.
    ShapeMismatch { expected: usize, got: usize },
}

impl fmt::Display for VdpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPalette(width) => write!(
                f,
                "invalid palette: source row width {width} (expected 2..=256)"
            ),
            Self::OutOfRange { index, limit } => {
                write!(f, "index {index} out of range (limit {limit})")
            }
            Self::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} entries, got {got}")
            }
        }
    }
}

impl std::error::Error for VdpError {}
