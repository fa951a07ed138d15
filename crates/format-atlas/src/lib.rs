//! PNG atlas decoder.
//!
//! A console's palette and initial sprite data ship as one PNG: the top row
//! is the palette, every remaining row is pixel data. This crate only
//! decodes the PNG into a plain RGBA8 image — interpreting the rows is the
//! VDP's job, which keeps the chip crate free of any image-format
//! dependency.
//!
//! All PNG color types are normalized to RGBA8: indexed and low-bit-depth
//! images are expanded, 16-bit channels are stripped to 8, and grayscale /
//! RGB gain an opaque alpha channel.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// A decoded RGBA8 image: `width * height * 4` bytes, row-major.
pub struct AtlasImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug)]
pub enum AtlasError {
    Io(io::Error),
    Decode(png::DecodingError),
    /// The decoder produced a layout this crate does not normalize.
    Unsupported(png::ColorType),
}

impl fmt::Display for AtlasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "atlas I/O error: {err}"),
            Self::Decode(err) => write!(f, "atlas PNG decode error: {err}"),
            Self::Unsupported(color_type) => {
                write!(f, "unsupported atlas color type: {color_type:?}")
            }
        }
    }
}

impl std::error::Error for AtlasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Decode(err) => Some(err),
            Self::Unsupported(_) => None,
        }
    }
}

impl From<io::Error> for AtlasError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<png::DecodingError> for AtlasError {
    fn from(err: png::DecodingError) -> Self {
        Self::Decode(err)
    }
}

impl AtlasImage {
    /// Decode a PNG from memory into RGBA8.
    ///
    /// # Errors
    ///
    /// `Decode` for malformed PNG data, `Unsupported` if the decoder
    /// produces a color layout this crate cannot normalize.
    pub fn from_png_bytes(bytes: &[u8]) -> Result<Self, AtlasError> {
        let mut decoder = png::Decoder::new(bytes);
        // Expand indexed/low-bit-depth data and strip 16-bit channels so
        // the output is always 8 bits per channel.
        decoder.set_transformations(png::Transformations::normalize_to_color8());
        let mut reader = decoder.read_info()?;

        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        buf.truncate(info.buffer_size());

        let rgba = match info.color_type {
            png::ColorType::Rgba => buf,
            png::ColorType::Rgb => buf
                .chunks_exact(3)
                .flat_map(|px| [px[0], px[1], px[2], 0xFF])
                .collect(),
            png::ColorType::Grayscale => {
                buf.iter().flat_map(|&v| [v, v, v, 0xFF]).collect()
            }
            png::ColorType::GrayscaleAlpha => buf
                .chunks_exact(2)
                .flat_map(|px| [px[0], px[0], px[0], px[1]])
                .collect(),
            other => return Err(AtlasError::Unsupported(other)),
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            rgba,
        })
    }

    /// Decode a PNG file into RGBA8.
    ///
    /// # Errors
    ///
    /// `Io` for filesystem failures, otherwise as
    /// [`AtlasImage::from_png_bytes`].
    pub fn load_png(path: &Path) -> Result<Self, AtlasError> {
        Self::from_png_bytes(&fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a PNG in memory with the given color type and raw pixel data.
    fn encode_png(width: u32, height: u32, color_type: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn decodes_rgba_unchanged() {
        let pixels = [1, 2, 3, 4, 5, 6, 7, 8];
        let bytes = encode_png(2, 1, png::ColorType::Rgba, &pixels);
        let atlas = AtlasImage::from_png_bytes(&bytes).unwrap();
        assert_eq!(atlas.width, 2);
        assert_eq!(atlas.height, 1);
        assert_eq!(atlas.rgba, pixels);
    }

    #[test]
    fn rgb_gains_opaque_alpha() {
        let bytes = encode_png(2, 1, png::ColorType::Rgb, &[10, 20, 30, 40, 50, 60]);
        let atlas = AtlasImage::from_png_bytes(&bytes).unwrap();
        assert_eq!(atlas.rgba, [10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn grayscale_expands_to_rgba() {
        let bytes = encode_png(2, 1, png::ColorType::Grayscale, &[0, 200]);
        let atlas = AtlasImage::from_png_bytes(&bytes).unwrap();
        assert_eq!(atlas.rgba, [0, 0, 0, 255, 200, 200, 200, 255]);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(
            AtlasImage::from_png_bytes(b"not a png"),
            Err(AtlasError::Decode(_))
        ));
    }
}
