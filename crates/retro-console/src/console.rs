//! Top-level console wiring.

use std::fmt;

use retro_vdp::{SourceImage, Vdp, VdpError};

use crate::config::ConsoleConfig;

#[derive(Debug)]
pub enum ConsoleError {
    Vdp(VdpError),
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vdp(err) => write!(f, "VDP error: {err}"),
        }
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Vdp(err) => Some(err),
        }
    }
}

impl From<VdpError> for ConsoleError {
    fn from(err: VdpError) -> Self {
        Self::Vdp(err)
    }
}

/// A console: one VDP plus its loaded atlas.
pub struct Console {
    vdp: Vdp,
}

impl Console {
    /// Create a console from the given configuration. The atlas's top row
    /// becomes the palette and its remaining rows preload page 0.
    ///
    /// # Errors
    ///
    /// `ConsoleError::Vdp` when the atlas palette row is invalid.
    pub fn new(config: &ConsoleConfig) -> Result<Self, ConsoleError> {
        let source = SourceImage::new(
            config.atlas.width,
            config.atlas.height,
            config.atlas.rgba.clone(),
        );
        let vdp = Vdp::new(config.width, config.height, config.pages, &source)?;
        Ok(Self { vdp })
    }

    /// The video chip, for drawing.
    pub fn vdp_mut(&mut self) -> &mut Vdp {
        &mut self.vdp
    }

    /// The video chip, read-only.
    #[must_use]
    pub fn vdp(&self) -> &Vdp {
        &self.vdp
    }

    /// Render the bound screen buffer to packed ARGB32.
    pub fn render(&mut self) -> &[u32] {
        self.vdp.render()
    }

    /// Screen width in pixels.
    #[must_use]
    pub fn framebuffer_width(&self) -> u32 {
        self.vdp.width()
    }

    /// Screen height in pixels.
    #[must_use]
    pub fn framebuffer_height(&self) -> u32 {
        self.vdp.height()
    }
}
