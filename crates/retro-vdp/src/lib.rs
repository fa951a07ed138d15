//! Indexed-color video display processor.
//!
//! A software VDP modeled on fixed-palette consoles: every pixel is a small
//! palette index, every write funnels through one compositing primitive
//! (`pset`), and all compositing policy — transparency, stencils, recolors,
//! blends — lives in a single programmable N×N color table rather than in
//! code paths.
//!
//! # Standalone chip
//!
//! This crate has no dependencies — the VDP is constructed from an
//! already-decoded RGBA image ([`SourceImage`]), keeping it decoupled from
//! any particular image format or presentation layer.
//!
//! # Memory model
//!
//! `pages` blocks of `width * height` index bytes (sprite sheets, tile
//! sheets, back buffers) plus one dedicated screen buffer of the same size.
//! Exactly one of these is bound as the draw/render target at a time; the
//! binding is resolved at access time, never copied, so writes land in the
//! page itself.
//!
//! # Frame protocol
//!
//! The caller binds a screen target, issues any number of compositor,
//! rasterizer, and blit calls, then calls [`Vdp::render`] once to produce a
//! packed ARGB32 output buffer. Single-threaded, synchronous; every call
//! either completes or fails immediately.

mod color_table;
mod dither;
mod error;
mod memory;
mod palette;
mod raster;
mod source;
mod vdp;

pub use color_table::{ColorTable, blend_additive, blend_multiply};
pub use error::VdpError;
pub use palette::Palette;
pub use source::SourceImage;
pub use vdp::Vdp;
