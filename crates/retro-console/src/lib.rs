//! Indexed-color retro console.
//!
//! Wires the VDP chip to its assets: a PNG atlas (palette row plus sprite
//! rows) loaded through `format-atlas`, plus headless PNG capture of
//! rendered frames. Presentation (windowing, input, audio) is deliberately
//! absent — the console produces pixel buffers, and embedders decide what
//! to do with them.

pub mod capture;
mod config;
mod console;

pub use config::ConsoleConfig;
pub use console::{Console, ConsoleError};
