//! Structural and pixel-data decoder for GIF87a/GIF89a files.
//!
//! ```no_run
//! use gifdoc::{DecodeOptions, GifDocument};
//!
//! let bytes = std::fs::read("animation.gif").unwrap();
//! let document = GifDocument::open(&bytes, 0, &DecodeOptions::default()).unwrap();
//! println!("{}x{}", document.width(), document.height());
//! ```

mod document;
mod error;
mod options;
pub mod parser;

pub use document::{DecodedFrame, GifDocument};
pub use error::{DecodeError, Result};
pub use options::{DecodeMode, DecodeOptions, DEFAULT_MAX_PIXELS};
pub use parser::{
    ColorTable, DisposalMethod, GraphicControlExtension, ImageDescriptor, LoopCount, Rgb,
    ScreenHeader, Version,
};
