mod bit_reader;
mod color_table;
mod cursor;
mod decoder;
mod extension;
mod image;
mod interlace;
mod lzw;
mod screen;

pub use bit_reader::{CodeReader, CodeResult};
pub use color_table::{ColorTable, Rgb};
pub use cursor::Cursor;
pub use decoder::{BlockWalker, ImageHandling};
pub use extension::{
    read_extension, DisposalMethod, Extension, GraphicControlExtension, LoopCount,
};
pub use image::ImageDescriptor;
pub use interlace::{deinterlace, interlaced_rows};
pub use lzw::{decompress, Decompressed, LzwDecoder};
pub use screen::{looks_animated, ScreenHeader, Version};
