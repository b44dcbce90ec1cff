use super::cursor::Cursor;
use super::extension::{read_extension, Extension, GraphicControlExtension, LoopCount};
use super::image::ImageDescriptor;
use super::interlace::deinterlace;
use super::lzw::LzwDecoder;
use crate::document::DecodedFrame;
use crate::error::{DecodeError, Result};
use crate::options::DecodeOptions;

use log::{debug, trace};

use std::mem;

const EXTENSION_INTRODUCER: u8 = 0x21;
const IMAGE_DESCRIPTOR_LABEL: u8 = 0x2c;
const TRAILER_LABEL: u8 = 0x3b;

/// What to do with the next image block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageHandling {
    /// Read the descriptor, step over the color table and pixel data.
    Skip,
    /// Read the descriptor and color table, stop before the pixel data.
    DescriptorOnly,
    /// Read everything and decompress the pixel indices.
    Decode,
}

#[derive(Debug)]
enum ParserState {
    DetermineNextBlock,
    ProcessExtension,
    ProcessImageDescriptor,
    ProcessImageData(ImageDescriptor),
    SkipImageData(ImageDescriptor),

    Emit(DecodedFrame),
    Done,
}

/// Walks the blocks that follow the screen header, one image at a time.
pub struct BlockWalker<'a> {
    cursor: Cursor<'a>,
    max_pixels: Option<u64>,
    keep_comments: bool,

    graphic_control: Option<GraphicControlExtension>,
    comments: Vec<String>,
    loop_count: Option<LoopCount>,
    finished: bool,
}

impl<'a> BlockWalker<'a> {
    /// `cursor` must sit on the first block after the screen header.
    pub fn new(cursor: Cursor<'a>, options: &DecodeOptions) -> Self {
        Self {
            cursor,
            max_pixels: options.max_pixels(),
            keep_comments: options.keep_comments(),
            graphic_control: None,
            comments: Vec::new(),
            loop_count: None,
            finished: false,
        }
    }

    /// Advances past the next image block. Returns `None` once the trailer
    /// has been read. The graphic control extension and comments that
    /// preceded the image are attached to the returned frame.
    pub fn next_image(&mut self, handling: ImageHandling) -> Result<Option<DecodedFrame>> {
        if self.finished {
            return Ok(None);
        }

        let mut state = ParserState::DetermineNextBlock;
        loop {
            trace!("begin parsing state {:?}", state);

            state = match self.process_next_state(state, handling)? {
                ParserState::Emit(frame) => return Ok(Some(frame)),
                ParserState::Done => {
                    self.finished = true;
                    return Ok(None);
                }
                next_state => next_state,
            };
        }
    }

    pub fn loop_count(&self) -> Option<LoopCount> {
        self.loop_count
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    fn process_next_state(
        &mut self,
        state: ParserState,
        handling: ImageHandling,
    ) -> Result<ParserState> {
        use ParserState::*;

        match state {
            DetermineNextBlock => {
                let offset = self.cursor.position();
                let introducer_or_label = self.cursor.read_byte()?;

                match introducer_or_label {
                    // extension introducer means that a label follows determining what exact type
                    // of extension it is.
                    EXTENSION_INTRODUCER => Ok(ProcessExtension),
                    IMAGE_DESCRIPTOR_LABEL => Ok(ProcessImageDescriptor),
                    TRAILER_LABEL => Ok(Done),
                    label => Err(DecodeError::UnrecognizedBlock { label, offset }),
                }
            }
            ProcessExtension => {
                match read_extension(&mut self.cursor, self.keep_comments)? {
                    Extension::GraphicControl(extension) => {
                        self.graphic_control = Some(extension);
                    }
                    Extension::Comment(Some(text)) => self.comments.push(text),
                    Extension::Application {
                        loop_count: Some(loop_count),
                    } => self.loop_count = Some(loop_count),
                    _ => {}
                }
                Ok(DetermineNextBlock)
            }
            ProcessImageDescriptor => {
                let load_table = handling != ImageHandling::Skip;
                let descriptor = ImageDescriptor::parse(&mut self.cursor, load_table)?;

                Ok(match handling {
                    ImageHandling::Skip => SkipImageData(descriptor),
                    ImageHandling::DescriptorOnly => Emit(self.frame(descriptor, None)),
                    ImageHandling::Decode => ProcessImageData(descriptor),
                })
            }
            SkipImageData(descriptor) => {
                // minimum code size, then the data sub-blocks
                self.cursor.read_byte()?;
                self.cursor.skip_sub_blocks()?;
                debug!("skipped image data at offset {}", self.cursor.position());

                Ok(Emit(self.frame(descriptor, None)))
            }
            ProcessImageData(descriptor) => {
                let pixels = self.decode_pixels(&descriptor)?;
                Ok(Emit(self.frame(descriptor, Some(pixels))))
            }
            Emit(frame) => Ok(Emit(frame)),
            Done => Ok(Done),
        }
    }

    fn decode_pixels(&mut self, descriptor: &ImageDescriptor) -> Result<Box<[u8]>> {
        let pixel_count = descriptor.pixel_count();
        if let Some(limit) = self.max_pixels {
            if pixel_count as u64 > limit {
                return Err(DecodeError::ImageTooLarge {
                    width: descriptor.width,
                    height: descriptor.height,
                    limit,
                });
            }
        }

        let decompressed = LzwDecoder::new()
            .with_base_offset(self.cursor.position())
            .decompress(self.cursor.rest(), pixel_count)?;
        self.cursor.skip(decompressed.consumed)?;

        let indices = decompressed.indices;
        debug!(
            "decompressed {} of {} pixel indices from {} bytes",
            indices.len(),
            pixel_count,
            decompressed.consumed
        );
        if indices.len() < pixel_count {
            return Err(DecodeError::TruncatedStream {
                offset: self.cursor.position(),
            });
        }

        let indices = if descriptor.interlace_flag {
            deinterlace(
                &indices,
                usize::from(descriptor.width),
                usize::from(descriptor.height),
            )
        } else {
            indices
        };

        Ok(indices.into_boxed_slice())
    }

    fn frame(&mut self, descriptor: ImageDescriptor, pixels: Option<Box<[u8]>>) -> DecodedFrame {
        DecodedFrame {
            graphic_control: self.graphic_control.take(),
            comments: mem::take(&mut self.comments),
            descriptor,
            pixel_indices: pixels,
        }
    }
}
