use crate::error::{DecodeError, Result};
use crate::options::{DecodeMode, DecodeOptions};
use crate::parser::{
    BlockWalker, ColorTable, Cursor, GraphicControlExtension, ImageDescriptor, ImageHandling,
    LoopCount, ScreenHeader,
};

use log::debug;

/// One image block together with the extensions that preceded it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub graphic_control: Option<GraphicControlExtension>,
    /// Comment extensions seen since the previous image block.
    pub comments: Vec<String>,
    pub descriptor: ImageDescriptor,
    /// `width * height` color indices in top-to-bottom row order. Only
    /// present for [`DecodeMode::Extended`].
    pub pixel_indices: Option<Box<[u8]>>,
}

/// A GIF file opened at a single frame.
///
/// Only ever constructed from a fully successful parse, there is no
/// partially loaded state.
#[derive(Debug, Clone)]
pub struct GifDocument {
    header: ScreenHeader,
    frame_index: usize,
    frame: DecodedFrame,
    loop_count: Option<LoopCount>,
}

impl GifDocument {
    /// Parses `bytes` up to the image block at `frame_index` (0-based).
    pub fn open(bytes: &[u8], frame_index: usize, options: &DecodeOptions) -> Result<Self> {
        let mut cursor = Cursor::new(bytes);
        let header = ScreenHeader::parse(&mut cursor)?;

        let mut walker = BlockWalker::new(cursor, options);
        let target_handling = match options.mode() {
            DecodeMode::HeaderOnly => ImageHandling::DescriptorOnly,
            DecodeMode::Extended => ImageHandling::Decode,
        };

        let mut seen = 0;
        let frame = loop {
            let handling = if seen == frame_index {
                target_handling
            } else {
                ImageHandling::Skip
            };

            match walker.next_image(handling)? {
                Some(frame) if seen == frame_index => break frame,
                Some(_) => seen += 1,
                None => {
                    return Err(DecodeError::FrameIndexOutOfRange {
                        requested: frame_index,
                        available: seen,
                    })
                }
            }
        };
        debug!("found frame {} at offset {}", frame_index, walker.position());

        if options.mode() == DecodeMode::Extended && options.verify_trailer() {
            while walker.next_image(ImageHandling::Skip)?.is_some() {}
        }

        Ok(Self {
            header,
            frame_index,
            frame,
            loop_count: walker.loop_count(),
        })
    }

    pub fn header(&self) -> &ScreenHeader {
        &self.header
    }

    pub fn width(&self) -> u16 {
        self.header.width
    }

    pub fn height(&self) -> u16 {
        self.header.height
    }

    pub fn looks_animated(&self) -> bool {
        self.header.looks_animated
    }

    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn frame(&self) -> &DecodedFrame {
        &self.frame
    }

    pub fn descriptor(&self) -> &ImageDescriptor {
        &self.frame.descriptor
    }

    pub fn graphic_control(&self) -> Option<&GraphicControlExtension> {
        self.frame.graphic_control.as_ref()
    }

    pub fn pixel_indices(&self) -> Option<&[u8]> {
        self.frame.pixel_indices.as_deref()
    }

    /// The frame's local color table, falling back to the global one.
    pub fn active_color_table(&self) -> Option<&ColorTable> {
        self.frame
            .descriptor
            .local_color_table
            .as_ref()
            .or(self.header.global_color_table.as_ref())
    }

    /// Loop count announced by a NETSCAPE2.0 application extension, if one
    /// was read before decoding stopped.
    pub fn loop_count(&self) -> Option<LoopCount> {
        self.loop_count
    }
}
