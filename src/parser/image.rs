use super::color_table::{table_len, ColorTable};
use super::cursor::Cursor;
use crate::error::{DecodeError, Result};

use log::debug;

/// Image descriptor, read after the 0x2c label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    pub left_position: u16,
    pub top_position: u16,

    pub width: u16,
    pub height: u16,

    pub local_color_table_flag: bool,
    pub interlace_flag: bool,
    pub sort_flag: bool,
    pub local_color_table_size: Option<usize>,

    pub local_color_table: Option<ColorTable>,
}

impl ImageDescriptor {
    /// Parses the nine descriptor bytes and the local color table, if any.
    /// With `load_table` unset the table is skipped over instead.
    pub fn parse(cursor: &mut Cursor<'_>, load_table: bool) -> Result<Self> {
        let left_position = cursor.read_u16()?;
        let top_position = cursor.read_u16()?;

        let width = cursor.read_u16()?;
        let height = cursor.read_u16()?;
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions { width, height });
        }

        let packed_fields = cursor.read_byte()?;

        let local_color_table_flag = packed_fields & 0b10000000 != 0;
        let interlace_flag = packed_fields & 0b01000000 != 0;
        let sort_flag = packed_fields & 0b00100000 != 0;
        let local_color_table_size = local_color_table_flag.then(|| table_len(packed_fields));

        let local_color_table = match local_color_table_size {
            Some(size) if load_table => Some(ColorTable::load(cursor, size)?),
            Some(size) => {
                ColorTable::skip(cursor, size)?;
                None
            }
            None => None,
        };

        let descriptor = Self {
            left_position,
            top_position,
            width,
            height,
            local_color_table_flag,
            interlace_flag,
            sort_flag,
            local_color_table_size,
            local_color_table,
        };
        debug!("processed image descriptor, got: {:?}", descriptor);

        Ok(descriptor)
    }

    pub fn pixel_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}
