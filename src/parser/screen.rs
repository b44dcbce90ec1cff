use super::color_table::{table_len, ColorTable};
use super::cursor::Cursor;
use crate::error::{DecodeError, Result};

use log::debug;

const GIF87A: &[u8; 6] = b"GIF87a";
const GIF89A: &[u8; 6] = b"GIF89a";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V87a,
    V89a,
}

impl TryFrom<&[u8]> for Version {
    type Error = DecodeError;

    fn try_from(value: &[u8]) -> std::result::Result<Self, Self::Error> {
        match value {
            sig if sig == GIF87A => Ok(Version::V87a),
            sig if sig == GIF89A => Ok(Version::V89a),
            _ => Err(DecodeError::BadSignature),
        }
    }
}

/// Header plus logical screen descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenHeader {
    pub version: Version,
    pub width: u16,
    pub height: u16,
    pub global_color_table_flag: bool,
    pub color_resolution: u8,
    pub sort_flag: bool,
    /// Entry count of the global table, `None` when the flag is clear.
    pub global_color_table_size: Option<usize>,
    pub background_color_index: u8,
    pub pixel_aspect_ratio: u8,
    pub global_color_table: Option<ColorTable>,
    /// See [`looks_animated`].
    pub looks_animated: bool,
}

impl ScreenHeader {
    /// Parses the header from the start of `cursor`, which must be positioned
    /// at the beginning of the file. `looks_animated` is computed over the
    /// whole buffer.
    pub fn parse(cursor: &mut Cursor<'_>) -> Result<Self> {
        let animated = looks_animated(cursor.rest());

        let signature = cursor
            .read_bytes(GIF87A.len())
            .map_err(|_| DecodeError::BadSignature)?;
        let version = Version::try_from(signature)?;

        let width = cursor.read_u16()?;
        let height = cursor.read_u16()?;
        if width == 0 || height == 0 {
            return Err(DecodeError::InvalidDimensions { width, height });
        }

        let packed_fields = cursor.read_byte()?;

        // packed fields definition
        // XYYYZWWW
        // X = global color table flag
        // YYY = color resolution
        // Z = sort flag
        // WWW = size of the global color table
        let global_color_table_flag = packed_fields & 0b10000000 != 0;
        let color_resolution = (packed_fields >> 4) & 0b00000111;
        let sort_flag = packed_fields & 0b00001000 != 0;
        let global_color_table_size = global_color_table_flag.then(|| table_len(packed_fields));

        let background_color_index = cursor.read_byte()?;
        let pixel_aspect_ratio = cursor.read_byte()?;

        let global_color_table = match global_color_table_size {
            Some(size) => Some(ColorTable::load(cursor, size)?),
            None => None,
        };

        let header = Self {
            version,
            width,
            height,
            global_color_table_flag,
            color_resolution,
            sort_flag,
            global_color_table_size,
            background_color_index,
            pixel_aspect_ratio,
            global_color_table,
            looks_animated: animated,
        };
        debug!("processed screen header, got: {:?}", header);

        Ok(header)
    }
}

/// Guesses whether the file is an animation by counting graphic control
/// extensions that are directly followed by an image or another extension.
/// This is a byte scan, not a structural walk, so extension payloads can
/// fool it in either direction.
pub fn looks_animated(buf: &[u8]) -> bool {
    const PATTERN_LEN: usize = 10;

    let mut matches = 0;
    let mut i = 0;
    while i + PATTERN_LEN <= buf.len() {
        let window = &buf[i..i + PATTERN_LEN];
        if window[..4] == [0x00, 0x21, 0xf9, 0x04]
            && window[8] == 0x00
            && matches!(window[9], 0x2c | 0x21)
        {
            matches += 1;
            if matches > 1 {
                return true;
            }
            i += PATTERN_LEN;
        } else {
            i += 1;
        }
    }

    false
}
