use super::cursor::Cursor;
use crate::error::{DecodeError, Result};

use log::debug;

// Extension labels
const APPLICATION_EXTENSION: u8 = 0xff;
const COMMENT_EXTENSION: u8 = 0xfe;
const GRAPHIC_CONTROL_EXTENSION: u8 = 0xf9;
const PLAIN_TEXT_EXTENSION: u8 = 0x01;

const LOOPING_APPLICATIONS: [&[u8]; 2] = [b"NETSCAPE2.0", b"ANIMEXTS1.0"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExtensionType {
    Application,
    Comment,
    GraphicControl,
    PlainText,
    Unknown(u8),
}

impl From<u8> for ExtensionType {
    fn from(value: u8) -> Self {
        use ExtensionType::*;

        match value {
            APPLICATION_EXTENSION => Application,
            COMMENT_EXTENSION => Comment,
            GRAPHIC_CONTROL_EXTENSION => GraphicControl,
            PLAIN_TEXT_EXTENSION => PlainText,
            label => Unknown(label),
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisposalMethod {
    Unspecified = 0,
    DoNotDispose = 1,
    RestoreToBackgroundColor = 2,
    RestoreToPrevious = 3,
}

impl DisposalMethod {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DisposalMethod::Unspecified),
            1 => Some(DisposalMethod::DoNotDispose),
            2 => Some(DisposalMethod::RestoreToBackgroundColor),
            3 => Some(DisposalMethod::RestoreToPrevious),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphicControlExtension {
    /// Raw three bit value, see [`GraphicControlExtension::disposal`].
    pub disposal_method: u8,
    pub user_input_flag: bool,
    pub transparent_color_flag: bool,

    /// Hundredths of a second.
    pub delay_time: u16,
    pub transparent_color_index: u8,
}

impl GraphicControlExtension {
    pub fn disposal(&self) -> Option<DisposalMethod> {
        DisposalMethod::from_u8(self.disposal_method)
    }

    pub fn transparent_index(&self) -> Option<u8> {
        self.transparent_color_flag
            .then_some(self.transparent_color_index)
    }

    fn parse(data: &[u8]) -> Result<Self> {
        let [packed_fields, delay_lo, delay_hi, transparent_color_index, ..] = *data else {
            return Err(DecodeError::MalformedExtension {
                label: GRAPHIC_CONTROL_EXTENSION,
            });
        };

        // packed fields definition
        // XXXYYYZW
        // XXX = reserved, not needed
        // YYY = disposal method, indicates what to do with graphic after displaying
        // Z = user input flag
        // W = transparent color flag
        Ok(Self {
            disposal_method: (packed_fields >> 2) & 0b00000111,
            user_input_flag: packed_fields & 0b00000010 != 0,
            transparent_color_flag: packed_fields & 0b00000001 != 0,
            delay_time: u16::from_le_bytes([delay_lo, delay_hi]),
            transparent_color_index,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCount {
    Infinite,
    Number(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extension {
    GraphicControl(GraphicControlExtension),
    /// `None` when comments are not being retained.
    Comment(Option<String>),
    Application { loop_count: Option<LoopCount> },
    /// Plain text and unknown labels, skipped without interpretation.
    Skipped(u8),
}

/// Reads one extension block. `cursor` sits just after the 0x21 introducer
/// and is left on the byte following the block terminator.
pub fn read_extension(cursor: &mut Cursor<'_>, keep_comments: bool) -> Result<Extension> {
    use ExtensionType::*;

    let label = cursor.read_byte()?;
    let extension_type = ExtensionType::from(label);
    debug!("processing extension type: {:?}", extension_type);

    let extension = match extension_type {
        GraphicControl => {
            let data = cursor.read_sub_blocks()?;
            Extension::GraphicControl(GraphicControlExtension::parse(&data)?)
        }
        Comment if keep_comments => {
            let data = cursor.read_sub_blocks()?;
            Extension::Comment(Some(String::from_utf8_lossy(&data).into_owned()))
        }
        Comment => {
            cursor.skip_sub_blocks()?;
            Extension::Comment(None)
        }
        Application => {
            let block_size = cursor.read_byte()?;
            let identifier = cursor.read_bytes(block_size.into())?;
            let application_data = cursor.read_sub_blocks()?;

            let loop_count = match application_data.as_slice() {
                [1, lo, hi, ..] if LOOPING_APPLICATIONS.contains(&identifier) => {
                    Some(match u16::from_le_bytes([*lo, *hi]) {
                        0 => LoopCount::Infinite,
                        number => LoopCount::Number(number),
                    })
                }
                _ => None,
            };
            Extension::Application { loop_count }
        }
        PlainText | Unknown(_) => {
            cursor.skip_sub_blocks()?;
            Extension::Skipped(label)
        }
    };

    debug!("processed extension, got: {:?}", extension);
    Ok(extension)
}
